//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use bytes::Bytes;

/// The four option negotiation verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TelnetVerb {
    /// `WILL` (251)
    Will,
    /// `WONT` (252)
    Wont,
    /// `DO` (253)
    Do,
    /// `DONT` (254)
    Dont,
}

impl TelnetVerb {
    /// Maps a command byte to a verb, if it is one.
    pub fn from_byte(byte: u8) -> Option<TelnetVerb> {
        match byte {
            crate::consts::WILL => Some(TelnetVerb::Will),
            crate::consts::WONT => Some(TelnetVerb::Wont),
            crate::consts::DO => Some(TelnetVerb::Do),
            crate::consts::DONT => Some(TelnetVerb::Dont),
            _ => None,
        }
    }

    /// The command byte for this verb.
    pub fn to_byte(self) -> u8 {
        match self {
            TelnetVerb::Will => crate::consts::WILL,
            TelnetVerb::Wont => crate::consts::WONT,
            TelnetVerb::Do => crate::consts::DO,
            TelnetVerb::Dont => crate::consts::DONT,
        }
    }
}

///
/// `TelnetEvent` represents what the decoder found in the incoming stream.
/// Data bytes are separated from protocol commands so that command bytes never
/// reach the text renderer.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetEvent {
    /// Telnet Data Byte (an escaped `IAC IAC` arrives as a single 255)
    Data(u8),
    /// Two byte command such as `IAC GA` or `IAC NOP`
    Command(u8),
    /// Option negotiation request
    Negotiate(TelnetVerb, u8),
    /// Complete subnegotiation block with its unescaped payload
    Subnegotiate {
        /// Option code following `IAC SB`
        option: u8,
        /// Payload between the option code and `IAC SE`
        payload: Bytes,
    },
}
