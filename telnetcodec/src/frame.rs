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

use crate::naws::WindowSize;
use bytes::Bytes;

/// Outgoing frames understood by the encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetFrame {
    /// Application data; `IAC` bytes are doubled on the wire
    Data(Bytes),
    /// `IAC WILL <option>`
    Will(u8),
    /// `IAC SB NAWS <escaped size> IAC SE`
    Subnegotiate(WindowSize),
}

impl TelnetFrame {
    /// Builds a data frame for a submitted line, terminated with CR LF.
    pub fn line(text: &str) -> TelnetFrame {
        let mut line = String::with_capacity(text.len() + 2);
        line.push_str(text);
        line.push_str("\r\n");
        TelnetFrame::Data(Bytes::from(line))
    }
}
