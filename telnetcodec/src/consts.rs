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

//! Telnet protocol byte values (RFC 854, RFC 1073).

/// Carriage Return
pub const CR: u8 = 13;
/// Line Feed
pub const LF: u8 = 10;

/// End of subnegotiation parameters.
pub const SE: u8 = 240;
/// No operation.
pub const NOP: u8 = 241;
/// The data stream portion of a Synch.
pub const DM: u8 = 242;
/// NVT character BRK.
pub const BRK: u8 = 243;
/// Interrupt Process.
pub const IP: u8 = 244;
/// Abort output.
pub const AO: u8 = 245;
/// Are You There.
pub const AYT: u8 = 246;
/// Erase character.
pub const EC: u8 = 247;
/// Erase line.
pub const EL: u8 = 248;
/// Go ahead.
pub const GA: u8 = 249;
/// Subnegotiation begin.
pub const SB: u8 = 250;
/// Indicates the desire to begin performing an option.
pub const WILL: u8 = 251;
/// Refusal to perform an option.
pub const WONT: u8 = 252;
/// Request that the other party perform an option.
pub const DO: u8 = 253;
/// Demand that the other party stop performing an option.
pub const DONT: u8 = 254;
/// Interpret As Command.
pub const IAC: u8 = 255;

/// Telnet option codes.
pub mod option {
    /// Negotiate About Window Size (RFC 1073)
    pub const NAWS: u8 = 31;
}

/// Upper bound on a buffered subnegotiation payload.
///
/// Blocks longer than this are discarded so a peer that never sends `IAC SE`
/// cannot grow the decoder buffer without limit.
pub const MAX_SUBNEGOTIATION_LENGTH: usize = 4096;
