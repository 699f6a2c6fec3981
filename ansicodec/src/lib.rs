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

//! # AMLP ANSI Codec
//!
//! Turns the incoming byte stream of a text session into styled runs.
//!
//! - [`SgrScanner`] recognizes `ESC [ <params> m` (Select Graphic Rendition),
//!   carries the current [`TextStyle`] between reads and holds back a sequence
//!   that is split across two reads.
//! - [`AnsiCodec`] layers the scanner over the Telnet codec with incremental
//!   UTF-8 decoding, so it can drive a `FramedRead` directly.
//!
//! Only foreground colors (`30..=37`, `90..=97`), bold (`1`) and reset (`0`)
//! change the style. Other escape sequences are left in the text untouched.

mod codec;
pub mod consts;
mod parser;
mod result;
mod style;

pub use self::codec::{AnsiCodec, AnsiEvent};
pub use self::parser::SgrScanner;
pub use self::result::{AnsiCodecError, AnsiCodecResult};
pub use self::style::{Color, DEFAULT_FOREGROUND, StyledRun, TextStyle, coalesce_runs};
pub use amlp_telnetcodec::{TelnetCodec, TelnetCodecError, TelnetEvent, TelnetFrame};
