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

//! # AMLP Telnet Protocol Codec
//!
//! The client side of the Telnet protocol as used by line oriented text
//! servers. The codec handles:
//!
//! - **Data transmission**: raw byte data with `IAC` (Interpret As Command) escaping
//! - **Command stripping**: two byte commands, option negotiations and
//!   subnegotiation blocks are separated from the data stream so they never
//!   reach the text renderer
//! - **Window size**: the NAWS (RFC 1073) announcement sent after connecting
//!
//! ## Usage Example
//!
//! ```rust
//! use amlp_telnetcodec::{TelnetCodec, TelnetEvent, TelnetVerb, consts};
//! use bytes::BytesMut;
//! use tokio_util::codec::Decoder;
//!
//! let mut codec = TelnetCodec::new();
//! let mut input = BytesMut::from(&b"Hi\xFF\xFD\x1F"[..]); // Data + DO NAWS
//! let mut events = Vec::new();
//! while let Some(event) = codec.decode(&mut input).unwrap() {
//!     events.push(event);
//! }
//! assert_eq!(events.last(), Some(&TelnetEvent::Negotiate(TelnetVerb::Do, consts::option::NAWS)));
//! ```
//!
//! ## IAC Escaping
//!
//! Since 0xFF (IAC) is a special byte, it must be escaped when transmitted as
//! data by sending it twice: `IAC IAC` represents a literal 0xFF byte. The same
//! rule applies inside a subnegotiation payload; the framing `IAC SB` and
//! `IAC SE` markers are never doubled.
//!
//! ## Thread Safety
//!
//! `TelnetCodec` carries decoder state and belongs to exactly one connection.

#![warn(future_incompatible, rust_2018_idioms)]

mod codec;
pub mod consts;
mod event;
mod frame;
pub mod naws;
mod result;

pub use self::codec::TelnetCodec;
pub use self::event::{TelnetEvent, TelnetVerb};
pub use self::frame::TelnetFrame;
pub use self::naws::{NawsNegotiator, WindowSize};
pub use self::result::{TelnetCodecError, TelnetCodecResult};
