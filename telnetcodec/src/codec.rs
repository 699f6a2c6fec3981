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

use crate::consts::{self, option};
use crate::{TelnetCodecError, TelnetEvent, TelnetFrame, TelnetVerb};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{trace, warn};

///
/// Telnet codec for a client session.
///
/// The decoder separates data bytes from Telnet commands, negotiations and
/// subnegotiation blocks. The encoder writes application data with `IAC`
/// escaping and the NAWS announcement frames.
///
/// Decoder state survives between calls, so a command or subnegotiation that
/// is split across two socket reads is reassembled.
///
#[derive(Debug)]
pub struct TelnetCodec {
    decoder_state: DecoderState,
    decoder_buffer: BytesMut,
    discarding: bool,
}

impl TelnetCodec {
    /// Creates a codec in the normal data state.
    pub fn new() -> TelnetCodec {
        TelnetCodec {
            decoder_state: DecoderState::NormalData,
            decoder_buffer: BytesMut::new(),
            discarding: false,
        }
    }

    fn buffer_subnegotiation_byte(&mut self, option: u8, byte: u8) {
        if self.discarding {
            return;
        }
        if self.decoder_buffer.len() >= consts::MAX_SUBNEGOTIATION_LENGTH {
            warn!(
                "Subnegotiation for option {} exceeded {} bytes, discarding",
                option,
                consts::MAX_SUBNEGOTIATION_LENGTH
            );
            self.decoder_buffer.clear();
            self.discarding = true;
            return;
        }
        self.decoder_buffer.put_u8(byte);
    }
}

impl Default for TelnetCodec {
    fn default() -> Self {
        TelnetCodec::new()
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetEvent;
    type Error = TelnetCodecError;

    ///
    /// Decodes the next event from `src`.
    ///
    /// - `NormalData`: every byte other than `IAC` is returned as `Data`.
    /// - `InterpretAsCommand`: `IAC IAC` is a literal 255, a verb moves to
    ///   `Negotiate`, `SB` starts a subnegotiation, anything else is a `Command`.
    /// - `SubnegotiateArgument`: payload bytes are buffered, with `IAC IAC`
    ///   collapsed to one byte, until `IAC SE`.
    ///
    /// Returns `Ok(None)` once `src` is exhausted; partial sequences remain in
    /// the decoder state for the next call.
    ///
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while src.has_remaining() {
            let byte = src.get_u8();
            match (self.decoder_state, byte) {
                (DecoderState::NormalData, consts::IAC) => {
                    self.decoder_state = DecoderState::InterpretAsCommand;
                }
                (DecoderState::NormalData, _) => {
                    return Ok(Some(TelnetEvent::Data(byte)));
                }
                (DecoderState::InterpretAsCommand, consts::IAC) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::Data(consts::IAC)));
                }
                (DecoderState::InterpretAsCommand, consts::SB) => {
                    self.decoder_state = DecoderState::SubnegotiateOption;
                }
                (DecoderState::InterpretAsCommand, _) => {
                    if let Some(verb) = TelnetVerb::from_byte(byte) {
                        self.decoder_state = DecoderState::Negotiate(verb);
                    } else {
                        self.decoder_state = DecoderState::NormalData;
                        trace!("Telnet command {}", byte);
                        return Ok(Some(TelnetEvent::Command(byte)));
                    }
                }
                (DecoderState::Negotiate(verb), _) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::Negotiate(verb, byte)));
                }
                (DecoderState::SubnegotiateOption, _) => {
                    self.decoder_buffer.clear();
                    self.discarding = false;
                    self.decoder_state = DecoderState::SubnegotiateArgument(byte);
                }
                (DecoderState::SubnegotiateArgument(option), consts::IAC) => {
                    self.decoder_state = DecoderState::SubnegotiateArgumentIAC(option);
                }
                (DecoderState::SubnegotiateArgument(option), _) => {
                    self.buffer_subnegotiation_byte(option, byte);
                }
                (DecoderState::SubnegotiateArgumentIAC(option), consts::IAC) => {
                    self.decoder_state = DecoderState::SubnegotiateArgument(option);
                    self.buffer_subnegotiation_byte(option, consts::IAC);
                }
                (DecoderState::SubnegotiateArgumentIAC(option), consts::SE) => {
                    self.decoder_state = DecoderState::NormalData;
                    let payload = self.decoder_buffer.split().freeze();
                    if std::mem::take(&mut self.discarding) {
                        continue;
                    }
                    return Ok(Some(TelnetEvent::Subnegotiate { option, payload }));
                }
                (DecoderState::SubnegotiateArgumentIAC(option), _) => {
                    warn!(
                        "Unexpected byte {} after IAC inside subnegotiation for option {}, dropping block",
                        byte, option
                    );
                    self.decoder_buffer.clear();
                    self.discarding = false;
                    self.decoder_state = DecoderState::NormalData;
                }
            }
        }
        Ok(None)
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = TelnetCodecError;

    /// Encodes a `TelnetFrame` for transmission.
    ///
    /// - `Data`: each byte is copied, with `IAC` written twice.
    /// - `Will`: `IAC WILL <option>`.
    /// - `Subnegotiate`: `IAC SB NAWS`, the escaped window size, then `IAC SE`.
    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            TelnetFrame::Data(data) => {
                dst.reserve(data.len());
                for byte in data.iter() {
                    if *byte == consts::IAC {
                        dst.put_u8(consts::IAC);
                    }
                    dst.put_u8(*byte);
                }
            }
            TelnetFrame::Will(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WILL);
                dst.put_u8(option);
            }
            TelnetFrame::Subnegotiate(size) => {
                dst.reserve(5 + size.len());
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                dst.put_u8(option::NAWS);
                size.encode(dst);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
        Ok(())
    }
}

///
/// Represents the internal state of the Telnet decoder.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecoderState {
    /// Plain data bytes
    NormalData,
    /// The previous byte was `IAC`
    InterpretAsCommand,
    /// Waiting for the option byte of a negotiation
    Negotiate(TelnetVerb),
    /// Waiting for the option byte after `IAC SB`
    SubnegotiateOption,
    /// Buffering subnegotiation payload
    SubnegotiateArgument(u8),
    /// An `IAC` was seen inside a subnegotiation payload
    SubnegotiateArgumentIAC(u8),
}
