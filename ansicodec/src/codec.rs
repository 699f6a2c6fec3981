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

use crate::parser::SgrScanner;
use crate::style::StyledRun;
use crate::{AnsiCodecError, AnsiCodecResult};
use amlp_telnetcodec::{TelnetEvent, TelnetFrame};
use tokio_util::bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{instrument, trace};

/// What the styled text decoder yields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnsiEvent {
    /// Text received in one read.
    ///
    /// `text` is the decoded chunk including escape sequences, for consumers
    /// that inspect raw text such as prompt detection. `runs` are the styled
    /// runs it completed and may be empty.
    Text {
        /// Decoded chunk
        text: String,
        /// Styled runs ready for display
        runs: Vec<StyledRun>,
    },
    /// A non-data event from the Telnet layer
    Telnet(TelnetEvent),
}

/// Styled text codec layered over a Telnet codec.
///
/// The inner codec separates data bytes from Telnet commands. Data bytes from
/// one read are gathered, decoded as UTF-8 and fed through an [`SgrScanner`].
/// A multi-byte character split across reads is completed on the next read;
/// invalid bytes become U+FFFD.
pub struct AnsiCodec<I> {
    scanner: SgrScanner,
    undecoded: Vec<u8>,
    queued: Option<TelnetEvent>,
    inner: I,
}

impl<I> AnsiCodec<I> {
    /// Creates a new ANSI codec wrapping `codec`.
    pub fn new(codec: I) -> Self {
        Self {
            scanner: SgrScanner::new(),
            undecoded: Vec::new(),
            queued: None,
            inner: codec,
        }
    }

    /// Get a reference to the inner codec
    pub fn inner(&self) -> &I {
        &self.inner
    }

    /// Get a mutable reference to the inner codec
    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.inner
    }

    /// The scanner carrying the session's style.
    pub fn scanner(&self) -> &SgrScanner {
        &self.scanner
    }

    /// Decodes the longest valid UTF-8 prefix of the gathered data bytes.
    ///
    /// An incomplete trailing character stays buffered.
    fn take_text(&mut self) -> Option<String> {
        if self.undecoded.is_empty() {
            return None;
        }
        let mut text = String::with_capacity(self.undecoded.len());
        let mut rest: &[u8] = &self.undecoded;
        while !rest.is_empty() {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    rest = &[];
                }
                Err(error) => {
                    let (valid, after) = rest.split_at(error.valid_up_to());
                    text.push_str(&String::from_utf8_lossy(valid));
                    match error.error_len() {
                        Some(invalid) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[invalid..];
                        }
                        None => {
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }
        let consumed = self.undecoded.len() - rest.len();
        self.undecoded.drain(..consumed);
        if text.is_empty() { None } else { Some(text) }
    }

    fn text_event(&mut self, text: String) -> AnsiEvent {
        let runs = self.scanner.scan(&text);
        trace!("Decoded {} bytes into {} runs", text.len(), runs.len());
        AnsiEvent::Text { text, runs }
    }
}

impl<I> Decoder for AnsiCodec<I>
where
    I: Decoder<Item = TelnetEvent>,
    AnsiCodecError: From<I::Error>,
{
    type Item = AnsiEvent;
    type Error = AnsiCodecError;

    #[instrument(skip_all)]
    fn decode(&mut self, src: &mut BytesMut) -> AnsiCodecResult<Option<Self::Item>> {
        if let Some(event) = self.queued.take() {
            return Ok(Some(AnsiEvent::Telnet(event)));
        }
        loop {
            match self.inner.decode(src)? {
                Some(TelnetEvent::Data(byte)) => self.undecoded.push(byte),
                Some(event) => {
                    // Text that preceded the command is delivered first.
                    return Ok(Some(match self.take_text() {
                        Some(text) => {
                            self.queued = Some(event);
                            self.text_event(text)
                        }
                        None => AnsiEvent::Telnet(event),
                    }));
                }
                None => {
                    return Ok(self.take_text().map(|text| self.text_event(text)));
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> AnsiCodecResult<Option<Self::Item>> {
        if let Some(event) = self.decode(src)? {
            return Ok(Some(event));
        }
        let tail = String::from_utf8_lossy(&self.undecoded).into_owned();
        self.undecoded.clear();
        let mut runs = if tail.is_empty() {
            Vec::new()
        } else {
            self.scanner.scan(&tail)
        };
        runs.extend(self.scanner.finish());
        if tail.is_empty() && runs.is_empty() {
            Ok(None)
        } else {
            Ok(Some(AnsiEvent::Text { text: tail, runs }))
        }
    }
}

impl<I> Encoder<TelnetFrame> for AnsiCodec<I>
where
    I: Encoder<TelnetFrame>,
    AnsiCodecError: From<I::Error>,
{
    type Error = AnsiCodecError;

    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> AnsiCodecResult<()> {
        self.inner.encode(item, dst)?;
        Ok(())
    }
}
