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

//! Negotiate About Window Size
//!
//! The client announces `IAC WILL NAWS` once the socket reports connected and
//! immediately follows it with the window dimensions:
//!
//! ```text
//! IAC SB NAWS <width-hi> <width-lo> <height-hi> <height-lo> IAC SE
//! ```
//!
//! Any payload byte equal to `IAC` (255) is doubled. The framing `IAC SB` and
//! `IAC SE` pairs are written once.

use crate::consts::{self, option};
use crate::frame::TelnetFrame;
use byteorder::{BigEndian, ByteOrder};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::debug;

/// Width substituted when the measured column count is implausibly small.
pub const FALLBACK_COLUMNS: u16 = 40;

/// Smallest column count accepted as a real measurement.
pub const MIN_PLAUSIBLE_COLUMNS: u16 = 20;

/// Represents the Negotiate About Window Size (NAWS) option data.
///
/// # Format
/// The window size is encoded as four bytes in big-endian format:
/// - 2 bytes for columns (width)
/// - 2 bytes for rows (height)
///
/// # Example
/// ```
/// use amlp_telnetcodec::naws::WindowSize;
///
/// let size = WindowSize::new(80, 24);
/// assert_eq!(size.cols, 80);
/// assert_eq!(size.rows, 24);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// The number of columns (characters) in the terminal window
    pub cols: u16,
    /// The number of rows (lines) in the terminal window
    pub rows: u16,
}

impl WindowSize {
    /// Creates a new `WindowSize` with the specified columns and rows.
    pub fn new(cols: u16, rows: u16) -> Self {
        WindowSize { cols, rows }
    }

    /// Builds a `WindowSize` from measured display geometry.
    ///
    /// Column counts below [`MIN_PLAUSIBLE_COLUMNS`] are replaced with
    /// [`FALLBACK_COLUMNS`], a zero row count becomes 1, and values wider than
    /// 16 bits saturate at `u16::MAX`.
    pub fn clamped(cols: u32, rows: u32) -> Self {
        let cols = u16::try_from(cols).unwrap_or(u16::MAX);
        let rows = u16::try_from(rows).unwrap_or(u16::MAX);
        WindowSize {
            cols: if cols < MIN_PLAUSIBLE_COLUMNS {
                FALLBACK_COLUMNS
            } else {
                cols
            },
            rows: rows.max(1),
        }
    }

    /// Returns the four unescaped payload bytes.
    pub fn payload(&self) -> [u8; 4] {
        let mut raw = [0u8; 4];
        BigEndian::write_u16(&mut raw[0..2], self.cols);
        BigEndian::write_u16(&mut raw[2..4], self.rows);
        raw
    }

    /// Returns the encoded payload length including any doubled `IAC` bytes.
    pub fn len(&self) -> usize {
        self.payload()
            .iter()
            .map(|byte| if *byte == consts::IAC { 2 } else { 1 })
            .sum()
    }

    /// Always `false`; the payload is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Writes the payload into `dst`, doubling every byte equal to `IAC`.
    ///
    /// Returns the number of bytes written.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> usize {
        let mut written = 0;
        for byte in self.payload() {
            if byte == consts::IAC {
                dst.put_u8(consts::IAC);
                written += 1;
            }
            dst.put_u8(byte);
            written += 1;
        }
        written
    }

    /// Decodes an unescaped four byte payload.
    ///
    /// Returns `None` if fewer than four bytes are available.
    pub fn decode<T: Buf>(src: &mut T) -> Option<WindowSize> {
        // NAWS format: WIDTH-HIGH WIDTH-LOW HEIGHT-HIGH HEIGHT-LOW
        if src.remaining() >= 4 {
            Some(WindowSize {
                cols: src.get_u16(),
                rows: src.get_u16(),
            })
        } else {
            None
        }
    }
}

impl Default for WindowSize {
    /// A standard 80x24 terminal.
    fn default() -> Self {
        WindowSize { cols: 80, rows: 24 }
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.cols, self.rows)
    }
}

/// Returns the exact wire bytes of a NAWS announcement, in send order.
///
/// The first element is `IAC WILL NAWS`, the second the escaped subnegotiation.
///
/// ```
/// use amlp_telnetcodec::naws::{announcement, WindowSize};
///
/// let [will, sb] = announcement(WindowSize::new(80, 24));
/// assert_eq!(&will[..], &[255, 251, 31]);
/// assert_eq!(&sb[..], &[255, 250, 31, 0, 80, 0, 24, 255, 240]);
/// ```
pub fn announcement(size: WindowSize) -> [Bytes; 2] {
    let will = Bytes::from_static(&[consts::IAC, consts::WILL, option::NAWS]);

    let mut sb = BytesMut::with_capacity(5 + size.len());
    sb.put_u8(consts::IAC);
    sb.put_u8(consts::SB);
    sb.put_u8(option::NAWS);
    size.encode(&mut sb);
    sb.put_u8(consts::IAC);
    sb.put_u8(consts::SE);

    [will, sb.freeze()]
}

/// Emits the window size announcement once per session.
///
/// The announcement is fire-and-forget: it is never retried and resizes are
/// not reported.
#[derive(Debug, Default)]
pub struct NawsNegotiator {
    announced: bool,
}

impl NawsNegotiator {
    /// Creates a negotiator for a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the announcement has already been produced.
    pub fn is_announced(&self) -> bool {
        self.announced
    }

    /// Produces the `WILL NAWS` and subnegotiation frames on the first call.
    ///
    /// Subsequent calls return `None`.
    pub fn on_connected(&mut self, cols: u32, rows: u32) -> Option<[TelnetFrame; 2]> {
        if self.announced {
            return None;
        }
        self.announced = true;
        let size = WindowSize::clamped(cols, rows);
        debug!("Announcing window size {} (measured {}x{})", size, cols, rows);
        Some([
            TelnetFrame::Will(option::NAWS),
            TelnetFrame::Subnegotiate(size),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_big_endian() {
        assert_eq!(WindowSize::new(80, 24).payload(), [0x00, 0x50, 0x00, 0x18]);
        assert_eq!(WindowSize::new(0x1234, 0xABCD).payload(), [0x12, 0x34, 0xAB, 0xCD]);
    }

    #[test]
    fn encode_doubles_iac_payload_bytes() {
        let mut buf = BytesMut::new();
        let written = WindowSize::new(255, 0xFFFF).encode(&mut buf);
        assert_eq!(&buf[..], &[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(written, 7);
        assert_eq!(WindowSize::new(255, 0xFFFF).len(), 7);
    }

    #[test]
    fn clamped_substitutes_fallback_width() {
        assert_eq!(WindowSize::clamped(3, 10), WindowSize::new(FALLBACK_COLUMNS, 10));
        assert_eq!(WindowSize::clamped(0, 0), WindowSize::new(FALLBACK_COLUMNS, 1));
        assert_eq!(WindowSize::clamped(132, 43), WindowSize::new(132, 43));
        assert_eq!(
            WindowSize::clamped(100_000, 70_000),
            WindowSize::new(u16::MAX, u16::MAX)
        );
    }

    #[test]
    fn decode_requires_four_bytes() {
        let mut short = &[0x00, 0x50, 0x00][..];
        assert_eq!(WindowSize::decode(&mut short), None);
        let mut full = &[0x00, 0x50, 0x00, 0x18][..];
        assert_eq!(WindowSize::decode(&mut full), Some(WindowSize::new(80, 24)));
    }

    #[test]
    fn negotiator_announces_once() {
        let mut negotiator = NawsNegotiator::new();
        assert!(!negotiator.is_announced());
        let frames = negotiator.on_connected(80, 24).unwrap();
        assert_eq!(frames[0], TelnetFrame::Will(option::NAWS));
        assert_eq!(frames[1], TelnetFrame::Subnegotiate(WindowSize::new(80, 24)));
        assert!(negotiator.is_announced());
        assert!(negotiator.on_connected(100, 50).is_none());
    }
}
