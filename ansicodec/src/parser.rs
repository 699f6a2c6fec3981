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

use crate::consts::{ESC, MAX_SEQUENCE_LENGTH};
use crate::style::{StyledRun, TextStyle};
use std::borrow::Cow;
use tracing::trace;

/// Outcome of matching an SGR sequence at an `ESC` byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SgrMatch {
    /// `ESC [ <digits or ;>+ m` of the given total length.
    Complete(usize),
    /// The input ends inside something that may still become SGR.
    Incomplete,
    /// Not an SGR sequence; the `ESC` is literal text.
    NotSgr,
}

/// Matches `ESC '[' [0-9;]+ 'm'` at the start of `seq`, which begins with `ESC`.
fn match_sgr(seq: &[u8]) -> SgrMatch {
    match seq.get(1) {
        None => return SgrMatch::Incomplete,
        Some(b'[') => {}
        Some(_) => return SgrMatch::NotSgr,
    }
    let mut index = 2;
    while let Some(byte) = seq.get(index) {
        if index >= MAX_SEQUENCE_LENGTH {
            return SgrMatch::NotSgr;
        }
        match byte {
            b'0'..=b'9' | b';' => index += 1,
            b'm' if index > 2 => return SgrMatch::Complete(index + 1),
            _ => return SgrMatch::NotSgr,
        }
    }
    SgrMatch::Incomplete
}

/// A resumable scanner that splits text into styled runs.
///
/// The scanner recognizes only `ESC [ <params> m` (Select Graphic Rendition).
/// Every other escape sequence is passed through unchanged as literal text.
///
/// It carries two pieces of state between calls:
/// - the current [`TextStyle`], mutated by each SGR sequence;
/// - an unterminated `ESC [ ...` tail, held back and prepended to the next
///   chunk, so a sequence split across two socket reads is still recognized.
///
/// ```
/// use amlp_ansicodec::{Color, SgrScanner};
///
/// let mut scanner = SgrScanner::new();
/// let first = scanner.scan("plain \x1b[1;3");
/// let second = scanner.scan("1mred");
/// assert_eq!(first[0].text, "plain ");
/// assert_eq!(second[0].text, "red");
/// assert_eq!(second[0].style.foreground, Some(Color::Red));
/// assert!(second[0].style.bold);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SgrScanner {
    /// Style carried into the next chunk.
    style: TextStyle,
    /// Unterminated sequence held back from the previous chunk.
    pending: String,
}

impl SgrScanner {
    /// Creates a scanner in the reset style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scanner that continues from `style`.
    pub fn with_style(style: TextStyle) -> Self {
        Self {
            style,
            pending: String::new(),
        }
    }

    /// The style that will apply to the next literal text.
    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// The held back, unterminated sequence.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Restores the initial state for a new session.
    pub fn reset(&mut self) {
        self.style = TextStyle::default();
        self.pending.clear();
    }

    /// Scans one chunk and returns the styled runs it completes.
    ///
    /// Runs are never empty. Concatenating their text reproduces the input
    /// with every recognized SGR sequence removed, except for a trailing
    /// unterminated sequence which is held until the next call.
    pub fn scan(&mut self, chunk: &str) -> Vec<StyledRun> {
        let input: Cow<'_, str> = if self.pending.is_empty() {
            Cow::Borrowed(chunk)
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.push_str(chunk);
            Cow::Owned(joined)
        };
        let text = input.as_ref();
        let bytes = text.as_bytes();

        let mut runs = Vec::new();
        let mut literal_start = 0;
        let mut position = 0;

        while let Some(offset) = bytes[position..].iter().position(|byte| *byte == ESC) {
            let escape = position + offset;
            match match_sgr(&bytes[escape..]) {
                SgrMatch::Complete(length) => {
                    self.push_literal(&mut runs, &text[literal_start..escape]);
                    self.style
                        .apply_parameters(&text[escape + 2..escape + length - 1]);
                    trace!("SGR {:?} -> {:?}", &text[escape + 2..escape + length - 1], self.style);
                    position = escape + length;
                    literal_start = position;
                }
                SgrMatch::Incomplete => {
                    self.push_literal(&mut runs, &text[literal_start..escape]);
                    self.pending.push_str(&text[escape..]);
                    return runs;
                }
                SgrMatch::NotSgr => {
                    position = escape + 1;
                }
            }
        }

        self.push_literal(&mut runs, &text[literal_start..]);
        runs
    }

    /// Emits any held back tail as literal text.
    ///
    /// Called when the stream ends; an unterminated sequence can no longer
    /// complete.
    pub fn finish(&mut self) -> Option<StyledRun> {
        if self.pending.is_empty() {
            None
        } else {
            Some(StyledRun::new(std::mem::take(&mut self.pending), self.style))
        }
    }

    /// Scans a complete chunk starting from `style`.
    ///
    /// Returns the runs covering the whole chunk and the style to carry into
    /// the next call. An unterminated sequence at the end is emitted as text.
    pub fn scan_with(style: TextStyle, chunk: &str) -> (Vec<StyledRun>, TextStyle) {
        let mut scanner = SgrScanner::with_style(style);
        let mut runs = scanner.scan(chunk);
        runs.extend(scanner.finish());
        (runs, scanner.style)
    }

    fn push_literal(&self, runs: &mut Vec<StyledRun>, literal: &str) {
        if !literal.is_empty() {
            runs.push(StyledRun::new(literal, self.style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, coalesce_runs};

    fn red() -> TextStyle {
        TextStyle {
            foreground: Some(Color::Red),
            bold: false,
        }
    }

    #[test]
    fn plain_text_is_one_run() {
        let mut scanner = SgrScanner::new();
        assert_eq!(
            scanner.scan("hello"),
            vec![StyledRun::new("hello", TextStyle::default())]
        );
    }

    #[test]
    fn sequence_styles_following_text() {
        let mut scanner = SgrScanner::new();
        let runs = scanner.scan("a\x1b[31mb\x1b[0mc");
        assert_eq!(
            runs,
            vec![
                StyledRun::new("a", TextStyle::default()),
                StyledRun::new("b", red()),
                StyledRun::new("c", TextStyle::default()),
            ]
        );
    }

    #[test]
    fn codes_apply_in_order() {
        let mut scanner = SgrScanner::new();
        let runs = scanner.scan("\x1b[0;1;31;94mx");
        assert_eq!(
            runs,
            vec![StyledRun::new(
                "x",
                TextStyle {
                    foreground: Some(Color::BrightBlue),
                    bold: true
                }
            )]
        );
    }

    #[test]
    fn style_carries_across_chunks() {
        let mut scanner = SgrScanner::new();
        scanner.scan("\x1b[31m");
        assert_eq!(scanner.scan("next"), vec![StyledRun::new("next", red())]);
    }

    #[test]
    fn split_sequence_is_held_back() {
        let mut scanner = SgrScanner::new();
        assert_eq!(
            scanner.scan("ab\x1b[3"),
            vec![StyledRun::new("ab", TextStyle::default())]
        );
        assert_eq!(scanner.pending(), "\x1b[3");
        assert_eq!(scanner.scan("1mcd"), vec![StyledRun::new("cd", red())]);
        assert_eq!(scanner.pending(), "");
    }

    #[test]
    fn lone_escape_at_end_is_held_back() {
        let mut scanner = SgrScanner::new();
        assert!(scanner.scan("\x1b").is_empty());
        assert_eq!(scanner.scan("[31mz"), vec![StyledRun::new("z", red())]);
    }

    #[test]
    fn other_csi_sequences_pass_through() {
        let mut scanner = SgrScanner::new();
        let runs = scanner.scan("\x1b[2J\x1b[Hhome\x1b[m");
        assert_eq!(
            coalesce_runs(runs),
            vec![StyledRun::new("\x1b[2J\x1b[Hhome\x1b[m", TextStyle::default())]
        );
    }

    #[test]
    fn held_tail_that_is_not_sgr_becomes_text() {
        let mut scanner = SgrScanner::new();
        scanner.scan("\x1b[1");
        let runs = scanner.scan("0H!");
        assert_eq!(runs, vec![StyledRun::new("\x1b[10H!", TextStyle::default())]);
    }

    #[test]
    fn overlong_candidate_is_literal() {
        let long = format!("\x1b[{}m", "1".repeat(MAX_SEQUENCE_LENGTH));
        let mut scanner = SgrScanner::new();
        let runs = scanner.scan(&long);
        assert_eq!(coalesce_runs(runs), vec![StyledRun::new(long, TextStyle::default())]);
        assert!(scanner.pending().is_empty());
    }

    #[test]
    fn finish_flushes_pending_tail() {
        let mut scanner = SgrScanner::new();
        scanner.scan("\x1b[3");
        assert_eq!(
            scanner.finish(),
            Some(StyledRun::new("\x1b[3", TextStyle::default()))
        );
        assert_eq!(scanner.finish(), None);
    }

    #[test]
    fn scan_with_returns_carried_style() {
        let (runs, style) = SgrScanner::scan_with(red(), "x\x1b[1m");
        assert_eq!(runs, vec![StyledRun::new("x", red())]);
        assert_eq!(
            style,
            TextStyle {
                foreground: Some(Color::Red),
                bold: true
            }
        );
    }

    #[test]
    fn multibyte_text_around_sequences() {
        let mut scanner = SgrScanner::new();
        let runs = scanner.scan("é\x1b[32m→✓");
        assert_eq!(runs[0].text, "é");
        assert_eq!(runs[1].text, "→✓");
        assert_eq!(runs[1].style.foreground, Some(Color::Green));
    }
}
