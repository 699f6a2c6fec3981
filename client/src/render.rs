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

//! Styled run rendering

use crate::sink::DisplaySink;
use amlp_ansicodec::{StyledRun, TextStyle};

/// Writes styled runs to a [`DisplaySink`].
///
/// Runs are only ever appended; nothing already shown is touched.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunRenderer;

impl RunRenderer {
    /// Appends `runs` in order and scrolls to the end once.
    ///
    /// Empty runs are skipped. Returns how many runs were appended; nothing is
    /// scrolled when that is zero.
    pub fn render<D>(sink: &mut D, runs: &[StyledRun]) -> usize
    where
        D: DisplaySink + ?Sized,
    {
        let mut appended = 0;
        for run in runs.iter().filter(|run| !run.is_empty()) {
            sink.append(run);
            appended += 1;
        }
        if appended > 0 {
            sink.scroll_to_end();
        }
        appended
    }

    /// Appends a local status line such as `Connected!` in the default style.
    pub fn status<D>(sink: &mut D, text: &str)
    where
        D: DisplaySink + ?Sized,
    {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        sink.append(&StyledRun::new(line, TextStyle::default()));
        sink.scroll_to_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemoryDisplay;
    use amlp_ansicodec::Color;

    #[test]
    fn render_appends_in_order() {
        let mut display = MemoryDisplay::default();
        let bold = TextStyle {
            foreground: None,
            bold: true,
        };
        let runs = vec![
            StyledRun::new("a ", TextStyle::default()),
            StyledRun::new("", bold),
            StyledRun::new("b", bold),
        ];
        assert_eq!(RunRenderer::render(&mut display, &runs), 2);
        assert_eq!(display.text(), "a b");
        assert_eq!(display.runs()[1].style, bold);
        assert_eq!(display.scrolls(), 1);
    }

    #[test]
    fn empty_batch_does_not_scroll() {
        let mut display = MemoryDisplay::default();
        assert_eq!(RunRenderer::render(&mut display, &[]), 0);
        let red = TextStyle {
            foreground: Some(Color::Red),
            bold: false,
        };
        assert_eq!(RunRenderer::render(&mut display, &[StyledRun::new("", red)]), 0);
        assert_eq!(display.scrolls(), 0);
    }

    #[test]
    fn status_uses_default_style() {
        let mut display = MemoryDisplay::default();
        RunRenderer::status(&mut display, "Connected!");
        assert_eq!(display.text(), "Connected!\n");
        assert!(display.runs()[0].style.is_default());
        assert_eq!(display.scrolls(), 1);
    }
}
