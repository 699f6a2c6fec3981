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

//! Display and input boundaries of a session

use amlp_ansicodec::{StyledRun, TextStyle};

/// Echo behavior of the input surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EchoMode {
    /// Typed characters are shown
    #[default]
    Normal,
    /// Typed characters are not shown, for passwords
    Hidden,
}

/// Append-only styled text output.
pub trait DisplaySink {
    /// Appends `run` after all existing content.
    fn append(&mut self, run: &StyledRun);

    /// Makes the most recently appended text visible.
    fn scroll_to_end(&mut self);

    /// Visible `(columns, rows)`.
    fn geometry(&self) -> (u32, u32);
}

/// Line entry surface with switchable echo.
pub trait InputSink {
    /// Changes how typed characters are echoed.
    fn set_echo_mode(&mut self, mode: EchoMode);

    /// Current echo mode
    fn echo_mode(&self) -> EchoMode;
}

/// Display that keeps everything appended, for headless use and tests.
#[derive(Clone, Debug)]
pub struct MemoryDisplay {
    runs: Vec<StyledRun>,
    geometry: (u32, u32),
    scrolls: usize,
}

impl MemoryDisplay {
    /// Creates an empty display reporting `columns` by `rows`.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            runs: Vec::new(),
            geometry: (columns, rows),
            scrolls: 0,
        }
    }

    /// Runs appended so far
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// Plain text appended so far
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Text appended so far with each style change re-encoded as SGR.
    pub fn ansi_text(&self) -> String {
        let mut current = TextStyle::default();
        let mut out = String::new();
        for run in &self.runs {
            if run.style != current {
                out.push_str(&run.style.to_sgr());
                current = run.style;
            }
            out.push_str(&run.text);
        }
        if !current.is_default() {
            out.push_str(&TextStyle::default().to_sgr());
        }
        out
    }

    /// Number of scroll requests received
    pub fn scrolls(&self) -> usize {
        self.scrolls
    }
}

impl Default for MemoryDisplay {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl DisplaySink for MemoryDisplay {
    fn append(&mut self, run: &StyledRun) {
        self.runs.push(run.clone());
    }

    fn scroll_to_end(&mut self) {
        self.scrolls += 1;
    }

    fn geometry(&self) -> (u32, u32) {
        self.geometry
    }
}

/// Input surface that only records its echo mode.
#[derive(Clone, Debug, Default)]
pub struct MemoryInput {
    mode: EchoMode,
    changes: Vec<EchoMode>,
}

impl MemoryInput {
    /// Creates an input in normal echo mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Every mode passed to [`InputSink::set_echo_mode`], in order
    pub fn changes(&self) -> &[EchoMode] {
        &self.changes
    }
}

impl InputSink for MemoryInput {
    fn set_echo_mode(&mut self, mode: EchoMode) {
        self.mode = mode;
        self.changes.push(mode);
    }

    fn echo_mode(&self) -> EchoMode {
        self.mode
    }
}
