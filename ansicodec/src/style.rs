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

//! Text style state mutated by SGR codes.

use std::fmt::Write;

/// Foreground used for unstyled text, as `(r, g, b)`.
pub const DEFAULT_FOREGROUND: (u8, u8, u8) = (0xFF, 0xFF, 0xFF);

/// The sixteen foreground colors selectable with SGR `30..=37` and `90..=97`.
///
/// The bright variants are a lighter shade of the same hue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Black - Color #0 (FG `30`).
    Black,
    /// Red - Color #1 (FG `31`).
    Red,
    /// Green - Color #2 (FG `32`).
    Green,
    /// Yellow - Color #3 (FG `33`).
    Yellow,
    /// Blue - Color #4 (FG `34`).
    Blue,
    /// Magenta - Color #5 (FG `35`).
    Magenta,
    /// Cyan - Color #6 (FG `36`).
    Cyan,
    /// White - Color #7 (FG `37`).
    White,

    /// Black - Color #0 (FG `90`), usually rendered gray.
    BrightBlack,
    /// Red - Color #1 (FG `91`).
    BrightRed,
    /// Green - Color #2 (FG `92`).
    BrightGreen,
    /// Yellow - Color #3 (FG `93`).
    BrightYellow,
    /// Blue - Color #4 (FG `94`).
    BrightBlue,
    /// Magenta - Color #5 (FG `95`).
    BrightMagenta,
    /// Cyan - Color #6 (FG `96`).
    BrightCyan,
    /// White - Color #7 (FG `97`).
    BrightWhite,
}

impl Color {
    const PALETTE: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    const BRIGHT_PALETTE: [Color; 8] = [
        Color::BrightBlack,
        Color::BrightRed,
        Color::BrightGreen,
        Color::BrightYellow,
        Color::BrightBlue,
        Color::BrightMagenta,
        Color::BrightCyan,
        Color::BrightWhite,
    ];

    /// Maps an SGR foreground code to a color.
    ///
    /// Returns `None` for anything outside `30..=37` and `90..=97`.
    pub fn from_sgr(code: u32) -> Option<Color> {
        match code {
            30..=37 => Some(Self::PALETTE[(code - 30) as usize]),
            90..=97 => Some(Self::BRIGHT_PALETTE[(code - 90) as usize]),
            _ => None,
        }
    }

    /// The SGR foreground code selecting this color.
    pub fn sgr_code(self) -> u8 {
        match self {
            Color::Black => 30,
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
            Color::White => 37,
            Color::BrightBlack => 90,
            Color::BrightRed => 91,
            Color::BrightGreen => 92,
            Color::BrightYellow => 93,
            Color::BrightBlue => 94,
            Color::BrightMagenta => 95,
            Color::BrightCyan => 96,
            Color::BrightWhite => 97,
        }
    }

    /// Whether this is one of the `90..=97` variants.
    pub fn is_bright(self) -> bool {
        self.sgr_code() >= 90
    }

    /// Display value as `(r, g, b)`.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Black => (0x00, 0x00, 0x00),
            Color::Red => (0xB2, 0x18, 0x18),
            Color::Green => (0x1F, 0xB8, 0x39),
            Color::Yellow => (0xD0, 0xA8, 0x00),
            Color::Blue => (0x1F, 0x4F, 0xB8),
            Color::Magenta => (0xB0, 0x30, 0xB0),
            Color::Cyan => (0x18, 0xB0, 0xB8),
            Color::White => (0xE0, 0xE0, 0xE0),
            Color::BrightBlack => (0x55, 0x55, 0x55),
            Color::BrightRed => (0xFF, 0x6E, 0x6E),
            Color::BrightGreen => (0x6E, 0xFC, 0x6E),
            Color::BrightYellow => (0xFF, 0xD8, 0x6E),
            Color::BrightBlue => (0x6E, 0xA6, 0xFF),
            Color::BrightMagenta => (0xFF, 0x6E, 0xFF),
            Color::BrightCyan => (0x6E, 0xF6, 0xFF),
            Color::BrightWhite => (0xFF, 0xFF, 0xFF),
        }
    }
}

/// The style in effect for a span of text.
///
/// `Default` is the reset state: no foreground and normal weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextStyle {
    /// Foreground color, `None` for the display default
    pub foreground: Option<Color>,
    /// Bold weight
    pub bold: bool,
}

impl TextStyle {
    /// Applies a single SGR code.
    ///
    /// `0` resets, `1` sets bold, `30..=37`/`90..=97` select a foreground.
    /// Every other code is ignored.
    pub fn apply(&mut self, code: u32) {
        match code {
            0 => *self = TextStyle::default(),
            1 => self.bold = true,
            _ => {
                if let Some(color) = Color::from_sgr(code) {
                    self.foreground = Some(color);
                }
            }
        }
    }

    /// Applies the codes of an SGR parameter string such as `1;31`, left to right.
    ///
    /// An empty parameter counts as `0`. A parameter too large for `u32` is ignored.
    pub fn apply_parameters(&mut self, parameters: &str) {
        for part in parameters.split(';') {
            if part.is_empty() {
                self.apply(0);
            } else if let Ok(code) = part.parse::<u32>() {
                self.apply(code);
            }
        }
    }

    /// Whether this is the reset state.
    pub fn is_default(&self) -> bool {
        *self == TextStyle::default()
    }

    /// Foreground as `(r, g, b)`, falling back to [`DEFAULT_FOREGROUND`].
    pub fn foreground_rgb(&self) -> (u8, u8, u8) {
        self.foreground.map_or(DEFAULT_FOREGROUND, Color::rgb)
    }

    /// Encodes this style as a self-contained SGR sequence.
    ///
    /// The sequence always starts from a reset, so it can be emitted without
    /// knowing the previous style.
    pub fn to_sgr(&self) -> String {
        let mut sgr = String::from("\x1b[0");
        if self.bold {
            sgr.push_str(";1");
        }
        if let Some(color) = self.foreground {
            let _ = write!(sgr, ";{}", color.sgr_code());
        }
        sgr.push('m');
        sgr
    }
}

/// A span of literal text and the style it was received with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledRun {
    /// Literal text with escape sequences removed
    pub text: String,
    /// Style snapshot at emission time
    pub style: TextStyle,
}

impl StyledRun {
    /// Creates a run.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Whether the run carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Merges adjacent runs that share a style and drops empty runs.
///
/// Chunk boundaries split text into more runs than a single read would; the
/// coalesced form is identical either way.
pub fn coalesce_runs<I>(runs: I) -> Vec<StyledRun>
where
    I: IntoIterator<Item = StyledRun>,
{
    let mut merged: Vec<StyledRun> = Vec::new();
    for run in runs {
        if run.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.style == run.style => last.text.push_str(&run.text),
            _ => merged.push(run),
        }
    }
    merged
}
