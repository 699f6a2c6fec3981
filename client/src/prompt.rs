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

//! Password prompt detection

use tracing::debug;

/// Text that marks a password prompt, compared without regard to case.
pub const PASSWORD_CUES: [&str; 2] = ["password:", "pass:"];

/// Raised when a chunk looks like a password prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptSignal {
    /// Typed input should stop being echoed
    EnterSecureMode,
}

/// Heuristic password prompt detector.
///
/// Each chunk is checked on its own, so a cue split across two reads is
/// missed, and a cue appearing in ordinary text is reported.
#[derive(Clone, Copy, Debug, Default)]
pub struct PromptDetector;

impl PromptDetector {
    /// Creates a detector for [`PASSWORD_CUES`].
    pub fn new() -> Self {
        Self
    }

    /// Signals at most once for `chunk`.
    pub fn detect(&self, chunk: &str) -> Option<PromptSignal> {
        let lowered = chunk.to_lowercase();
        let cue = PASSWORD_CUES.iter().find(|cue| lowered.contains(*cue))?;
        debug!("Password prompt cue {:?} detected", cue);
        Some(PromptSignal::EnterSecureMode)
    }
}
