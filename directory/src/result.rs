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

use thiserror::Error;

/// Reasons a connection record is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Display name was empty after trimming
    #[error("Connection name must not be empty")]
    EmptyName,
    /// Host was empty after trimming
    #[error("Host must not be empty")]
    EmptyHost,
    /// Port outside `1..=65535`
    #[error("Port {0} is outside 1..=65535")]
    PortOutOfRange(i64),
}

/// Connection directory error type
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A record failed validation; nothing was changed
    #[error("Invalid connection: {0}")]
    Validation(#[from] ValidationError),
    /// An index did not name a record; nothing was changed
    #[error("Index {index} is out of bounds for {len} connections")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Directory length at the time
        len: usize,
    },
    /// Import data or a stored entry could not be parsed
    #[error("Format error: {0}")]
    Format(String),
    /// The settings store could not be read or written
    #[error("Settings store error: {0}")]
    Store(String),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DirectoryError {
    /// Returns true if the error left the directory untouched because of bad
    /// user input rather than a storage failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DirectoryError::Validation(_) | DirectoryError::IndexOutOfBounds { .. }
        )
    }
}

/// Connection directory result type
pub type DirectoryResult<T> = Result<T, DirectoryError>;
