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

//! Client error types

use amlp_ansicodec::AnsiCodecError;
use amlp_directory::DirectoryError;
use amlp_telnetcodec::TelnetCodecError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// I/O error from the socket or the console
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding the incoming stream
    #[error("Decode error: {0}")]
    Decode(#[from] AnsiCodecError),

    /// Error encoding an outgoing frame
    #[error("Encode error: {0}")]
    Encode(#[from] TelnetCodecError),

    /// Connection directory error
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Connecting took longer than the configured timeout
    #[error("Timed out connecting to {0}")]
    ConnectionTimeout(String),

    /// A directory target did not name a saved connection
    #[error("No saved connection matches {0:?}")]
    UnknownConnection(String),
}

impl ClientError {
    /// Check if the error came from the network connection
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            ClientError::Io(_)
                | ClientError::Decode(_)
                | ClientError::Encode(_)
                | ClientError::ConnectionTimeout(_)
        )
    }
}

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;
