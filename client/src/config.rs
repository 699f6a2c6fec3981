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

//! Client configuration

use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server hostname or IP address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Initial capacity of the socket read buffer
    pub read_buffer: usize,

    /// Window size to report instead of the display geometry
    pub terminal_size: Option<(u16, u16)>,

    /// Capacity of the command mailbox
    pub mailbox_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 23,
            connect_timeout: Duration::from_secs(10),
            read_buffer: 8192,
            terminal_size: None,
            mailbox_size: 64,
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the initial read buffer capacity
    pub fn with_read_buffer(mut self, capacity: usize) -> Self {
        self.read_buffer = capacity;
        self
    }

    /// Report a fixed terminal size instead of asking the display
    pub fn with_terminal_size(mut self, width: u16, height: u16) -> Self {
        self.terminal_size = Some((width, height));
        self
    }

    /// Set the command mailbox capacity
    pub fn with_mailbox_size(mut self, size: usize) -> Self {
        self.mailbox_size = size.max(1);
        self
    }

    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = ClientConfig::new("mud.example.org", 6789)
            .with_connect_timeout(Duration::from_secs(3))
            .with_read_buffer(1024)
            .with_terminal_size(132, 50)
            .with_mailbox_size(0);
        assert_eq!(config.address(), "mud.example.org:6789");
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.read_buffer, 1024);
        assert_eq!(config.terminal_size, Some((132, 50)));
        assert_eq!(config.mailbox_size, 1);
    }
}
