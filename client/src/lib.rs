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

//! # AMLP Client
//!
//! Console client for line-oriented Telnet text servers such as MUDs.
//!
//! Incoming bytes pass through [`TelnetCodec`](amlp_telnetcodec::TelnetCodec)
//! and [`AnsiCodec`](amlp_ansicodec::AnsiCodec) into styled runs that a
//! [`Session`] renders on a [`DisplaySink`]. On connect the session announces
//! the display size with Telnet NAWS. A password prompt hides typed input on
//! the [`InputSink`] until the next line is submitted.
//!
//! ## Quick Start
//!
//! ```no_run
//! use amlp_client::{ClientCommand, ClientConfig, MemoryDisplay, MemoryInput, TerminalClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TerminalClient::new(ClientConfig::new("localhost", 4000));
//!     let (commands, mailbox) = client.mailbox();
//!     commands.send(ClientCommand::SendLine("look".into())).await?;
//!
//!     let mut display = MemoryDisplay::default();
//!     let mut input = MemoryInput::new();
//!     client.run(&mut display, &mut input, mailbox).await?;
//!     print!("{}", display.text());
//!     Ok(())
//! }
//! ```

#![warn(future_incompatible, rust_2018_idioms)]

mod client;
mod config;
mod console;
mod error;
mod prompt;
mod render;
mod session;
mod sink;

pub use client::{ClientCommand, TerminalClient};
pub use config::ClientConfig;
pub use console::{ConsoleDisplay, ConsoleInput, EditAction, FALLBACK_GEOMETRY, LineEditor};
pub use error::{ClientError, Result};
pub use prompt::{PASSWORD_CUES, PromptDetector, PromptSignal};
pub use render::RunRenderer;
pub use session::{ConnectionState, Session};
pub use sink::{DisplaySink, EchoMode, InputSink, MemoryDisplay, MemoryInput};
