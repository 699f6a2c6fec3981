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

//! Per-connection session state

use crate::prompt::{PromptDetector, PromptSignal};
use crate::render::RunRenderer;
use crate::sink::{DisplaySink, EchoMode, InputSink};
use amlp_ansicodec::StyledRun;
use amlp_telnetcodec::{NawsNegotiator, TelnetFrame};
use tracing::{debug, info};

/// Connection lifecycle as seen by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected yet
    Connecting,
    /// Connected and active
    Connected,
    /// Connection ended
    Disconnected,
}

/// State of one connection, driven by the client loop.
///
/// Nothing here is shared: the loop that owns the socket owns the session.
#[derive(Debug)]
pub struct Session {
    state: ConnectionState,
    detector: PromptDetector,
    negotiator: NawsNegotiator,
    secure: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session that has not connected yet
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Connecting,
            detector: PromptDetector::new(),
            negotiator: NawsNegotiator::new(),
            secure: false,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns true while input is hidden because of a password prompt
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Reports the connection attempt.
    pub fn on_connecting<D: DisplaySink + ?Sized>(&mut self, display: &mut D, address: &str) {
        self.state = ConnectionState::Connecting;
        RunRenderer::status(display, &format!("Connecting to {}...", address));
    }

    /// Reports the connection and returns the window size frames to send.
    ///
    /// The size is `size` when given, otherwise the display geometry, and is
    /// only produced on the first call.
    pub fn on_connected<D: DisplaySink + ?Sized>(
        &mut self,
        display: &mut D,
        size: Option<(u16, u16)>,
    ) -> Option<[TelnetFrame; 2]> {
        self.state = ConnectionState::Connected;
        RunRenderer::status(display, "Connected!");
        let (cols, rows) = match size {
            Some((cols, rows)) => (u32::from(cols), u32::from(rows)),
            None => display.geometry(),
        };
        info!("Session connected, display is {}x{}", cols, rows);
        self.negotiator.on_connected(cols, rows)
    }

    /// Renders a decoded chunk and watches it for a password prompt.
    pub fn on_text<D, I>(&mut self, display: &mut D, input: &mut I, text: &str, runs: &[StyledRun])
    where
        D: DisplaySink + ?Sized,
        I: InputSink + ?Sized,
    {
        RunRenderer::render(display, runs);
        if let Some(PromptSignal::EnterSecureMode) = self.detector.detect(text) {
            self.secure = true;
            if input.echo_mode() != EchoMode::Hidden {
                debug!("Hiding input echo");
                input.set_echo_mode(EchoMode::Hidden);
            }
        }
    }

    /// Builds the frame for a submitted line.
    ///
    /// The line is terminated with CR LF. If the line answered a password
    /// prompt, echo is restored for the next one.
    pub fn on_submit<I: InputSink + ?Sized>(&mut self, input: &mut I, line: &str) -> TelnetFrame {
        let frame = TelnetFrame::line(line);
        if self.secure {
            self.secure = false;
            debug!("Restoring input echo");
            input.set_echo_mode(EchoMode::Normal);
        }
        frame
    }

    /// Reports the end of the connection and restores echo.
    pub fn on_disconnected<D, I>(&mut self, display: &mut D, input: &mut I)
    where
        D: DisplaySink + ?Sized,
        I: InputSink + ?Sized,
    {
        self.state = ConnectionState::Disconnected;
        if self.secure {
            self.secure = false;
            input.set_echo_mode(EchoMode::Normal);
        }
        RunRenderer::status(display, "Disconnected.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemoryDisplay, MemoryInput};
    use amlp_telnetcodec::{WindowSize, consts};
    use tracing_test::traced_test;

    #[test]
    fn connect_announces_display_geometry() {
        let mut session = Session::new();
        let mut display = MemoryDisplay::new(100, 30);
        let frames = session.on_connected(&mut display, None).unwrap();
        assert_eq!(frames[0], TelnetFrame::Will(consts::option::NAWS));
        assert_eq!(frames[1], TelnetFrame::Subnegotiate(WindowSize::new(100, 30)));
        assert_eq!(session.state(), ConnectionState::Connected);
        assert_eq!(display.text(), "Connected!\n");
    }

    #[test]
    fn connect_prefers_configured_size() {
        let mut session = Session::new();
        let mut display = MemoryDisplay::new(100, 30);
        let frames = session.on_connected(&mut display, Some((132, 50))).unwrap();
        assert_eq!(frames[1], TelnetFrame::Subnegotiate(WindowSize::new(132, 50)));
    }

    #[test]
    fn narrow_display_uses_fallback_width() {
        let mut session = Session::new();
        let mut display = MemoryDisplay::new(5, 0);
        let frames = session.on_connected(&mut display, None).unwrap();
        assert_eq!(frames[1], TelnetFrame::Subnegotiate(WindowSize::new(40, 1)));
    }

    #[test]
    fn window_size_is_announced_once() {
        let mut session = Session::new();
        let mut display = MemoryDisplay::default();
        assert!(session.on_connected(&mut display, None).is_some());
        assert!(session.on_connected(&mut display, None).is_none());
    }

    #[test]
    fn password_prompt_hides_then_restores_echo() {
        let mut session = Session::new();
        let mut display = MemoryDisplay::default();
        let mut input = MemoryInput::new();

        session.on_text(&mut display, &mut input, "Password: ", &[]);
        assert_eq!(input.echo_mode(), EchoMode::Hidden);
        session.on_text(&mut display, &mut input, "password: ", &[]);
        assert_eq!(input.changes(), &[EchoMode::Hidden]);

        let frame = session.on_submit(&mut input, "hunter2");
        match frame {
            TelnetFrame::Data(bytes) => assert_eq!(&bytes[..], b"hunter2\r\n"),
            other => panic!("unexpected frame {:?}", other),
        }
        assert_eq!(input.echo_mode(), EchoMode::Normal);

        session.on_submit(&mut input, "look");
        assert_eq!(input.changes(), &[EchoMode::Hidden, EchoMode::Normal]);
    }

    #[test]
    fn ordinary_text_leaves_echo_alone() {
        let mut session = Session::new();
        let mut display = MemoryDisplay::default();
        let mut input = MemoryInput::new();
        session.on_text(&mut display, &mut input, "By what name are you known? ", &[]);
        session.on_submit(&mut input, "Gandalf");
        assert!(input.changes().is_empty());
    }

    #[test]
    fn disconnect_restores_echo() {
        let mut session = Session::new();
        let mut display = MemoryDisplay::default();
        let mut input = MemoryInput::new();
        session.on_text(&mut display, &mut input, "Pass: ", &[]);
        session.on_disconnected(&mut display, &mut input);
        assert_eq!(input.echo_mode(), EchoMode::Normal);
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(display.text().ends_with("Disconnected.\n"));
    }

    #[test]
    #[traced_test]
    fn secure_mode_changes_are_logged() {
        let mut session = Session::new();
        let mut display = MemoryDisplay::default();
        let mut input = MemoryInput::new();
        session.on_text(&mut display, &mut input, "Password: ", &[]);
        assert!(logs_contain("Password prompt cue"));
        assert!(logs_contain("Hiding input echo"));
        session.on_submit(&mut input, "hunter2");
        assert!(logs_contain("Restoring input echo"));
    }
}
