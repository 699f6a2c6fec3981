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

//! Terminal console front end

use crate::client::ClientCommand;
use crate::sink::{DisplaySink, EchoMode, InputSink};
use crate::Result;
use amlp_ansicodec::{StyledRun, TextStyle};
use crossterm::cursor::MoveLeft;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color as TermColor, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Geometry reported when the terminal size is unavailable.
pub const FALLBACK_GEOMETRY: (u32, u32) = (80, 24);

/// How long the input thread waits for a key before checking for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Writes styled runs to standard output.
///
/// Colors are written as 24-bit values from the run's palette. Line feeds are
/// written as CR LF so output stays aligned while the terminal is in raw mode.
pub struct ConsoleDisplay {
    out: Stdout,
    style: Option<TextStyle>,
}

impl ConsoleDisplay {
    /// Creates a display on standard output
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            style: None,
        }
    }

    fn write_run(&mut self, run: &StyledRun) -> io::Result<()> {
        if self.style != Some(run.style) {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
            if let Some(color) = run.style.foreground {
                let (r, g, b) = color.rgb();
                queue!(self.out, SetForegroundColor(TermColor::Rgb { r, g, b }))?;
            }
            if run.style.bold {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            self.style = Some(run.style);
        }
        let text = run.text.replace('\r', "").replace('\n', "\r\n");
        queue!(self.out, Print(text))
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for ConsoleDisplay {
    fn append(&mut self, run: &StyledRun) {
        if let Err(e) = self.write_run(run) {
            warn!("Failed to write to console: {}", e);
        }
    }

    fn scroll_to_end(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!("Failed to flush console: {}", e);
        }
    }

    fn geometry(&self) -> (u32, u32) {
        match terminal::size() {
            Ok((cols, rows)) => (u32::from(cols), u32::from(rows)),
            Err(e) => {
                debug!("Terminal size unavailable: {}", e);
                FALLBACK_GEOMETRY
            }
        }
    }
}

impl Drop for ConsoleDisplay {
    fn drop(&mut self) {
        let _ = execute!(self.out, SetAttribute(Attribute::Reset));
    }
}

/// Result of feeding one key to a [`LineEditor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditAction {
    /// Nothing to show
    Nothing,
    /// Show these characters
    Echo(String),
    /// Erase this many characters before the cursor
    Erase(usize),
    /// The line is complete
    Submit(String),
    /// The user asked to leave
    Disconnect,
}

/// Single line editor driven by key events.
///
/// In [`EchoMode::Hidden`] the line is still collected but nothing is echoed
/// or erased on screen.
#[derive(Clone, Debug, Default)]
pub struct LineEditor {
    buffer: String,
    mode: EchoMode,
}

impl LineEditor {
    /// Creates an empty editor in normal echo mode
    pub fn new() -> Self {
        Self::default()
    }

    /// The line typed so far
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current echo mode
    pub fn echo_mode(&self) -> EchoMode {
        self.mode
    }

    /// Changes the echo mode for subsequent keys
    pub fn set_echo_mode(&mut self, mode: EchoMode) {
        self.mode = mode;
    }

    fn visible(&self, action: EditAction) -> EditAction {
        match self.mode {
            EchoMode::Normal => action,
            EchoMode::Hidden => EditAction::Nothing,
        }
    }

    /// Applies one key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditAction {
        if key.kind == KeyEventKind::Release {
            return EditAction::Nothing;
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if control => EditAction::Disconnect,
            KeyCode::Char('d') if control && self.buffer.is_empty() => EditAction::Disconnect,
            KeyCode::Char('u') if control => {
                let erased = self.buffer.chars().count();
                self.buffer.clear();
                if erased == 0 {
                    EditAction::Nothing
                } else {
                    self.visible(EditAction::Erase(erased))
                }
            }
            KeyCode::Char(_) if control => EditAction::Nothing,
            KeyCode::Char(ch) => {
                self.buffer.push(ch);
                self.visible(EditAction::Echo(ch.to_string()))
            }
            KeyCode::Backspace => match self.buffer.pop() {
                Some(_) => self.visible(EditAction::Erase(1)),
                None => EditAction::Nothing,
            },
            KeyCode::Enter => EditAction::Submit(std::mem::take(&mut self.buffer)),
            _ => EditAction::Nothing,
        }
    }
}

/// Keyboard input read on a dedicated thread with the terminal in raw mode.
///
/// Submitted lines are posted to the client mailbox. Raw mode is left when
/// the input is shut down or dropped.
pub struct ConsoleInput {
    hidden: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl ConsoleInput {
    /// Enters raw mode and starts reading keys.
    pub fn spawn(commands: mpsc::Sender<ClientCommand>) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let hidden = Arc::new(AtomicBool::new(false));
        let stop = Arc::new(AtomicBool::new(false));
        let thread = std::thread::Builder::new().name("amlp-input".into()).spawn({
            let hidden = hidden.clone();
            let stop = stop.clone();
            move || {
                if let Err(e) = read_keys(&commands, &hidden, &stop) {
                    warn!("Console input failed: {}", e);
                }
                let _ = commands.blocking_send(ClientCommand::Disconnect);
            }
        });
        let thread = match thread {
            Ok(thread) => thread,
            Err(e) => {
                let _ = terminal::disable_raw_mode();
                return Err(e.into());
            }
        };
        Ok(Self {
            hidden,
            stop,
            thread: Some(thread),
        })
    }

    /// Stops the input thread and leaves raw mode.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Console input thread panicked");
            }
            if let Err(e) = terminal::disable_raw_mode() {
                warn!("Failed to leave raw mode: {}", e);
            }
        }
    }
}

impl InputSink for ConsoleInput {
    fn set_echo_mode(&mut self, mode: EchoMode) {
        self.hidden.store(mode == EchoMode::Hidden, Ordering::Release);
    }

    fn echo_mode(&self) -> EchoMode {
        if self.hidden.load(Ordering::Acquire) {
            EchoMode::Hidden
        } else {
            EchoMode::Normal
        }
    }
}

impl Drop for ConsoleInput {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn read_keys(
    commands: &mpsc::Sender<ClientCommand>,
    hidden: &AtomicBool,
    stop: &AtomicBool,
) -> io::Result<()> {
    let mut editor = LineEditor::new();
    let mut out = io::stdout();
    while !stop.load(Ordering::Acquire) {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        editor.set_echo_mode(if hidden.load(Ordering::Acquire) {
            EchoMode::Hidden
        } else {
            EchoMode::Normal
        });
        match editor.handle_key(key) {
            EditAction::Nothing => {}
            EditAction::Echo(text) => execute!(out, Print(text))?,
            EditAction::Erase(count) => {
                let count = u16::try_from(count).unwrap_or(u16::MAX);
                execute!(out, MoveLeft(count), Clear(ClearType::UntilNewLine))?;
            }
            EditAction::Submit(line) => {
                execute!(out, Print("\r\n"))?;
                if commands.blocking_send(ClientCommand::SendLine(line)).is_err() {
                    debug!("Client mailbox closed");
                    return Ok(());
                }
            }
            EditAction::Disconnect => {
                debug!("Disconnect requested from keyboard");
                return Ok(());
            }
        }
    }
    Ok(())
}
