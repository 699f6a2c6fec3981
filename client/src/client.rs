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

//! Connection event loop

use crate::session::Session;
use crate::sink::{DisplaySink, InputSink};
use crate::{ClientConfig, ClientError, Result};
use amlp_ansicodec::{AnsiCodec, AnsiEvent};
use amlp_telnetcodec::TelnetCodec;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, instrument};

/// Commands accepted by a running client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Send a submitted line; CR LF is appended
    SendLine(String),
    /// Close the connection
    Disconnect,
}

/// Telnet client driving one session at a time.
///
/// The socket, the codec state and the [`Session`] all live in
/// [`TerminalClient::run`]; other tasks talk to it through the command
/// mailbox.
#[derive(Debug, Clone)]
pub struct TerminalClient {
    config: ClientConfig,
}

impl TerminalClient {
    /// Creates a client for `config`
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Creates a command mailbox sized by the configuration.
    pub fn mailbox(&self) -> (mpsc::Sender<ClientCommand>, mpsc::Receiver<ClientCommand>) {
        mpsc::channel(self.config.mailbox_size)
    }

    /// Connects and runs the session until either side closes it.
    ///
    /// Returns `Ok(())` when the server closes the connection, when
    /// [`ClientCommand::Disconnect`] is received or when every mailbox sender
    /// is dropped.
    #[instrument(skip_all, fields(address = %self.config.address()))]
    pub async fn run<D, I>(
        &self,
        display: &mut D,
        input: &mut I,
        mut mailbox: mpsc::Receiver<ClientCommand>,
    ) -> Result<()>
    where
        D: DisplaySink + ?Sized,
        I: InputSink + ?Sized,
    {
        let address = self.config.address();
        let mut session = Session::new();
        session.on_connecting(display, &address);

        let stream = match timeout(self.config.connect_timeout, TcpStream::connect(&address)).await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(ClientError::ConnectionTimeout(address)),
        };
        info!("Connected to {}", stream.peer_addr()?);

        let (read_half, write_half) = stream.into_split();
        let mut reader = FramedRead::with_capacity(
            read_half,
            AnsiCodec::new(TelnetCodec::new()),
            self.config.read_buffer,
        );
        let mut writer = FramedWrite::new(write_half, TelnetCodec::new());

        if let Some(frames) = session.on_connected(display, self.config.terminal_size) {
            for frame in frames {
                writer.feed(frame).await?;
            }
            writer.flush().await?;
        }

        let result = loop {
            select! {
                event = reader.next() => {
                    match event {
                        Some(Ok(AnsiEvent::Text { text, runs })) => {
                            session.on_text(display, input, &text, &runs);
                        }
                        Some(Ok(AnsiEvent::Telnet(event))) => {
                            debug!("Ignoring Telnet event {:?}", event);
                        }
                        Some(Err(e)) => break Err(ClientError::from(e)),
                        None => {
                            info!("Server closed connection");
                            break Ok(());
                        }
                    }
                }
                command = mailbox.recv() => {
                    match command {
                        Some(ClientCommand::SendLine(line)) => {
                            let frame = session.on_submit(input, &line);
                            if let Err(e) = writer.send(frame).await {
                                break Err(ClientError::from(e));
                            }
                        }
                        Some(ClientCommand::Disconnect) | None => {
                            info!("Closing connection");
                            break Ok(());
                        }
                    }
                }
            }
        };

        session.on_disconnected(display, input);
        result
    }
}
