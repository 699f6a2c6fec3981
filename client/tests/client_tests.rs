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

//! Client loop against a loopback server

use amlp_client::{
    ClientCommand, ClientConfig, ClientError, EchoMode, InputSink, MemoryDisplay, MemoryInput,
    TerminalClient,
};
use amlp_ansicodec::Color;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

const NAWS_80X24: [u8; 12] = [255, 251, 31, 255, 250, 31, 0, 80, 0, 24, 255, 240];

async fn listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// Records echo changes and answers the first password prompt.
struct AnsweringInput {
    inner: MemoryInput,
    answer: Option<(mpsc::Sender<ClientCommand>, String)>,
}

impl InputSink for AnsweringInput {
    fn set_echo_mode(&mut self, mode: EchoMode) {
        self.inner.set_echo_mode(mode);
        if mode == EchoMode::Hidden {
            if let Some((commands, line)) = self.answer.take() {
                commands.try_send(ClientCommand::SendLine(line)).unwrap();
            }
        }
    }

    fn echo_mode(&self) -> EchoMode {
        self.inner.echo_mode()
    }
}

#[tokio::test]
async fn session_over_loopback() {
    let (listener, port) = listener().await;
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut announcement = [0u8; 12];
        socket.read_exact(&mut announcement).await.unwrap();
        socket
            .write_all(b"\x1b[1;32mWelcome\x1b[0m\r\nPassword: ")
            .await
            .unwrap();
        let mut line = [0u8; 9];
        socket.read_exact(&mut line).await.unwrap();
        socket.write_all(b"\r\nWrong password.\r\nPassword: ").await.unwrap();
        (announcement, line)
    });

    let config = ClientConfig::new("127.0.0.1", port).with_terminal_size(80, 24);
    let client = TerminalClient::new(config);
    let (commands, mailbox) = client.mailbox();
    let mut display = MemoryDisplay::default();
    let mut input = AnsweringInput {
        inner: MemoryInput::new(),
        answer: Some((commands.clone(), "hunter2".into())),
    };
    client.run(&mut display, &mut input, mailbox).await.unwrap();

    let (announcement, line) = server.await.unwrap();
    assert_eq!(announcement, NAWS_80X24);
    assert_eq!(&line, b"hunter2\r\n");

    let text = display.text();
    assert!(text.starts_with(&format!("Connecting to 127.0.0.1:{}...\nConnected!\n", port)));
    assert!(text.contains("Welcome\r\nPassword: "));
    assert!(text.contains("Wrong password."));
    assert!(text.ends_with("Disconnected.\n"));
    let welcome = display
        .runs()
        .iter()
        .find(|run| run.text == "Welcome")
        .unwrap();
    assert_eq!(welcome.style.foreground, Some(Color::Green));
    assert!(welcome.style.bold);

    // Submitting restores echo before the second prompt hides it again.
    assert_eq!(
        input.inner.changes(),
        &[
            EchoMode::Hidden,
            EchoMode::Normal,
            EchoMode::Hidden,
            EchoMode::Normal
        ]
    );
    assert_eq!(input.echo_mode(), EchoMode::Normal);
    drop(commands);
}

#[tokio::test]
async fn display_geometry_is_announced() {
    let (listener, port) = listener().await;
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        socket.read_to_end(&mut received).await.unwrap();
        received
    });

    let client = TerminalClient::new(ClientConfig::new("127.0.0.1", port));
    let (commands, mailbox) = client.mailbox();
    commands.send(ClientCommand::Disconnect).await.unwrap();
    let mut display = MemoryDisplay::new(255, 10);
    let mut input = MemoryInput::new();
    client.run(&mut display, &mut input, mailbox).await.unwrap();

    let received = server.await.unwrap();
    assert_eq!(
        received,
        vec![255, 251, 31, 255, 250, 31, 0, 255, 255, 0, 10, 255, 240]
    );
}

#[tokio::test]
async fn dropped_mailbox_closes_connection() {
    let (listener, port) = listener().await;
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        socket.read_to_end(&mut received).await.unwrap();
        received.len()
    });

    let client = TerminalClient::new(ClientConfig::new("127.0.0.1", port));
    let (commands, mailbox) = client.mailbox();
    drop(commands);
    let mut display = MemoryDisplay::default();
    let mut input = MemoryInput::new();
    client.run(&mut display, &mut input, mailbox).await.unwrap();
    assert_eq!(server.await.unwrap(), NAWS_80X24.len());
}

#[tokio::test]
async fn refused_connection_is_reported() {
    let (listener, port) = listener().await;
    drop(listener);

    let client = TerminalClient::new(ClientConfig::new("127.0.0.1", port));
    let (_commands, mailbox) = client.mailbox();
    let mut display = MemoryDisplay::default();
    let mut input = MemoryInput::new();
    let error = client
        .run(&mut display, &mut input, mailbox)
        .await
        .unwrap_err();
    assert!(matches!(error, ClientError::Io(_)));
    assert!(error.is_connection_error());
    assert!(!display.text().contains("Connected!"));
}
