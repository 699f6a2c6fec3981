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

//! `amlp` command line client

use amlp_client::{
    ClientConfig, ClientError, ConsoleDisplay, ConsoleInput, Result, TerminalClient,
};
use amlp_directory::{ConnectionDirectory, JsonFileStore};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Telnet/ANSI text session client
#[derive(Parser, Debug)]
#[command(name = "amlp")]
#[command(about = "Telnet/ANSI text session client with saved connections", long_about = None)]
#[command(version)]
struct Args {
    /// Settings file holding saved connections
    #[arg(long, value_name = "PATH", global = true)]
    store: Option<PathBuf>,

    /// Log filter written to stderr, e.g. `debug` (default: RUST_LOG or `warn`)
    #[arg(long, value_name = "FILTER", global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect to a saved connection, or to a host when a port is given
    Connect {
        /// Saved connection name or index, or a host name
        target: String,
        /// Port, when `target` is a host
        port: Option<u16>,
        /// Seconds to wait for the connection
        #[arg(long, default_value_t = 10)]
        timeout: u64,
        /// Report this window size instead of the terminal's, e.g. `100x40`
        #[arg(long, value_name = "COLSxROWS", value_parser = parse_size)]
        size: Option<(u16, u16)>,
    },
    /// List saved connections
    List,
    /// Save a new connection
    Add {
        /// Display name
        name: String,
        /// Host name or address
        host: String,
        /// Port
        port: i64,
    },
    /// Replace a saved connection
    Edit {
        /// Saved connection name or index
        target: String,
        /// Display name
        name: String,
        /// Host name or address
        host: String,
        /// Port
        port: i64,
    },
    /// Delete a saved connection
    Remove {
        /// Saved connection name or index
        target: String,
    },
    /// Move a saved connection up one place
    MoveUp {
        /// Saved connection name or index
        target: String,
    },
    /// Move a saved connection down one place
    MoveDown {
        /// Saved connection name or index
        target: String,
    },
    /// Append connections from a JSON file
    Import {
        /// JSON array of `{ "name", "ip", "port" }` objects
        file: PathBuf,
    },
    /// Write saved connections as JSON
    Export {
        /// Output file (default: stdout)
        file: Option<PathBuf>,
    },
}

fn parse_size(value: &str) -> std::result::Result<(u16, u16), String> {
    let (cols, rows) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected COLSxROWS, got {:?}", value))?;
    let cols = cols.trim().parse().map_err(|e| format!("columns: {}", e))?;
    let rows = rows.trim().parse().map_err(|e| format!("rows: {}", e))?;
    Ok((cols, rows))
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_store(path: Option<PathBuf>) -> Result<JsonFileStore> {
    match path {
        Some(path) => Ok(JsonFileStore::new(path)),
        None => Ok(JsonFileStore::open_default()?),
    }
}

fn resolve(directory: &ConnectionDirectory, target: &str) -> Result<usize> {
    directory
        .find(target)
        .ok_or_else(|| ClientError::UnknownConnection(target.to_string()))
}

/// Applies a directory command and returns the message to print.
///
/// Returns `None` for commands that do not touch the directory.
fn apply(directory: &mut ConnectionDirectory, command: &Command) -> Result<Option<String>> {
    let message = match command {
        Command::Connect { .. } | Command::List | Command::Export { .. } => return Ok(None),
        Command::Add { name, host, port } => {
            let index = directory.add(name, host, *port)?;
            format!("Added {}: {}", index, directory.menu_items()[index].label)
        }
        Command::Edit {
            target,
            name,
            host,
            port,
        } => {
            let index = resolve(directory, target)?;
            directory.edit(index, name, host, *port)?;
            format!("Updated {}: {}", index, directory.menu_items()[index].label)
        }
        Command::Remove { target } => {
            let index = resolve(directory, target)?;
            let record = directory.remove(index)?;
            format!("Removed {}", record)
        }
        Command::MoveUp { target } => {
            let index = resolve(directory, target)?;
            format!("Moved to {}", directory.move_up(index)?)
        }
        Command::MoveDown { target } => {
            let index = resolve(directory, target)?;
            format!("Moved to {}", directory.move_down(index)?)
        }
        Command::Import { file } => {
            let count = directory.import_from_reader(BufReader::new(File::open(file)?))?;
            format!("Imported {} connections", count)
        }
    };
    Ok(Some(message))
}

fn list(directory: &ConnectionDirectory) {
    if directory.is_empty() {
        println!("No saved connections");
    }
    for item in directory.menu_items() {
        println!("{:>3}  {}", item.index, item.label);
    }
}

async fn connect(config: ClientConfig) -> Result<()> {
    let client = TerminalClient::new(config);
    let (commands, mailbox) = client.mailbox();
    let mut display = ConsoleDisplay::new();
    let mut input = ConsoleInput::spawn(commands)?;
    let result = client.run(&mut display, &mut input, mailbox).await;
    input.shutdown();
    result
}

fn load(store: Option<PathBuf>) -> Result<(JsonFileStore, ConnectionDirectory)> {
    let store = open_store(store)?;
    let directory = ConnectionDirectory::load(&store)?;
    Ok((store, directory))
}

/// Resolves the address to connect to.
///
/// The saved connections are only read when no port is given.
fn connect_target(
    store: Option<PathBuf>,
    target: &str,
    port: Option<u16>,
) -> Result<(String, u16)> {
    match port {
        Some(port) => Ok((target.to_string(), port)),
        None => {
            let (_, directory) = load(store)?;
            let index = resolve(&directory, target)?;
            let item = &directory.menu_items()[index];
            Ok((item.host.clone(), item.port))
        }
    }
}

async fn execute(args: Args) -> Result<()> {
    match &args.command {
        Command::Connect {
            target,
            port,
            timeout,
            size,
        } => {
            let (host, port) = connect_target(args.store, target, *port)?;
            let mut config = ClientConfig::new(host, port)
                .with_connect_timeout(Duration::from_secs(*timeout));
            if let Some((cols, rows)) = size {
                config = config.with_terminal_size(*cols, *rows);
            }
            connect(config).await
        }
        Command::List => {
            let (_, directory) = load(args.store)?;
            list(&directory);
            Ok(())
        }
        Command::Export { file } => {
            let (_, directory) = load(args.store)?;
            match file {
                Some(path) => directory.export_to_writer(BufWriter::new(File::create(path)?))?,
                None => directory.export_to_writer(io::stdout().lock())?,
            }
            Ok(())
        }
        command => {
            let (mut store, mut directory) = load(args.store)?;
            if let Some(message) = apply(&mut directory, command)? {
                directory.save(&mut store)?;
                info!("Saved {} connections to {}", directory.len(), store.path().display());
                println!("{}", message);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log.as_deref());
    match execute(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("amlp: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConnectionDirectory {
        let mut directory = ConnectionDirectory::new();
        directory.add("Aardwolf", "aardmud.org", 23).unwrap();
        directory.add("Dune", "mud.example.org", 6789).unwrap();
        directory
    }

    #[test]
    fn parses_commands() {
        let args =
            Args::try_parse_from(["amlp", "--store", "s.json", "add", "Dune", "mud", "23"])
                .unwrap();
        assert_eq!(args.store, Some(PathBuf::from("s.json")));
        assert!(matches!(args.command, Command::Add { port: 23, .. }));

        let args =
            Args::try_parse_from(["amlp", "connect", "localhost", "4000", "--size", "100x40"])
                .unwrap();
        assert!(matches!(
            args.command,
            Command::Connect { port: Some(4000), size: Some((100, 40)), .. }
        ));
        assert!(Args::try_parse_from(["amlp", "move-up", "Dune"]).is_ok());
    }

    #[test]
    fn size_parser() {
        assert_eq!(parse_size("80x24"), Ok((80, 24)));
        assert_eq!(parse_size("132X50"), Ok((132, 50)));
        assert!(parse_size("80").is_err());
        assert!(parse_size("ax24").is_err());
    }

    #[test]
    fn apply_edits_by_name() {
        let mut directory = sample();
        let command = Command::Edit {
            target: "dune".into(),
            name: "Dune II".into(),
            host: "localhost".into(),
            port: 4000,
        };
        assert_eq!(
            apply(&mut directory, &command).unwrap().as_deref(),
            Some("Updated 1: Dune II (localhost:4000)")
        );
    }

    #[test]
    fn apply_rejects_unknown_target() {
        let mut directory = sample();
        let command = Command::Remove {
            target: "Nowhere".into(),
        };
        assert!(matches!(
            apply(&mut directory, &command),
            Err(ClientError::UnknownConnection(_))
        ));
        assert_eq!(directory, sample());
    }

    #[test]
    fn apply_moves_and_reports_position() {
        let mut directory = sample();
        let command = Command::MoveUp {
            target: "0".into(),
        };
        assert_eq!(
            apply(&mut directory, &command).unwrap().as_deref(),
            Some("Moved to 0")
        );
        assert_eq!(directory, sample());
    }

    #[test]
    fn apply_imports_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.json");
        std::fs::write(
            &path,
            r#"[{ "name": "Realms", "ip": "realmsofdespair.com", "port": 4000 }]"#,
        )
        .unwrap();
        let mut directory = sample();
        let command = Command::Import { file: path };
        assert_eq!(
            apply(&mut directory, &command).unwrap().as_deref(),
            Some("Imported 1 connections")
        );
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn direct_connect_skips_saved_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(
            connect_target(Some(path.clone()), "localhost", Some(4000)).unwrap(),
            ("localhost".to_string(), 4000)
        );
        assert!(matches!(
            connect_target(Some(path), "Dune", None),
            Err(ClientError::Directory(_))
        ));
    }

    #[test]
    fn saved_connect_resolves_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("settings.json"));
        sample().save(&mut store).unwrap();

        assert_eq!(
            connect_target(Some(store.path().to_path_buf()), "dune", None).unwrap(),
            ("mud.example.org".to_string(), 6789)
        );
    }
}
