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

//! Persistence through the JSON settings file

use amlp_directory::{CONNECTIONS_KEY, ConnectionDirectory, JsonFileStore, SettingsStore};
use std::fs;

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("settings.json"));
    assert!(store.get(CONNECTIONS_KEY).unwrap().is_empty());
    assert!(ConnectionDirectory::load(&store).unwrap().is_empty());
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("amlp").join("settings.json");
    let mut store = JsonFileStore::new(&path);
    let mut directory = ConnectionDirectory::new();
    directory.add("Dune", "mud.example.org", 6789).unwrap();
    directory.save(&mut store).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("Dune|mud.example.org|6789"));
    assert_eq!(ConnectionDirectory::load(&JsonFileStore::new(&path)).unwrap(), directory);
}

#[test]
fn other_keys_are_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "history": ["look", "north"] }"#).unwrap();
    let mut store = JsonFileStore::new(&path);
    ConnectionDirectory::new().save(&mut store).unwrap();
    assert_eq!(store.get("history").unwrap(), vec!["look".to_string(), "north".to_string()]);
}

#[test]
fn malformed_entries_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{ "connections": ["Dune|mud.example.org|6789", "broken", "Zero|host|0", "Realms|realmsofdespair.com|4000"] }"#,
    )
    .unwrap();
    let directory = ConnectionDirectory::load(&JsonFileStore::new(&path)).unwrap();
    assert_eq!(directory.len(), 2);
    assert_eq!(directory.get(1).unwrap().name(), "Realms");
}

#[test]
fn corrupt_file_is_a_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    let store = JsonFileStore::new(&path);
    assert!(matches!(
        ConnectionDirectory::load(&store),
        Err(amlp_directory::DirectoryError::Store(_))
    ));
}
