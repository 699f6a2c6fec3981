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

use crate::{DirectoryError, DirectoryResult};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Name of the application directory under the platform config directory.
pub const APPLICATION_DIRECTORY: &str = "amlp";

/// File name of the default settings file.
pub const SETTINGS_FILE: &str = "settings.json";

/// Key-value store holding lists of strings.
///
/// The directory only ever sees strings; how they are kept between runs is up
/// to the implementation.
pub trait SettingsStore {
    /// Reads the list stored under `key`; a missing key reads as empty.
    fn get(&self, key: &str) -> DirectoryResult<Vec<String>>;

    /// Replaces the list stored under `key`.
    fn set(&mut self, key: &str, values: Vec<String>) -> DirectoryResult<()>;
}

/// In-memory store, lost when dropped.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, Vec<String>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> DirectoryResult<Vec<String>> {
        Ok(self.values.get(key).cloned().unwrap_or_default())
    }

    fn set(&mut self, key: &str, values: Vec<String>) -> DirectoryResult<()> {
        self.values.insert(key.to_string(), values);
        Ok(())
    }
}

/// Store backed by a JSON object of string arrays on disk.
///
/// ```json
/// {
///   "connections": ["Dune|mud.example.org|6789"]
/// }
/// ```
///
/// A missing file reads as an empty store. Writes replace the file through a
/// sibling temporary file and a rename.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at `path`. Nothing is read until the first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/amlp/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APPLICATION_DIRECTORY).join(SETTINGS_FILE))
    }

    /// Opens the store at [`JsonFileStore::default_path`].
    pub fn open_default() -> DirectoryResult<Self> {
        Self::default_path()
            .map(Self::new)
            .ok_or_else(|| DirectoryError::Store("no configuration directory available".into()))
    }

    /// Location of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> DirectoryResult<BTreeMap<String, Vec<String>>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("Settings file {} not found", self.path.display());
                return Ok(BTreeMap::new());
            }
            Err(error) => return Err(error.into()),
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|error| {
            DirectoryError::Store(format!("{}: {}", self.path.display(), error))
        })
    }

    fn write_all(&self, values: &BTreeMap<String, Vec<String>>) -> DirectoryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(values)
            .map_err(|error| DirectoryError::Store(error.to_string()))?;
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn get(&self, key: &str) -> DirectoryResult<Vec<String>> {
        Ok(self.read_all()?.remove(key).unwrap_or_default())
    }

    #[instrument(skip(self, values), fields(path = %self.path.display(), count = values.len()))]
    fn set(&mut self, key: &str, values: Vec<String>) -> DirectoryResult<()> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), values);
        self.write_all(&all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_missing_key_is_empty() {
        let store = MemoryStore::new();
        assert!(store.get("connections").unwrap().is_empty());
    }

    #[test]
    fn memory_store_replaces_values() {
        let mut store = MemoryStore::new();
        store.set("connections", vec!["a|b|1".into()]).unwrap();
        store.set("connections", vec!["c|d|2".into()]).unwrap();
        assert_eq!(store.get("connections").unwrap(), vec!["c|d|2".to_string()]);
    }

    #[test]
    fn default_path_ends_with_settings_file() {
        if let Some(path) = JsonFileStore::default_path() {
            assert!(path.ends_with(Path::new(APPLICATION_DIRECTORY).join(SETTINGS_FILE)));
        }
    }
}
