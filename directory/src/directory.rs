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

use crate::record::RawRecord;
use crate::{ConnectionRecord, DirectoryError, DirectoryResult, SettingsStore};
use serde_json::Value;
use std::io::{Read, Write};
use tracing::{debug, info, instrument, warn};

/// Settings key the directory is persisted under.
pub const CONNECTIONS_KEY: &str = "connections";

/// One entry of the connection menu, derived from the directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    /// Position in the directory
    pub index: usize,
    /// `name (host:port)`
    pub label: String,
    /// Host to connect to
    pub host: String,
    /// Port to connect to
    pub port: u16,
}

/// Ordered list of saved endpoints.
///
/// Records are identified by position and duplicates are allowed. Every
/// mutating operation either succeeds completely or leaves the list as it
/// was.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionDirectory {
    records: Vec<ConnectionRecord>,
}

impl ConnectionDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding `records` in order.
    pub fn from_records(records: Vec<ConnectionRecord>) -> Self {
        Self { records }
    }

    /// Records in menu order
    pub fn records(&self) -> &[ConnectionRecord] {
        &self.records
    }

    /// Record at `index`
    pub fn get(&self, index: usize) -> Option<&ConnectionRecord> {
        self.records.get(index)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn check_index(&self, index: usize) -> DirectoryResult<()> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(DirectoryError::IndexOutOfBounds {
                index,
                len: self.records.len(),
            })
        }
    }

    /// Validates and appends a record, returning its index.
    pub fn add(&mut self, name: &str, host: &str, port: i64) -> DirectoryResult<usize> {
        let record = ConnectionRecord::new(name, host, port)?;
        debug!("Adding connection {}", record);
        self.records.push(record);
        Ok(self.records.len() - 1)
    }

    /// Validates and replaces the record at `index` in place.
    pub fn edit(&mut self, index: usize, name: &str, host: &str, port: i64) -> DirectoryResult<()> {
        self.check_index(index)?;
        let record = ConnectionRecord::new(name, host, port)?;
        debug!("Replacing connection {} with {}", self.records[index], record);
        self.records[index] = record;
        Ok(())
    }

    /// Removes and returns the record at `index`; later records shift up.
    pub fn remove(&mut self, index: usize) -> DirectoryResult<ConnectionRecord> {
        self.check_index(index)?;
        Ok(self.records.remove(index))
    }

    /// Swaps the record at `index` with the one above it.
    ///
    /// Returns the record's new index. The first record stays where it is.
    pub fn move_up(&mut self, index: usize) -> DirectoryResult<usize> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(index);
        }
        self.records.swap(index, index - 1);
        Ok(index - 1)
    }

    /// Swaps the record at `index` with the one below it.
    ///
    /// Returns the record's new index. The last record stays where it is.
    pub fn move_down(&mut self, index: usize) -> DirectoryResult<usize> {
        self.check_index(index)?;
        if index + 1 == self.records.len() {
            return Ok(index);
        }
        self.records.swap(index, index + 1);
        Ok(index + 1)
    }

    /// Appends the valid records of a JSON array, returning how many were
    /// added.
    ///
    /// Elements that are not objects, lack a field, have a field of the wrong
    /// type or fail validation are skipped. A document that does not parse or
    /// whose top level is not an array is rejected and nothing is added.
    #[instrument(skip_all, fields(bytes = json.len()))]
    pub fn import_from(&mut self, json: &[u8]) -> DirectoryResult<usize> {
        let document: Value = serde_json::from_slice(json)
            .map_err(|error| DirectoryError::Format(error.to_string()))?;
        let Value::Array(elements) = document else {
            return Err(DirectoryError::Format(
                "expected a JSON array of connections".into(),
            ));
        };
        let total = elements.len();
        let imported: Vec<ConnectionRecord> = elements
            .into_iter()
            .filter_map(|element| serde_json::from_value::<RawRecord>(element).ok())
            .filter_map(|raw| ConnectionRecord::try_from(raw).ok())
            .collect();
        let count = imported.len();
        self.records.extend(imported);
        info!("Imported {} of {} connections", count, total);
        Ok(count)
    }

    /// Reads a whole JSON document from `reader` and imports it.
    pub fn import_from_reader<R: Read>(&mut self, mut reader: R) -> DirectoryResult<usize> {
        let mut json = Vec::new();
        reader.read_to_end(&mut json)?;
        self.import_from(&json)
    }

    /// Pretty-printed JSON array of `{ "name", "ip", "port" }` objects.
    pub fn export_to(&self) -> DirectoryResult<Vec<u8>> {
        serde_json::to_vec_pretty(&self.records)
            .map_err(|error| DirectoryError::Format(error.to_string()))
    }

    /// Writes [`ConnectionDirectory::export_to`] to `writer`.
    pub fn export_to_writer<W: Write>(&self, mut writer: W) -> DirectoryResult<()> {
        writer.write_all(&self.export_to()?)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Menu entries for the current list.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| MenuItem {
                index,
                label: record.to_string(),
                host: record.host().to_string(),
                port: record.port(),
            })
            .collect()
    }

    /// Resolves a user supplied target to an index.
    ///
    /// A number is taken as an index; otherwise the first record whose name
    /// matches exactly wins, then the first matching without regard to ASCII
    /// case.
    pub fn find(&self, target: &str) -> Option<usize> {
        let target = target.trim();
        if let Ok(index) = target.parse::<usize>() {
            if index < self.records.len() {
                return Some(index);
            }
        }
        self.records
            .iter()
            .position(|record| record.name() == target)
            .or_else(|| {
                self.records
                    .iter()
                    .position(|record| record.name().eq_ignore_ascii_case(target))
            })
    }

    /// Loads the directory from `store`.
    ///
    /// Entries that cannot be decoded are skipped with a warning.
    #[instrument(skip_all)]
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> DirectoryResult<Self> {
        let mut records = Vec::new();
        for entry in store.get(CONNECTIONS_KEY)? {
            match ConnectionRecord::from_wire(&entry) {
                Ok(record) => records.push(record),
                Err(error) => warn!("Skipping stored connection {:?}: {}", entry, error),
            }
        }
        debug!("Loaded {} connections", records.len());
        Ok(Self { records })
    }

    /// Persists the directory to `store`.
    #[instrument(skip_all, fields(count = self.records.len()))]
    pub fn save<S: SettingsStore + ?Sized>(&self, store: &mut S) -> DirectoryResult<()> {
        store.set(
            CONNECTIONS_KEY,
            self.records.iter().map(ConnectionRecord::to_wire).collect(),
        )
    }
}

impl<'a> IntoIterator for &'a ConnectionDirectory {
    type Item = &'a ConnectionRecord;
    type IntoIter = std::slice::Iter<'a, ConnectionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
