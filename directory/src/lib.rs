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

//! # Connection Directory
//!
//! An ordered list of saved endpoints with validation, reordering, JSON
//! import/export and persistence through a [`SettingsStore`].
//!
//! ```
//! use amlp_directory::{ConnectionDirectory, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! let mut directory = ConnectionDirectory::load(&store).unwrap();
//! directory.add("Dune", "mud.example.org", 6789).unwrap();
//! directory.add("Aardwolf", "aardmud.org", 23).unwrap();
//! directory.move_up(1).unwrap();
//! directory.save(&mut store).unwrap();
//!
//! let reloaded = ConnectionDirectory::load(&store).unwrap();
//! assert_eq!(reloaded.menu_items()[0].label, "Aardwolf (aardmud.org:23)");
//! ```
//!
//! Records are stored as `name|host|port` strings under the `connections`
//! key. The import/export format is a JSON array:
//!
//! ```json
//! [
//!   { "name": "Dune", "ip": "mud.example.org", "port": 6789 }
//! ]
//! ```

#![warn(future_incompatible, rust_2018_idioms)]

mod directory;
mod record;
mod result;
mod store;

pub use self::directory::{CONNECTIONS_KEY, ConnectionDirectory, MenuItem};
pub use self::record::ConnectionRecord;
pub use self::result::{DirectoryError, DirectoryResult, ValidationError};
pub use self::store::{JsonFileStore, MemoryStore, SettingsStore};
