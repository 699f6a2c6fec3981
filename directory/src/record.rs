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

use crate::{DirectoryError, DirectoryResult, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Separator between fields of the stored wire form.
pub const FIELD_SEPARATOR: char = '|';

/// Escape character of the stored wire form.
pub const ESCAPE: char = '\\';

/// A saved endpoint.
///
/// Fields are private so that every record in existence has passed
/// [`ConnectionRecord::new`]: name and host are trimmed and non-empty and
/// the port lies in `1..=65535`.
///
/// The JSON form uses the field names `name`, `ip` and `port`, in that order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectionRecord {
    name: String,
    #[serde(rename = "ip")]
    host: String,
    port: u16,
}

/// Unvalidated shape of one imported JSON object.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    pub(crate) name: String,
    pub(crate) ip: String,
    pub(crate) port: i64,
}

impl ConnectionRecord {
    /// Validates and builds a record.
    ///
    /// ```
    /// use amlp_directory::{ConnectionRecord, ValidationError};
    ///
    /// let record = ConnectionRecord::new(" Dune ", "mud.example.org", 6789).unwrap();
    /// assert_eq!(record.name(), "Dune");
    /// assert_eq!(
    ///     ConnectionRecord::new("Dune", "mud.example.org", 0),
    ///     Err(ValidationError::PortOutOfRange(0))
    /// );
    /// ```
    pub fn new(name: &str, host: &str, port: i64) -> Result<Self, ValidationError> {
        let name = name.trim();
        let host = host.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }
        let port = u16::try_from(port)
            .ok()
            .filter(|port| *port != 0)
            .ok_or(ValidationError::PortOutOfRange(port))?;
        Ok(Self {
            name: name.to_string(),
            host: host.to_string(),
            port,
        })
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host name or address
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Encodes the record as `name|host|port` for the settings store.
    ///
    /// Backslashes and pipes inside the name or host are escaped with a
    /// backslash, so the form can always be split unambiguously.
    pub fn to_wire(&self) -> String {
        let mut wire = String::with_capacity(self.name.len() + self.host.len() + 8);
        escape_into(&mut wire, &self.name);
        wire.push(FIELD_SEPARATOR);
        escape_into(&mut wire, &self.host);
        wire.push(FIELD_SEPARATOR);
        wire.push_str(&self.port.to_string());
        wire
    }

    /// Decodes a stored `name|host|port` entry.
    ///
    /// A backslash only escapes a following backslash or pipe; any other
    /// backslash is kept, so entries written before escaping existed read
    /// back unchanged.
    pub fn from_wire(entry: &str) -> DirectoryResult<Self> {
        let fields = split_wire(entry);
        let [name, host, port] = fields.as_slice() else {
            return Err(DirectoryError::Format(format!(
                "expected 3 fields in stored connection, found {}",
                fields.len()
            )));
        };
        let port = port.trim().parse::<i64>().map_err(|error| {
            DirectoryError::Format(format!("invalid port {:?}: {}", port, error))
        })?;
        Ok(ConnectionRecord::new(name, host, port)?)
    }
}

impl Display for ConnectionRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.host, self.port)
    }
}

impl TryFrom<RawRecord> for ConnectionRecord {
    type Error = ValidationError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        ConnectionRecord::new(&raw.name, &raw.ip, raw.port)
    }
}

fn escape_into(wire: &mut String, field: &str) {
    for ch in field.chars() {
        if ch == ESCAPE || ch == FIELD_SEPARATOR {
            wire.push(ESCAPE);
        }
        wire.push(ch);
    }
}

fn split_wire(entry: &str) -> Vec<String> {
    let mut fields = vec![String::new()];
    let mut chars = entry.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => match chars.peek() {
                Some(&next) if next == ESCAPE || next == FIELD_SEPARATOR => {
                    chars.next();
                    push_char(&mut fields, next);
                }
                _ => push_char(&mut fields, ESCAPE),
            },
            FIELD_SEPARATOR => fields.push(String::new()),
            other => push_char(&mut fields, other),
        }
    }
    fields
}

fn push_char(fields: &mut [String], ch: char) {
    if let Some(field) = fields.last_mut() {
        field.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_trims_fields() {
        let record = ConnectionRecord::new("  Aardwolf ", "\taardmud.org ", 23).unwrap();
        assert_eq!(record.name(), "Aardwolf");
        assert_eq!(record.host(), "aardmud.org");
        assert_eq!(record.port(), 23);
    }

    #[test]
    fn validation_rejects_blank_fields() {
        assert_eq!(
            ConnectionRecord::new("   ", "host", 10),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            ConnectionRecord::new("n", "", 10),
            Err(ValidationError::EmptyHost)
        );
    }

    #[test]
    fn validation_port_range() {
        assert!(ConnectionRecord::new("n", "h", 1).is_ok());
        assert!(ConnectionRecord::new("n", "h", 65535).is_ok());
        assert_eq!(
            ConnectionRecord::new("n", "h", 0),
            Err(ValidationError::PortOutOfRange(0))
        );
        assert_eq!(
            ConnectionRecord::new("n", "h", 65536),
            Err(ValidationError::PortOutOfRange(65536))
        );
        assert_eq!(
            ConnectionRecord::new("n", "h", -23),
            Err(ValidationError::PortOutOfRange(-23))
        );
    }

    #[test]
    fn wire_form_plain() {
        let record = ConnectionRecord::new("Dune", "mud.example.org", 6789).unwrap();
        assert_eq!(record.to_wire(), "Dune|mud.example.org|6789");
        assert_eq!(
            ConnectionRecord::from_wire("Dune|mud.example.org|6789").unwrap(),
            record
        );
    }

    #[test]
    fn wire_form_escapes_separator() {
        let record = ConnectionRecord::new("Bits|Pieces\\", "host", 4000).unwrap();
        assert_eq!(record.to_wire(), "Bits\\|Pieces\\\\|host|4000");
        assert_eq!(ConnectionRecord::from_wire(&record.to_wire()).unwrap(), record);
    }

    #[test]
    fn wire_form_keeps_lone_backslash() {
        let record = ConnectionRecord::from_wire("C:\\mud|localhost|4000").unwrap();
        assert_eq!(record.name(), "C:\\mud");
    }

    #[test]
    fn wire_form_rejects_malformed() {
        assert!(matches!(
            ConnectionRecord::from_wire("only|two"),
            Err(DirectoryError::Format(_))
        ));
        assert!(matches!(
            ConnectionRecord::from_wire("a|b|c|d"),
            Err(DirectoryError::Format(_))
        ));
        assert!(matches!(
            ConnectionRecord::from_wire("a|b|port"),
            Err(DirectoryError::Format(_))
        ));
        assert!(matches!(
            ConnectionRecord::from_wire("a|b|70000"),
            Err(DirectoryError::Validation(ValidationError::PortOutOfRange(70000)))
        ));
    }

    #[test]
    fn display_label() {
        let record = ConnectionRecord::new("Dune", "mud.example.org", 6789).unwrap();
        assert_eq!(record.to_string(), "Dune (mud.example.org:6789)");
    }

    #[test]
    fn json_field_names() {
        let record = ConnectionRecord::new("Dune", "mud.example.org", 6789).unwrap();
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"name":"Dune","ip":"mud.example.org","port":6789}"#
        );
    }
}
