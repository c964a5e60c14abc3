//! Core record types.
//!
//! Presentation code works with [`FieldMap`]s (string keys, string values),
//! mirroring what a form or table hands over. Validation and storage work on
//! the typed [`Contact`] and [`Project`] records; the `from_field_map` /
//! `to_field_map` pair is the only crossing point between the two.

use crate::schema::{self, TableSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod contact;
pub mod project;

pub use contact::Contact;
pub use project::Project;

/// Field name to raw value, as exchanged with the presentation layer.
pub type FieldMap = BTreeMap<String, String>;

/// System-assigned row identifier.
pub type RecordId = i64;

/// The two record types managed by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Contacts,
    Projects,
}

impl EntityKind {
    pub fn schema(&self) -> &'static TableSchema {
        match self {
            EntityKind::Contacts => &schema::contact::CONTACTS,
            EntityKind::Projects => &schema::project::PROJECTS,
        }
    }

    pub fn all() -> [EntityKind; 2] {
        [EntityKind::Contacts, EntityKind::Projects]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema().plural)
    }
}

/// Value of `name`, or an empty string when absent.
pub fn field<'a>(fields: &'a FieldMap, name: &str) -> &'a str {
    fields.get(name).map(String::as_str).unwrap_or("")
}

/// Builds a [`FieldMap`] from literal pairs.
pub fn field_map(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Parses the `id` entry of a materialized record.
pub fn record_id(fields: &FieldMap) -> Option<RecordId> {
    field(fields, schema::ID_FIELD).parse().ok()
}
