//! Wire-level DTOs for the translation service.
//!
//! # Design
//! The server owns these records and their schema. They are kept as
//! transparent wrappers over `serde_json::Value` so a successful response is
//! handed back exactly as parsed; accessors read the well-known fields
//! without reshaping anything. The mock-server crate defines its own types,
//! and the integration tests catch drift between the two.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record of a push payload: arbitrary string fields such as `key` and
/// `value`.
pub type StringRecord = BTreeMap<String, String>;

/// Project envelope returned by `GET /api/projects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Project(pub Value);

impl Project {
    /// Looks up `name` on the envelope itself, then inside a `data` wrapper.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0
            .get(name)
            .or_else(|| self.0.get("data").and_then(|data| data.get(name)))
    }

    pub fn id(&self) -> Option<&Value> {
        self.field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// One language variant of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(pub Value);

impl Language {
    pub fn code(&self) -> Option<&str> {
        self.0.get("code").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// A single translatable string with whatever metadata the server attaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringEntry(pub Value);

impl StringEntry {
    pub fn key(&self) -> Option<&str> {
        self.0.get("key").and_then(Value::as_str)
    }

    pub fn value(&self) -> Option<&str> {
        self.0.get("value").and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Strings of one language, flat or grouped depending on the `grouped`
/// query parameter the server received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageStrings {
    /// A JSON array of entries.
    Flat(Vec<StringEntry>),
    /// A JSON object mapping a group key to its entries.
    Grouped(Map<String, Value>),
}

impl LanguageStrings {
    pub fn is_grouped(&self) -> bool {
        matches!(self, LanguageStrings::Grouped(_))
    }

    /// All entries in server order. Grouped collections are concatenated in
    /// the order the body lists them; a group holding a single object counts
    /// as one entry.
    pub fn into_entries(self) -> Vec<StringEntry> {
        match self {
            LanguageStrings::Flat(entries) => entries,
            LanguageStrings::Grouped(groups) => groups
                .into_iter()
                .flat_map(|(_, group)| match group {
                    Value::Array(items) => items.into_iter().map(StringEntry).collect(),
                    other => vec![StringEntry(other)],
                })
                .collect(),
        }
    }
}

/// Request body for `POST .../sync-strings`.
#[derive(Debug, Serialize)]
pub(crate) struct SyncStrings<'a> {
    pub strings: &'a [StringRecord],
}
