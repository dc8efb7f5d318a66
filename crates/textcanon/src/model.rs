//! # Domain Model: Records
//!
//! A [`Record`] is one live instance of an object type: an identity, two
//! timestamps, and a map of named attribute values.
//!
//! ## Raw Attribute Access
//!
//! [`Record::get`], [`Record::get_mut`] and [`Record::set`] read and write the
//! attribute map directly. They never run lifecycle hooks, which is what the
//! encoding handlers rely on when they rewrite values in place.
//!
//! ## Stored Form
//!
//! [`StoredRow`] is what a storage backend holds: the same identity and
//! timestamps, with every text value reduced to untagged bytes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::attributes::AttrValue;

/// Attribute name → value.
pub type Row = BTreeMap<String, AttrValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub object_type: String,
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    values: Row,
}

impl Record {
    pub fn new(object_type: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            object_type: object_type.into(),
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            values: Row::new(),
        }
    }

    /// Builder-style attribute assignment.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AttrValue> {
        self.values.get_mut(name)
    }

    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Option<AttrValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Encoded text content of an attribute, if it holds any.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_str)
    }

    pub fn values(&self) -> &Row {
        &self.values
    }

    /// Reduce to the form a backend stores.
    pub fn to_stored(&self) -> StoredRow {
        StoredRow {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            values: self
                .values
                .iter()
                .map(|(name, value)| (name.clone(), value.clone().into_stored()))
                .collect(),
        }
    }

    /// Materialize a loaded row. Text values arrive as raw bytes.
    pub fn from_stored(object_type: impl Into<String>, row: StoredRow) -> Self {
        Self {
            object_type: object_type.into(),
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            values: row.values,
        }
    }
}

/// A row as held by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub values: Row,
}

impl StoredRow {
    /// A fresh row for data written around the hooks (imports, fixtures).
    pub fn new(values: Row) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            values: values
                .into_iter()
                .map(|(name, value)| (name, value.into_stored()))
                .collect(),
        }
    }
}
