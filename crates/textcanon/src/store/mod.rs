//! # Storage Layer
//!
//! Records reach storage through a [`DataStore`]. The production shape is
//! [`record_store::RecordStore`], generic over a [`backend::StorageBackend`]
//! that only moves bytes.
//!
//! ## Lifecycle
//!
//! | Operation | Hook | Effect on text |
//! |-----------|------|----------------|
//! | `create`, `update` | `before_persist` | registered raw text promoted in place |
//! | `get` | `after_load` | bytes validated into text, or `InvalidEncoding` |
//! | `search` | `predicate_build`, then `after_load` per row | predicate text promoted on a copy |
//!
//! ## Backend Contract
//!
//! Backends store whatever bytes they are given and return them unchanged,
//! with no encoding tag. They never transcode. All encoding decisions live in
//! the hooks, not in the backend.
//!
//! ## Implementations
//!
//! - [`mem_backend::MemBackend`]: in-memory rows, used by
//!   [`memory::InMemoryStore`] and the tests.

use crate::attributes::PredicateSet;
use crate::error::Result;
use crate::model::Record;
use uuid::Uuid;

pub mod backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

/// Abstract interface for record persistence.
pub trait DataStore {
    /// Persist a new record. Registered text is normalized in place first.
    fn create(&mut self, record: &mut Record) -> Result<()>;

    /// Persist changes to an existing record.
    fn update(&mut self, record: &mut Record) -> Result<()>;

    /// Load a record by type and id.
    fn get(&self, object_type: &str, id: &Uuid) -> Result<Record>;

    /// All records of a type matching every predicate.
    fn search(&self, object_type: &str, predicates: &PredicateSet) -> Result<Vec<Record>>;

    /// Delete a record permanently
    fn delete(&mut self, object_type: &str, id: &Uuid) -> Result<()>;
}
