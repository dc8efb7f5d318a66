//! # Textcanon Architecture
//!
//! Textcanon is a **transparent encoding layer** between an in-memory record
//! model and byte-oriented storage. Registered text attributes are always
//! stored as UTF-8, always come back as validated text, and compare correctly
//! when used as search predicates.
//!
//! ## Data Paths
//!
//! ```text
//! ┌──────────────┐ before_persist ┌──────────────────────┐
//! │ create/update│ ─────────────► │ encoding::write      │ ─► storage
//! └──────────────┘                └──────────────────────┘
//! ┌──────────────┐ after_load     ┌──────────────────────┐
//! │ get / search │ ◄───────────── │ encoding::read       │ ◄─ storage
//! └──────────────┘                └──────────────────────┘
//! ┌──────────────┐ predicate_build┌──────────────────────┐
//! │ search       │ ─────────────► │ encoding::predicates │ ─► storage query
//! └──────────────┘                └──────────────────────┘
//! ```
//!
//! ## Key Rules
//!
//! - Text is `Raw` bytes or `Encoded` UTF-8; there is no third state.
//! - Writes promote, never fail (unless strict writes are configured).
//! - Reads validate; invalid bytes fail the load with `InvalidEncoding` and
//!   the attribute is left `Raw`.
//! - Predicates are bound once, in name order, and encoded per binding, so
//!   names and bound values cannot be misaligned.
//! - Unregistered attributes are never touched.
//!
//! ## Setup
//!
//! ```ignore
//! let mut schema = Schema::new();
//! schema.define(TypeDef::new("Doc").attributes(["text", "other"]))?;
//! schema.register_encoded_attributes("Doc", ["text"])?;
//! let mut store = InMemoryStore::new(schema);
//!
//! let mut doc = Record::new("Doc").with("text", "a ≤ b");
//! store.create(&mut doc)?;
//! let found = store.search("Doc", &PredicateSet::new().with("text", "a ≤ b"))?;
//! ```
//!
//! ## Module Overview
//!
//! - [`attributes`]: value types, normalization sets, predicates
//! - [`schema`]: object type definitions and registration
//! - [`encoding`]: write, read and predicate normalization
//! - [`hooks`]: lifecycle extension points
//! - [`store`]: storage abstraction and the in-memory backend
//! - [`model`]: records and stored rows
//! - [`config`]: configuration loading
//! - [`error`]: error types

pub mod attributes;
pub mod config;
pub mod encoding;
pub mod error;
pub mod hooks;
pub mod model;
pub mod schema;
pub mod store;
