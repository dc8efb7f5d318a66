//! # Encoding Engine
//!
//! Keeps registered text attributes in canonical UTF-8 across every path a
//! value takes to and from storage:
//!
//! ```text
//! save   ─► write::normalize_for_write ─► storage
//! storage ─► read::reconstruct_after_load ─► record
//! search ─► predicates::encode_search_predicates ─► storage ─► read::reconstruct_after_load
//! ```
//!
//! ## Trust Boundary
//!
//! By default the write path only promotes: raw bytes that are valid UTF-8
//! become encoded text, anything else is stored untouched. Invalid data is
//! detected when it is read back, never silently repaired. Callers that want
//! the check up front select [`WritePolicy::Strict`].
//!
//! ## Wiring
//!
//! [`install`] registers the three handlers for one object type on a
//! [`HookTable`]. The handlers share the frozen [`TypeDef`] through an `Arc`.

use std::sync::Arc;

use tracing::debug;

use crate::error::CanonError;
use crate::hooks::HookTable;
use crate::schema::TypeDef;

pub mod predicates;
pub mod read;
pub mod write;

pub use predicates::{encode_predicate_set, encode_search_predicates, needs_normalization};
pub use read::reconstruct_after_load;
pub use write::normalize_for_write;

/// How the write path treats raw bytes that are not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// Promote what is valid, store the rest as is. Never fails.
    #[default]
    Trusting,
    /// Reject invalid bytes with [`CanonError::InvalidEncoding`] before writing.
    Strict,
}

/// Register the write, read and predicate handlers for `def` on `hooks`.
///
/// Types without encoded attributes get no handlers.
pub fn install(hooks: &mut HookTable, def: Arc<TypeDef>, policy: WritePolicy) {
    if def.encoded_attributes().is_empty() {
        return;
    }
    debug!(
        object_type = %def.name(),
        attributes = def.encoded_attributes().len(),
        ?policy,
        "installing encoding hooks"
    );

    let write_def = Arc::clone(&def);
    hooks.on_before_persist(def.name(), move |record| {
        normalize_for_write(&write_def, record, policy).map(|_| ())
    });

    let read_def = Arc::clone(&def);
    hooks.on_after_load(def.name(), move |record| {
        reconstruct_after_load(&read_def, record)
    });

    let predicate_def = Arc::clone(&def);
    hooks.on_predicate_build(def.name(), move |bindings| {
        encode_search_predicates(&predicate_def, bindings)
    });
}

pub(crate) fn invalid_encoding(
    def: &TypeDef,
    attribute: &str,
    error: std::str::Utf8Error,
) -> CanonError {
    CanonError::InvalidEncoding {
        attribute: attribute.to_string(),
        object_type: def.name().to_string(),
        valid_up_to: error.valid_up_to(),
        source: error,
    }
}
