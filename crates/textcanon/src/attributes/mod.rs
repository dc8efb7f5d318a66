//! # Attribute System
//!
//! Types for the values records hold and the names that participate in
//! encoding normalization.
//!
//! - **Values** ([`AttrValue`], [`TextValue`]): text is either `Raw` bytes or
//!   `Encoded` UTF-8. Promotion and validation are explicit transitions.
//! - **Registry** ([`NormalizationSet`]): which attributes of a type are
//!   normalized.
//! - **Predicates** ([`PredicateSet`], [`Binding`]): search conditions and the
//!   positional bound values derived from them.
//!
//! ## Text States
//!
//! | State | Produced by | Meaning |
//! |-------|-------------|---------|
//! | `Raw` | storage loads, callers with bytes | no encoding guarantee |
//! | `Encoded` | promotion, validation, `&str` | valid UTF-8 |

mod filter;
mod registry;
mod value;

pub use filter::{Binding, Condition, FilterOp, Predicate, PredicateSet};
pub use registry::NormalizationSet;
pub use value::{AttrValue, InvalidText, TextValue};
