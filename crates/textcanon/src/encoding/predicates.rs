//! Query path: encode predicate values so they compare equal to stored text.
//!
//! Each [`Binding`] carries its attribute name and its bound value together.
//! Deciding whether a position needs encoding and rewriting that position are
//! done on the same element in a single pass, so the decision for one name can
//! never be applied to another name's value.

use tracing::trace;

use crate::attributes::{AttrValue, Binding, Predicate, PredicateSet};
use crate::schema::TypeDef;

/// A bound value is encoded when its attribute is registered and it is a
/// plain, non-null text value. Structured conditions are never touched.
pub fn needs_normalization(def: &TypeDef, binding: &Binding) -> bool {
    def.is_registered(&binding.name)
        && matches!(binding.value, Predicate::Value(AttrValue::Text(_)))
}

/// Promote every registered text predicate in `bindings`, preserving order.
pub fn encode_search_predicates(def: &TypeDef, bindings: Vec<Binding>) -> Vec<Binding> {
    bindings
        .into_iter()
        .map(|binding| {
            if !needs_normalization(def, &binding) {
                return binding;
            }
            let Binding { name, value } = binding;
            let value = match value {
                Predicate::Value(AttrValue::Text(text)) => {
                    trace!(object_type = %def.name(), attribute = %name, "encoded predicate");
                    Predicate::Value(AttrValue::Text(text.promote()))
                }
                other => other,
            };
            Binding { name, value }
        })
        .collect()
}

/// Bind `predicates` in name order and encode the result.
///
/// The set is only borrowed; the returned bindings are independent copies.
pub fn encode_predicate_set(def: &TypeDef, predicates: &PredicateSet) -> Vec<Binding> {
    encode_search_predicates(def, predicates.bind())
}
