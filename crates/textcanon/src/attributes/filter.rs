//! Search predicates and their positional bindings.
//!
//! A search is expressed as a [`PredicateSet`]: attribute name → predicate.
//! The set is kept sorted by name, and [`PredicateSet::bind`] walks it once to
//! produce the positional [`Binding`] sequence handed to storage. Every later
//! step (encoding, matching) works on that one sequence, so a name and its
//! bound value can never drift apart.

use std::collections::BTreeMap;

use super::AttrValue;

/// Comparison used by a structured condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact equality match against a single operand.
    Eq,
    /// Not equal to a single operand.
    Ne,
    /// Stored value equals any of the operands.
    In,
}

/// A composite query condition. Passed through the encoder unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub op: FilterOp,
    pub operands: Vec<AttrValue>,
}

impl Condition {
    pub fn new(op: FilterOp, operands: Vec<AttrValue>) -> Self {
        Self { op, operands }
    }

    /// Check the condition against a stored value using byte-level text equality.
    ///
    /// `Eq` and `Ne` take exactly one operand; any other arity matches nothing.
    pub fn matches(&self, stored: &AttrValue) -> bool {
        match self.op {
            FilterOp::Eq => matches!(self.operands.as_slice(), [v] if stored.stored_eq(v)),
            FilterOp::Ne => matches!(self.operands.as_slice(), [v] if !stored.stored_eq(v)),
            FilterOp::In => self.operands.iter().any(|v| stored.stored_eq(v)),
        }
    }
}

/// The candidate for one attribute in a search.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Plain scalar equality.
    Value(AttrValue),
    Condition(Condition),
}

impl Predicate {
    /// Whether a stored value satisfies this predicate.
    pub fn matches(&self, stored: &AttrValue) -> bool {
        match self {
            Predicate::Value(value) => stored.stored_eq(value),
            Predicate::Condition(condition) => condition.matches(stored),
        }
    }
}

impl From<AttrValue> for Predicate {
    fn from(value: AttrValue) -> Self {
        Predicate::Value(value)
    }
}

impl From<Condition> for Predicate {
    fn from(condition: Condition) -> Self {
        Predicate::Condition(condition)
    }
}

/// One positional bound value of a search query.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub value: Predicate,
}

impl Binding {
    pub fn new(name: impl Into<String>, value: impl Into<Predicate>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Predicates for one search call, ordered by attribute name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateSet {
    predicates: BTreeMap<String, Predicate>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a scalar equality predicate.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(name, Predicate::Value(value.into()));
        self
    }

    /// Builder-style insert of a structured condition.
    pub fn with_condition(mut self, name: impl Into<String>, condition: Condition) -> Self {
        self.insert(name, Predicate::Condition(condition));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, predicate: Predicate) -> Option<Predicate> {
        self.predicates.insert(name.into(), predicate)
    }

    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Produce the positional bindings in name order.
    ///
    /// Values are cloned; the set itself is only borrowed, so nothing done to
    /// the bindings afterwards can leak back into the caller's values.
    pub fn bind(&self) -> Vec<Binding> {
        self.predicates
            .iter()
            .map(|(name, value)| Binding {
                name: name.clone(),
                value: value.clone(),
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, Predicate)> for PredicateSet {
    fn from_iter<T: IntoIterator<Item = (S, Predicate)>>(iter: T) -> Self {
        Self {
            predicates: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_orders_by_name() {
        let set = PredicateSet::new()
            .with("zeta", 1)
            .with("alpha", 2)
            .with("mid", 3);
        let names: Vec<_> = set.bind().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn bind_keeps_value_with_name() {
        let set = PredicateSet::new().with("b", "two").with("a", 1);
        let bindings = set.bind();
        assert_eq!(bindings[0], Binding::new("a", AttrValue::Int(1)));
        assert_eq!(bindings[1], Binding::new("b", AttrValue::text("two")));
    }

    #[test]
    fn bind_does_not_consume_set() {
        let set = PredicateSet::new().with("text", "café");
        let _ = set.bind();
        assert_eq!(
            set.get("text"),
            Some(&Predicate::Value(AttrValue::text("café")))
        );
    }

    #[test]
    fn value_predicate_matches_by_bytes() {
        let predicate = Predicate::Value(AttrValue::text("café"));
        assert!(predicate.matches(&AttrValue::bytes("café".as_bytes())));
        assert!(!predicate.matches(&AttrValue::bytes("cafe".as_bytes())));
    }

    #[test]
    fn condition_eq() {
        let cond = Condition::new(FilterOp::Eq, vec![AttrValue::Int(3)]);
        assert!(cond.matches(&AttrValue::Int(3)));
        assert!(!cond.matches(&AttrValue::Int(4)));
    }

    #[test]
    fn condition_ne() {
        let cond = Condition::new(FilterOp::Ne, vec![AttrValue::text("x")]);
        assert!(!cond.matches(&AttrValue::bytes(b"x".to_vec())));
        assert!(cond.matches(&AttrValue::bytes(b"y".to_vec())));
    }

    #[test]
    fn eq_and_ne_need_exactly_one_operand() {
        let stored = AttrValue::bytes(b"a".to_vec());
        for op in [FilterOp::Eq, FilterOp::Ne] {
            assert!(!Condition::new(op, vec![]).matches(&stored));
            let pair = vec![AttrValue::text("a"), AttrValue::text("b")];
            assert!(!Condition::new(op, pair).matches(&stored));
        }
    }

    #[test]
    fn condition_in() {
        let cond = Condition::new(
            FilterOp::In,
            vec![AttrValue::text("a"), AttrValue::text("b")],
        );
        assert!(cond.matches(&AttrValue::bytes(b"b".to_vec())));
        assert!(!cond.matches(&AttrValue::bytes(b"c".to_vec())));
        assert!(!Condition::new(FilterOp::In, vec![]).matches(&AttrValue::Int(1)));
    }

    #[test]
    fn null_value_matches_null() {
        assert!(Predicate::Value(AttrValue::Null).matches(&AttrValue::Null));
        assert!(!Predicate::Value(AttrValue::Null).matches(&AttrValue::Int(0)));
    }
}
