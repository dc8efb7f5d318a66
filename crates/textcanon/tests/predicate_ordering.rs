//! Every registered predicate must be encoded and every unregistered one left
//! alone, however the two kinds are interleaved by name and by insertion.

use textcanon::attributes::{AttrValue, Binding, Predicate, PredicateSet, TextValue};
use textcanon::encoding::{encode_predicate_set, encode_search_predicates};
use textcanon::schema::TypeDef;

const MAX_NAMES: usize = 7;

/// Names `p0`..`pK` sort in index order; bit `i` of `mask` marks `p{i}` registered.
fn layout(len: usize, mask: u32) -> (TypeDef, Vec<(String, bool)>) {
    let names: Vec<(String, bool)> = (0..len)
        .map(|i| (format!("p{i}"), mask & (1 << i) != 0))
        .collect();
    let def = TypeDef::new("Doc")
        .attributes(names.iter().map(|(n, _)| n.clone()))
        .encoded(names.iter().filter(|(_, r)| *r).map(|(n, _)| n.clone()));
    (def, names)
}

/// A distinct raw value per name so a misplaced value is detectable.
fn raw_for(name: &str) -> AttrValue {
    AttrValue::bytes(format!("{name}-ü").into_bytes())
}

fn assert_bindings(bound: &[Binding], expected_order: &[(String, bool)]) {
    assert_eq!(bound.len(), expected_order.len());
    for (binding, (name, registered)) in bound.iter().zip(expected_order) {
        assert_eq!(&binding.name, name);
        let expected = if *registered {
            AttrValue::Text(TextValue::encoded(format!("{name}-ü")))
        } else {
            raw_for(name)
        };
        assert_eq!(binding.value, Predicate::Value(expected), "binding {}", name);
    }
}

#[test]
fn every_interleaving_through_predicate_set() {
    for len in 0..=MAX_NAMES {
        for mask in 0..(1u32 << len) {
            let (def, names) = layout(len, mask);

            // Insert in reverse to make sure binding order comes from names
            let mut set = PredicateSet::new();
            for (name, _) in names.iter().rev() {
                set.insert(name.clone(), Predicate::Value(raw_for(name)));
            }

            let bound = encode_predicate_set(&def, &set);
            assert_bindings(&bound, &names);
        }
    }
}

#[test]
fn every_interleaving_in_caller_order() {
    for len in 1..=MAX_NAMES {
        for mask in 0..(1u32 << len) {
            let (def, names) = layout(len, mask);

            for rotation in 0..len {
                let mut order = names.clone();
                order.rotate_left(rotation);
                let bindings: Vec<Binding> = order
                    .iter()
                    .map(|(name, _)| Binding::new(name.clone(), raw_for(name)))
                    .collect();

                let bound = encode_search_predicates(&def, bindings);
                assert_bindings(&bound, &order);
            }
        }
    }
}

#[test]
fn registered_count_matches_encoded_count() {
    for len in 0..=MAX_NAMES {
        for mask in 0..(1u32 << len) {
            let (def, names) = layout(len, mask);
            let set: PredicateSet = names
                .iter()
                .map(|(name, _)| (name.clone(), Predicate::Value(raw_for(name))))
                .collect();

            let bound = encode_predicate_set(&def, &set);
            let encoded = bound
                .iter()
                .filter(|b| {
                    matches!(&b.value, Predicate::Value(AttrValue::Text(t)) if t.is_encoded())
                })
                .count();
            assert_eq!(encoded, mask.count_ones() as usize);
        }
    }
}

#[test]
fn caller_values_are_untouched_after_encoding() {
    let (def, names) = layout(4, 0b0101);
    let set: PredicateSet = names
        .iter()
        .map(|(name, _)| (name.clone(), Predicate::Value(raw_for(name))))
        .collect();
    let snapshot = set.clone();

    let _ = encode_predicate_set(&def, &set);
    let _ = encode_predicate_set(&def, &set);

    assert_eq!(set, snapshot);
    for (name, _) in &names {
        assert_eq!(set.get(name), Some(&Predicate::Value(raw_for(name))));
    }
}
