use textcanon::attributes::{AttrValue, Binding, Predicate, PredicateSet, TextValue};
use textcanon::error::CanonError;
use textcanon::model::{Record, Row};
use textcanon::schema::{Schema, TypeDef};
use textcanon::store::memory::InMemoryStore;
use textcanon::store::DataStore;

fn setup() -> InMemoryStore {
    let mut schema = Schema::new();
    schema
        .define(TypeDef::new("Doc").attributes(["text", "other"]))
        .unwrap();
    schema.register_encoded_attributes("Doc", ["text"]).unwrap();
    InMemoryStore::new(schema)
}

#[test]
fn test_create_then_load_by_id() {
    let mut store = setup();
    let mut doc = Record::new("Doc").with("text", "a \u{2264} b");
    store.create(&mut doc).unwrap();

    let loaded = store.get("Doc", &doc.id).unwrap();
    assert_eq!(loaded.text("text"), Some("a ≤ b"));
}

#[test]
fn test_search_finds_created_doc() {
    let mut store = setup();
    let mut doc = Record::new("Doc").with("text", "a ≤ b");
    store.create(&mut doc).unwrap();
    let mut decoy = Record::new("Doc").with("text", "a < b");
    store.create(&mut decoy).unwrap();

    let found = store
        .search("Doc", &PredicateSet::new().with("text", "a ≤ b"))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, doc.id);
    assert_eq!(found[0].text("text"), Some("a ≤ b"));
}

#[test]
fn test_search_with_raw_predicate_bytes() {
    let mut store = setup();
    let mut doc = Record::new("Doc").with("text", "a ≤ b");
    store.create(&mut doc).unwrap();

    let predicates = PredicateSet::new().with("text", AttrValue::bytes("a ≤ b".as_bytes()));
    let found = store.search("Doc", &predicates).unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn test_raw_latin1_row_fails_to_load() {
    let mut store = setup();
    // 0xE9 ("é") and 0xE8 ("è") are valid Latin-1 but not UTF-8 together
    let mut values = Row::new();
    values.insert("text".to_string(), AttrValue::bytes(vec![0xE9, 0xE8]));
    let id = store.insert_raw("Doc", values).unwrap();

    let err = store.get("Doc", &id).unwrap_err();
    match err {
        CanonError::InvalidEncoding {
            attribute,
            object_type,
            ..
        } => {
            assert_eq!(attribute, "text");
            assert_eq!(object_type, "Doc");
        }
        other => panic!("Expected InvalidEncoding, got {:?}", other),
    }
}

#[test]
fn test_search_surfacing_corrupt_row_fails() {
    let mut store = setup();
    let mut values = Row::new();
    values.insert("text".to_string(), AttrValue::bytes(vec![0xE9, 0xE8]));
    values.insert("other".to_string(), AttrValue::Int(7));
    store.insert_raw("Doc", values).unwrap();

    let err = store
        .search("Doc", &PredicateSet::new().with("other", 7))
        .unwrap_err();
    assert_eq!(err.attribute(), Some("text"));
}

#[test]
fn test_mixed_predicates_bind_only_registered_text() {
    let store = setup();
    let def = store.catalog().get("Doc").unwrap();
    let predicates = PredicateSet::new()
        .with("text", AttrValue::bytes("café".as_bytes()))
        .with("other", 42);

    let bound = textcanon::encoding::encode_predicate_set(def, &predicates);
    assert_eq!(
        bound,
        vec![
            Binding::new("other", AttrValue::Int(42)),
            Binding::new("text", AttrValue::Text(TextValue::encoded("café"))),
        ]
    );
    assert_eq!(
        predicates.get("text"),
        Some(&Predicate::Value(AttrValue::bytes("café".as_bytes())))
    );
}

#[test]
fn test_reregistering_overlapping_names() {
    let mut schema = Schema::new();
    schema
        .define(TypeDef::new("Doc").attributes(["text", "other"]))
        .unwrap();
    schema.register_encoded_attributes("Doc", ["text"]).unwrap();
    schema.register_all_encoded("Doc").unwrap();
    schema.register_all_encoded("Doc").unwrap();

    let names: Vec<_> = schema
        .type_def("Doc")
        .unwrap()
        .encoded_attributes()
        .iter()
        .collect();
    assert_eq!(names, vec!["text", "other"]);
}

#[test]
fn test_update_then_search_by_new_text() {
    let mut store = setup();
    let mut doc = Record::new("Doc").with("text", "draft");
    store.create(&mut doc).unwrap();

    doc.set("text", AttrValue::bytes("naïve".as_bytes()));
    store.update(&mut doc).unwrap();

    let found = store
        .search("Doc", &PredicateSet::new().with("text", "naïve"))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert!(store
        .search("Doc", &PredicateSet::new().with("text", "draft"))
        .unwrap()
        .is_empty());
}
