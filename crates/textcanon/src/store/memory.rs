use super::mem_backend::MemBackend;
use super::record_store::RecordStore;
use crate::schema::Schema;

pub type InMemoryStore = RecordStore<MemBackend>;

impl InMemoryStore {
    pub fn new(schema: Schema) -> Self {
        RecordStore::with_backend(MemBackend::new(), schema)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::model::{Record, Row};
    use crate::schema::TypeDef;
    use crate::store::DataStore;
    use uuid::Uuid;

    /// A `Doc` type with `text` encoded and `other` left alone.
    pub fn doc_schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .define(
                TypeDef::new("Doc")
                    .attributes(["text", "other"])
                    .encoded(["text"]),
            )
            .unwrap();
        schema
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(doc_schema()),
            }
        }

        pub fn with_doc(mut self, text: &str) -> Self {
            let mut record = Record::new("Doc").with("text", text);
            self.store.create(&mut record).unwrap();
            self
        }

        pub fn with_docs(self, count: usize) -> Self {
            (0..count).fold(self, |fixture, i| fixture.with_doc(&format!("Doc {}", i + 1)))
        }

        /// Store bytes for `text` without going through the write hooks.
        pub fn with_raw_doc(mut self, bytes: &[u8]) -> (Self, Uuid) {
            let mut values = Row::new();
            values.insert("text".to_string(), AttrValue::bytes(bytes));
            let id = self.store.insert_raw("Doc", values).unwrap();
            (self, id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use crate::attributes::PredicateSet;
    use crate::error::CanonError;
    use crate::store::DataStore;

    #[test]
    fn fixture_docs_are_searchable() {
        let fixture = StoreFixture::new().with_docs(3);
        let all = fixture
            .store
            .search("Doc", &PredicateSet::new())
            .unwrap();
        assert_eq!(all.len(), 3);

        let second = fixture
            .store
            .search("Doc", &PredicateSet::new().with("text", "Doc 2"))
            .unwrap();
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn raw_fixture_fails_on_load() {
        let (fixture, id) = StoreFixture::new().with_raw_doc(&[0xE9, 0xE8]);
        let err = fixture.store.get("Doc", &id).unwrap_err();
        assert!(matches!(
            err,
            CanonError::InvalidEncoding { ref attribute, .. } if attribute == "text"
        ));
    }
}
