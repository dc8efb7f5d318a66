use super::backend::StorageBackend;
use crate::attributes::{AttrValue, Binding};
use crate::error::{CanonError, Result};
use crate::model::StoredRow;
use std::cell::RefCell;
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory storage backend.
///
/// Uses `RefCell` for interior mutability since a store is driven from one
/// thread. Rows are kept in their stored form, so anything written comes
/// back as raw bytes.
#[derive(Default)]
pub struct MemBackend {
    rows: RefCell<HashMap<(String, Uuid), StoredRow>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn row_count(&self, object_type: &str) -> usize {
        self.rows
            .borrow()
            .keys()
            .filter(|(t, _)| t == object_type)
            .count()
    }
}

fn row_matches(row: &StoredRow, bindings: &[Binding]) -> bool {
    bindings.iter().all(|binding| {
        let stored = row.values.get(&binding.name).unwrap_or(&AttrValue::Null);
        binding.value.matches(stored)
    })
}

impl StorageBackend for MemBackend {
    fn write_row(&self, object_type: &str, row: StoredRow) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CanonError::Store("Simulated write error".to_string()));
        }
        let row = StoredRow {
            values: row
                .values
                .into_iter()
                .map(|(name, value)| (name, value.into_stored()))
                .collect(),
            ..row
        };
        self.rows
            .borrow_mut()
            .insert((object_type.to_string(), row.id), row);
        Ok(())
    }

    fn load_row(&self, object_type: &str, id: &Uuid) -> Result<Option<StoredRow>> {
        let rows = self.rows.borrow();
        Ok(rows.get(&(object_type.to_string(), *id)).cloned())
    }

    fn find_rows(&self, object_type: &str, bindings: &[Binding]) -> Result<Vec<StoredRow>> {
        let rows = self.rows.borrow();
        let mut found: Vec<StoredRow> = rows
            .iter()
            .filter(|((t, _), row)| t == object_type && row_matches(row, bindings))
            .map(|(_, row)| row.clone())
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    fn delete_row(&self, object_type: &str, id: &Uuid) -> Result<bool> {
        let mut rows = self.rows.borrow_mut();
        Ok(rows.remove(&(object_type.to_string(), *id)).is_some())
    }
}
