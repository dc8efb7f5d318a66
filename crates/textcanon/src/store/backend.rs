use crate::attributes::Binding;
use crate::error::Result;
use crate::model::StoredRow;
use uuid::Uuid;

/// Abstract interface for raw row I/O.
///
/// Backends move bytes, not text: every text value they return is `Raw`, and
/// they neither transcode nor attach encoding information. `RecordStore`
/// handles the "what" (hooks, identity checks) on top of this.
pub trait StorageBackend {
    /// Insert or replace the row with `row.id`.
    fn write_row(&self, object_type: &str, row: StoredRow) -> Result<()>;

    /// Load a row by id. Returns Ok(None) if it does not exist.
    fn load_row(&self, object_type: &str, id: &Uuid) -> Result<Option<StoredRow>>;

    /// All rows whose attributes satisfy every binding, oldest first.
    fn find_rows(&self, object_type: &str, bindings: &[Binding]) -> Result<Vec<StoredRow>>;

    /// Remove a row. Returns whether it existed.
    fn delete_row(&self, object_type: &str, id: &Uuid) -> Result<bool>;
}
