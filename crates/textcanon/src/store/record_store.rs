use super::backend::StorageBackend;
use super::DataStore;
use crate::attributes::PredicateSet;
use crate::config::CanonConfig;
use crate::encoding;
use crate::error::{CanonError, Result};
use crate::hooks::HookTable;
use crate::model::{Record, Row, StoredRow};
use crate::schema::{Catalog, Schema};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    catalog: Catalog,
    hooks: HookTable,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Build a store with default configuration.
    pub fn with_backend(backend: B, schema: Schema) -> Self {
        Self::with_config(backend, schema, &CanonConfig::default())
    }

    /// Freeze `schema` and install the encoding hooks for every type in it.
    pub fn with_config(backend: B, schema: Schema, config: &CanonConfig) -> Self {
        let catalog = schema.freeze();
        let mut hooks = HookTable::new();
        for def in catalog.iter() {
            encoding::install(&mut hooks, Arc::clone(def), config.write_policy());
        }
        Self {
            backend,
            catalog,
            hooks,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Extension point for additional lifecycle handlers.
    /// Handlers added here run after the encoding handlers.
    pub fn hooks_mut(&mut self) -> &mut HookTable {
        &mut self.hooks
    }

    /// Write a row straight to the backend, bypassing every hook.
    ///
    /// This is how legacy or externally produced data enters storage; it is
    /// validated only when loaded.
    pub fn insert_raw(&mut self, object_type: &str, values: Row) -> Result<Uuid> {
        self.catalog.get(object_type)?;
        let row = StoredRow::new(values);
        let id = row.id;
        self.backend.write_row(object_type, row)?;
        debug!(object_type, %id, "inserted raw row");
        Ok(id)
    }

    fn materialize(&self, object_type: &str, row: StoredRow) -> Result<Record> {
        let mut record = Record::from_stored(object_type, row);
        self.hooks.run_after_load(&mut record)?;
        Ok(record)
    }
}

impl<B: StorageBackend> DataStore for RecordStore<B> {
    fn create(&mut self, record: &mut Record) -> Result<()> {
        self.catalog.get(&record.object_type)?;
        if self
            .backend
            .load_row(&record.object_type, &record.id)?
            .is_some()
        {
            return Err(CanonError::RecordExists(record.id));
        }

        self.hooks.run_before_persist(record)?;
        self.backend
            .write_row(&record.object_type, record.to_stored())?;

        debug!(object_type = %record.object_type, id = %record.id, "created record");
        Ok(())
    }

    fn update(&mut self, record: &mut Record) -> Result<()> {
        self.catalog.get(&record.object_type)?;
        if self
            .backend
            .load_row(&record.object_type, &record.id)?
            .is_none()
        {
            return Err(CanonError::RecordNotFound(record.id));
        }

        self.hooks.run_before_persist(record)?;
        let mut row = record.to_stored();
        row.updated_at = Utc::now();
        let updated_at = row.updated_at;
        self.backend.write_row(&record.object_type, row)?;
        record.updated_at = updated_at;

        debug!(object_type = %record.object_type, id = %record.id, "updated record");
        Ok(())
    }

    fn get(&self, object_type: &str, id: &Uuid) -> Result<Record> {
        self.catalog.get(object_type)?;
        let row = self
            .backend
            .load_row(object_type, id)?
            .ok_or(CanonError::RecordNotFound(*id))?;
        self.materialize(object_type, row)
    }

    fn search(&self, object_type: &str, predicates: &PredicateSet) -> Result<Vec<Record>> {
        self.catalog.get(object_type)?;

        // One name-ordered binding list feeds both encoding and the query
        let bindings = self
            .hooks
            .run_predicate_build(object_type, predicates.bind());
        let rows = self.backend.find_rows(object_type, &bindings)?;
        debug!(object_type, matches = rows.len(), "search");

        rows.into_iter()
            .map(|row| self.materialize(object_type, row))
            .collect()
    }

    fn delete(&mut self, object_type: &str, id: &Uuid) -> Result<()> {
        self.catalog.get(object_type)?;
        if !self.backend.delete_row(object_type, id)? {
            return Err(CanonError::RecordNotFound(*id));
        }
        debug!(object_type, %id, "deleted record");
        Ok(())
    }
}
