//! # Object Type Definitions
//!
//! A [`TypeDef`] declares an object type's attributes and which of them are
//! subject to encoding normalization. Definitions are collected in a mutable
//! [`Schema`] during setup, then frozen into a [`Catalog`] of shared,
//! read-only definitions when a store is built. After that point nothing can
//! register new attributes, so concurrent readers never race a writer.
//!
//! ```ignore
//! let mut schema = Schema::new();
//! schema.define(TypeDef::new("Doc").attributes(["text", "other"]))?;
//! schema.register_encoded_attributes("Doc", ["text"])?;
//! let store = InMemoryStore::new(schema);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::attributes::NormalizationSet;
use crate::error::{CanonError, Result};

/// Definition of one object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    name: String,
    declared: Vec<String>,
    encoded: NormalizationSet,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: Vec::new(),
            encoded: NormalizationSet::new(),
        }
    }

    /// Declare an attribute. Redeclaring is a no-op.
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.declared.contains(&name) {
            self.declared.push(name);
        }
        self
    }

    pub fn attributes<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |def, name| def.attribute(name))
    }

    /// Builder-style [`TypeDef::register_encoded`].
    pub fn encoded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register_encoded(names);
        self
    }

    /// Union-add names to the normalization set; returns how many were new.
    pub fn register_encoded<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.encoded.insert_all(names)
    }

    /// Register every declared attribute.
    pub fn register_all_encoded(&mut self) -> usize {
        self.encoded.insert_all(self.declared.iter().cloned())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.encoded.contains(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared(&self) -> impl Iterator<Item = &str> {
        self.declared.iter().map(String::as_str)
    }

    pub fn encoded_attributes(&self) -> &NormalizationSet {
        &self.encoded
    }
}

/// Mutable collection of type definitions, used during setup only.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    types: BTreeMap<String, TypeDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, def: TypeDef) -> Result<()> {
        if self.types.contains_key(def.name()) {
            return Err(CanonError::DuplicateType(def.name().to_string()));
        }
        debug!(
            object_type = %def.name(),
            encoded = def.encoded_attributes().len(),
            "defined object type"
        );
        self.types.insert(def.name().to_string(), def);
        Ok(())
    }

    /// Setup-time registration of encoded attributes for a defined type.
    pub fn register_encoded_attributes<I, S>(
        &mut self,
        object_type: &str,
        names: I,
    ) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let def = self.type_def_mut(object_type)?;
        Ok(def.register_encoded(names))
    }

    /// Setup-time sugar for registering every declared attribute.
    pub fn register_all_encoded(&mut self, object_type: &str) -> Result<usize> {
        Ok(self.type_def_mut(object_type)?.register_all_encoded())
    }

    pub fn type_def(&self, object_type: &str) -> Result<&TypeDef> {
        self.types
            .get(object_type)
            .ok_or_else(|| CanonError::UnknownType(object_type.to_string()))
    }

    fn type_def_mut(&mut self, object_type: &str) -> Result<&mut TypeDef> {
        self.types
            .get_mut(object_type)
            .ok_or_else(|| CanonError::UnknownType(object_type.to_string()))
    }

    /// End of setup: every definition becomes shared and read-only.
    pub fn freeze(self) -> Catalog {
        Catalog {
            types: self
                .types
                .into_iter()
                .map(|(name, def)| (name, Arc::new(def)))
                .collect(),
        }
    }
}

/// Frozen, read-only type definitions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    types: BTreeMap<String, Arc<TypeDef>>,
}

impl Catalog {
    pub fn get(&self, object_type: &str) -> Result<&Arc<TypeDef>> {
        self.types
            .get(object_type)
            .ok_or_else(|| CanonError::UnknownType(object_type.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeDef>> {
        self.types.values()
    }

    pub fn is_registered(&self, object_type: &str, name: &str) -> bool {
        self.types
            .get(object_type)
            .is_some_and(|def| def.is_registered(name))
    }
}
