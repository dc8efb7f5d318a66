//! # Lifecycle Extension Points
//!
//! The persistence layer exposes three named points per object type where
//! handlers can run:
//!
//! | Point | When | Handler |
//! |-------|------|---------|
//! | `before_persist` | right before a create or update write | `Fn(&mut Record) -> Result<()>` |
//! | `after_load` | right after any load, search results included | `Fn(&mut Record) -> Result<()>` |
//! | `predicate_build` | after predicates are bound, before the query runs | `Fn(Vec<Binding>) -> Vec<Binding>` |
//!
//! Handlers run in registration order. A failing handler stops the chain and
//! its error propagates unchanged.

use std::collections::HashMap;

use crate::attributes::Binding;
use crate::error::Result;
use crate::model::Record;

pub type RecordHook = Box<dyn Fn(&mut Record) -> Result<()> + Send + Sync>;
pub type PredicateHook = Box<dyn Fn(Vec<Binding>) -> Vec<Binding> + Send + Sync>;

#[derive(Default)]
struct TypeHooks {
    before_persist: Vec<RecordHook>,
    after_load: Vec<RecordHook>,
    predicate_build: Vec<PredicateHook>,
}

/// Per-type handler tables.
#[derive(Default)]
pub struct HookTable {
    types: HashMap<String, TypeHooks>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, object_type: &str) -> &mut TypeHooks {
        self.types.entry(object_type.to_string()).or_default()
    }

    pub fn on_before_persist<F>(&mut self, object_type: &str, hook: F)
    where
        F: Fn(&mut Record) -> Result<()> + Send + Sync + 'static,
    {
        self.entry(object_type).before_persist.push(Box::new(hook));
    }

    pub fn on_after_load<F>(&mut self, object_type: &str, hook: F)
    where
        F: Fn(&mut Record) -> Result<()> + Send + Sync + 'static,
    {
        self.entry(object_type).after_load.push(Box::new(hook));
    }

    pub fn on_predicate_build<F>(&mut self, object_type: &str, hook: F)
    where
        F: Fn(Vec<Binding>) -> Vec<Binding> + Send + Sync + 'static,
    {
        self.entry(object_type).predicate_build.push(Box::new(hook));
    }

    pub fn run_before_persist(&self, record: &mut Record) -> Result<()> {
        if let Some(hooks) = self.types.get(&record.object_type) {
            for hook in &hooks.before_persist {
                hook(record)?;
            }
        }
        Ok(())
    }

    pub fn run_after_load(&self, record: &mut Record) -> Result<()> {
        if let Some(hooks) = self.types.get(&record.object_type) {
            for hook in &hooks.after_load {
                hook(record)?;
            }
        }
        Ok(())
    }

    pub fn run_predicate_build(&self, object_type: &str, bindings: Vec<Binding>) -> Vec<Binding> {
        match self.types.get(object_type) {
            Some(hooks) => hooks
                .predicate_build
                .iter()
                .fold(bindings, |bindings, hook| hook(bindings)),
            None => bindings,
        }
    }

    /// Number of handlers registered for a type, across all points.
    pub fn handler_count(&self, object_type: &str) -> usize {
        self.types.get(object_type).map_or(0, |hooks| {
            hooks.before_persist.len() + hooks.after_load.len() + hooks.predicate_build.len()
        })
    }
}

impl std::fmt::Debug for HookTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, hooks) in &self.types {
            map.entry(
                name,
                &(
                    hooks.before_persist.len(),
                    hooks.after_load.len(),
                    hooks.predicate_build.len(),
                ),
            );
        }
        map.finish()
    }
}
