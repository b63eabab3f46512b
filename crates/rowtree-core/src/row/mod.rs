//! Per-execution row state: loaded beans, the row read context boundary,
//! and a concrete in-memory context implementation.
//!
//! Everything in this module is owned by a single query execution.
//! Compiled trees never hold any of it.

pub mod context;

pub use context::BufferedRowContext;

use crate::value::Value;
use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};
use thiserror::Error as ThisError;

///
/// RowError
///
/// Data-access failure raised by a row context. The tree propagates
/// these unchanged; it adds no retry or suppression logic.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum RowError {
    #[error("column not present in current row: '{column}'")]
    MissingColumn { column: String },

    #[error("no current row positioned on the read context")]
    NoCurrentRow,
}

///
/// EntityRef
///
/// Shared handle to a loaded bean. Sharing is what lets the one side of
/// a flattened one-to-many join keep receiving collection entries across
/// consecutive rows.
///

pub type EntityRef = Rc<RefCell<EntityRow>>;

///
/// EntityRow
///
/// Dynamically-typed loaded bean: scalar values keyed by property name
/// (embedded sub-values under dotted keys), to-one links, and backing
/// collections for to-many relationships.
///

#[derive(Clone, Debug, Default)]
pub struct EntityRow {
    entity: String,
    values: BTreeMap<String, Value>,
    ones: BTreeMap<String, EntityRef>,
    collections: BTreeMap<String, Vec<EntityRef>>,
    modified: BTreeSet<String>,
}

impl EntityRow {
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn set_value(&mut self, property: impl Into<String>, value: Value) {
        self.values.insert(property.into(), value);
    }

    #[must_use]
    pub fn value(&self, property: &str) -> Option<&Value> {
        self.values.get(property)
    }

    /// Assign a to-one relationship property.
    pub fn set_one(&mut self, property: impl Into<String>, bean: EntityRef) {
        self.ones.insert(property.into(), bean);
    }

    #[must_use]
    pub fn one(&self, property: &str) -> Option<&EntityRef> {
        self.ones.get(property)
    }

    /// Materialize a to-many backing collection without adding to it.
    /// A parent loaded with zero children ends up with a known-empty
    /// collection rather than an unloaded one.
    pub fn ensure_collection(&mut self, property: impl Into<String>) {
        self.collections.entry(property.into()).or_default();
    }

    /// Add a bean to a to-many backing collection, creating the
    /// container on first use. `modify_listen` additionally marks the
    /// collection as modified, for dirty-checking surfaces.
    pub fn add_to_collection(
        &mut self,
        property: impl Into<String>,
        bean: EntityRef,
        modify_listen: bool,
    ) {
        let property = property.into();
        if modify_listen {
            self.modified.insert(property.clone());
        }
        self.collections.entry(property).or_default().push(bean);
    }

    /// Backing collection contents, or `None` if never materialized.
    #[must_use]
    pub fn collection(&self, property: &str) -> Option<&[EntityRef]> {
        self.collections.get(property).map(Vec::as_slice)
    }

    /// True if the collection was marked modified when populated.
    #[must_use]
    pub fn is_collection_modified(&self, property: &str) -> bool {
        self.modified.contains(property)
    }

    /// Wrap into a shared handle.
    #[must_use]
    pub fn into_ref(self) -> EntityRef {
        Rc::new(RefCell::new(self))
    }
}

///
/// RowContext
///
/// The row read context: the sole boundary where the engine may touch
/// database I/O. Implementations are positioned implicitly at the
/// current row, support repeated ordered column reads, and own
/// identity-based merging when the same entity recurs across rows.
///

pub trait RowContext {
    /// Read one column of the current row. `prefix` is the relationship
    /// path of the node performing the read (empty at the root).
    fn read_column(&mut self, prefix: &str, column: &str) -> Result<Value, RowError>;

    /// Resolve `fresh` against the execution's identity map: return the
    /// already-loaded bean for `(entity, id)` when present, otherwise
    /// adopt `fresh` as that identity's bean.
    fn contextual(&mut self, entity: &str, id: &Value, fresh: EntityRow) -> EntityRef;
}

/// Qualified column key for a node prefix.
#[must_use]
pub fn qualified_column(prefix: &str, column: &str) -> String {
    if prefix.is_empty() {
        column.to_string()
    } else {
        format!("{prefix}.{column}")
    }
}
