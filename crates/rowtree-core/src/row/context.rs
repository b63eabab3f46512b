use crate::{
    row::{EntityRef, EntityRow, RowContext, RowError, qualified_column},
    value::Value,
};
use std::collections::BTreeMap;

///
/// BufferedRowContext
///
/// In-memory [`RowContext`] backed by pre-fetched rows. The execution
/// layer positions it one row at a time; the identity map lives for the
/// whole execution so that the one side of a flattened to-many join is
/// merged rather than re-allocated on every row.
///

#[derive(Debug, Default)]
pub struct BufferedRowContext {
    current: Option<BTreeMap<String, Value>>,
    identity: BTreeMap<(String, Value), EntityRef>,
}

impl BufferedRowContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Position the context on the next row. Keys are qualified column
    /// names (`details.id`), values the column values.
    pub fn position(&mut self, row: impl IntoIterator<Item = (String, Value)>) {
        self.current = Some(row.into_iter().collect());
    }

    /// Number of distinct entity identities seen this execution.
    #[must_use]
    pub fn identity_count(&self) -> usize {
        self.identity.len()
    }
}

impl RowContext for BufferedRowContext {
    fn read_column(&mut self, prefix: &str, column: &str) -> Result<Value, RowError> {
        let key = qualified_column(prefix, column);
        let row = self.current.as_ref().ok_or(RowError::NoCurrentRow)?;

        row.get(&key)
            .cloned()
            .ok_or(RowError::MissingColumn { column: key })
    }

    fn contextual(&mut self, entity: &str, id: &Value, fresh: EntityRow) -> EntityRef {
        self.identity
            .entry((entity.to_string(), id.clone()))
            .or_insert_with(|| fresh.into_ref())
            .clone()
    }
}
