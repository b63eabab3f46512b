use crate::{ROOT_ALIAS, tree::JoinType};
use std::collections::BTreeSet;

///
/// JoinFragment
///
/// One relationship path's contribution to the SQL from clause. Rendering
/// actual SQL text is dialect work owned by other layers; the tree only
/// records which table joins at which path with which join type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JoinFragment {
    /// Relationship path doubling as the join alias.
    pub path: String,
    pub table: String,
    pub join: JoinType,
}

///
/// FromClause
///
/// From-clause builder fed by `append_from` walks. Contributions are
/// deduplicated by path: nodes sharing a path prefix contribute that
/// prefix once, first contribution wins.
///

#[derive(Debug, Default)]
pub struct FromClause {
    root: Option<String>,
    joins: Vec<JoinFragment>,
    seen: BTreeSet<String>,
}

impl FromClause {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the root table. Repeated calls keep the first.
    pub fn append_root(&mut self, table: &str) {
        if self.root.is_none() {
            self.root = Some(table.to_string());
        }
    }

    /// Record one join contribution, deduplicating by path.
    pub fn append_join(&mut self, path: &str, table: &str, join: JoinType) {
        if !self.seen.insert(path.to_string()) {
            return;
        }
        self.joins.push(JoinFragment {
            path: path.to_string(),
            table: table.to_string(),
            join,
        });
    }

    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    #[must_use]
    pub fn joins(&self) -> &[JoinFragment] {
        &self.joins
    }

    /// Join type recorded for a path, if the path joined at all.
    #[must_use]
    pub fn join_for(&self, path: &str) -> Option<JoinType> {
        self.joins
            .iter()
            .find(|fragment| fragment.path == path)
            .map(|fragment| fragment.join)
    }

    /// Render a stable summary for debug logging.
    #[must_use]
    pub fn debug_summary(&self) -> String {
        let root = self.root.as_deref().unwrap_or("?");
        let parts: Vec<String> = self
            .joins
            .iter()
            .map(|fragment| format!("{} {}[{}]", fragment.join, fragment.table, fragment.path))
            .collect();
        format!("{root} {ROOT_ALIAS} | {}", parts.join(", "))
    }
}
