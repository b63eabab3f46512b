//! The compiled result tree: per-query node structure that maps flat
//! result rows back into object graphs and drives join emission.
//!
//! Trees are compiled once per query and immutable afterwards; many
//! concurrent executions may traverse the same tree. All per-row state
//! lives in the [`RowContext`](crate::row::RowContext) each execution
//! supplies.

#[cfg(test)]
mod tests;

pub mod build;
pub mod from;
pub mod join;
pub mod node;

pub use build::{CompiledTree, TreeBuilder};
pub use from::{FromClause, JoinFragment};
pub use join::JoinType;
pub use node::ResultTreeNode;

use crate::{fetch::FetchError, model::ModelError, row::RowError};
use thiserror::Error as ThisError;

///
/// TreeError
///

#[derive(Debug, ThisError)]
pub enum TreeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Row(#[from] RowError),

    #[error("fetch path '{path}' has no joined ancestor chain from the root entity")]
    OrphanPath { path: String },
}
