//! Core runtime for Rowtree: entity metadata, fetch plans, result-tree row
//! mapping, and the column binders used for persisting embedded values.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod bind;
pub mod error;
pub mod fetch;
pub mod model;
pub mod obs;
pub mod row;
pub mod tree;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Table alias used for the root node of a compiled result tree.
///
/// Child aliases are derived from relationship paths, so only the root
/// needs a reserved name.
pub const ROOT_ALIAS: &str = "t0";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, factories, contexts, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        fetch::{FetchConfig, FetchMode, FetchPlan, RelationPath},
        model::{AssocCardinality, EntityDescriptor, PropertyModel},
        tree::JoinType,
        value::Value,
    };
}
