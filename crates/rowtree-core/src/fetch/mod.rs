//! Fetch plans: per-relationship-path decisions about how related data
//! is obtained (inline join, batched query, lazy load, or cache lookup).


pub mod config;
pub mod path;
pub mod plan;

pub use config::{FetchConfig, FetchMode};
pub use path::RelationPath;
pub use plan::{FetchPlan, SecondaryQuery};

use thiserror::Error as ThisError;

///
/// FetchError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum FetchError {
    #[error("fetch batch size must be at least 1, got {batch_size}")]
    InvalidBatchSize { batch_size: u32 },

    #[error("relation path must not be empty or contain empty segments: '{path}'")]
    InvalidPath { path: String },
}
