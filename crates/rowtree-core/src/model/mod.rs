//! Runtime entity metadata consumed by tree building and binding.
//!
//! Descriptors are built once at metadata time and shared behind `Arc`
//! for the lifetime of the mapper; nothing here is per-execution state.

pub mod entity;
pub mod property;
pub mod registry;

pub use entity::{AssocCardinality, AssocModel, EmbeddedModel, EntityDescriptor};
pub use property::PropertyModel;
pub use registry::DescriptorRegistry;

use thiserror::Error as ThisError;

///
/// ModelError
///

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("unknown entity: '{name}'")]
    UnknownEntity { name: String },

    #[error("unknown association: '{property}' on entity '{entity}'")]
    UnknownAssoc { entity: String, property: String },

    #[error("entity '{name}' registered twice")]
    DuplicateEntity { name: String },
}
