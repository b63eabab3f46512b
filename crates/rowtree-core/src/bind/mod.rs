//! Column binders for DML statements: per-property binders, embedded
//! composites, and the factories that assemble them at metadata time.
//!
//! Binder lists are built once per descriptor and shared; the
//! [`BindParams`] buffer they write into is per-execution.


pub mod bindable;
pub mod dml;
pub mod embedded;
pub mod property;

pub use bindable::{BindParams, Bindable, BindableEmbedded, BindableProperty, BoundParam, BoundValue};
pub use dml::DmlMode;
pub use embedded::EmbeddedBindFactory;
pub use property::PropertyBindFactory;

use thiserror::Error as ThisError;

///
/// BindError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum BindError {
    #[error("no value for non-nullable property '{property}' on entity '{entity}'")]
    MissingValue { entity: String, property: String },
}
