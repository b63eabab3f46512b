use crate::{bind::BindError, fetch::FetchError, model::ModelError, tree::TreeError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error surface for the crate. Every module keeps its own
/// error enum; this type only fans them in for callers that do not care
/// which layer failed.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BindError(#[from] BindError),

    #[error(transparent)]
    FetchError(#[from] FetchError),

    #[error(transparent)]
    ModelError(#[from] ModelError),

    #[error(transparent)]
    TreeError(#[from] TreeError),
}
