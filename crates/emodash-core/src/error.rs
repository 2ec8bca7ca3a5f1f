//! Error types for the core library.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Store round trip failed.
    #[error("Store error: {0}")]
    Store(#[from] emodash_api::Error),

    /// User input was rejected before any request was issued.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
