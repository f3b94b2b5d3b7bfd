//! Error types for synthesis and the component library.

use thiserror::Error;
use vexel_types::NumericError;

/// Errors that abort a synthesis call. No partial document is ever returned.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Invalid position coordinates for component '{id}': ({x}, {y})")]
    InvalidPosition { id: String, x: String, y: String },

    #[error("Invalid size dimensions for component '{id}': {width}x{height}")]
    InvalidSize {
        id: String,
        width: String,
        height: String,
    },

    #[error("Size dimensions must be positive for component '{id}': {width}x{height}")]
    NonPositiveSize {
        id: String,
        width: String,
        height: String,
    },

    #[error("Invalid composition plan: {0}")]
    InvalidPlan(String),

    #[error(transparent)]
    NonFinite(#[from] NumericError),

    #[error("component library error: {0}")]
    Library(#[from] LibraryError),
}

/// Result type for synthesis operations.
pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Errors from a component library.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("cannot instantiate template '{template_id}': {reason}")]
    Instantiation { template_id: String, reason: String },

    #[error(transparent)]
    NonFinite(#[from] NumericError),
}
