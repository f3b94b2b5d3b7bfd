//! Gate error types.
//!
//! Quality defects are never errors: they are returned as issues and
//! warnings. These types cover configuration and the vision side channel.

use thiserror::Error;

/// Errors raised while building a gate.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("invalid gate configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for gate setup.
pub type GateResult<T> = Result<T, GateError>;

/// Failures of a vision validator. Always downgraded to warnings.
#[derive(Debug, Clone, Error)]
pub enum VisionError {
    #[error("vision model unavailable: {0}")]
    Unavailable(String),

    #[error("vision model returned an unusable response: {0}")]
    InvalidResponse(String),

    #[error("rasterization failed: {0}")]
    Rasterization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GateError::InvalidConfig("pass_threshold must be at most 100".into());
        assert_eq!(
            err.to_string(),
            "invalid gate configuration: pass_threshold must be at most 100"
        );

        let err = VisionError::Unavailable("connection refused".into());
        assert_eq!(err.to_string(), "vision model unavailable: connection refused");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GateError>();
        assert_send_sync::<VisionError>();
    }
}
