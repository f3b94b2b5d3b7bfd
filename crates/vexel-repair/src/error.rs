use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepairError {
    #[error("markup has no <svg> root element")]
    NotSvg,

    #[error("invalid repair pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type RepairResult<T> = Result<T, RepairError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(RepairError::NotSvg.to_string(), "markup has no <svg> root element");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RepairError>();
    }
}
