//! Error types for snapshot loading and inference

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Core error: {0}")]
    Core(#[from] interval_core::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingColumn("response".to_string());
        assert_eq!(err.to_string(), "Missing column: response");

        let err = Error::InvalidRecord {
            line: 7,
            reason: "unreadable comprehension flag".to_string(),
        };
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_from_core() {
        let core = interval_core::Error::empty_input("t-test");
        let err: Error = core.into();
        assert!(matches!(err, Error::Core(_)));
    }
}
