//! Error types for the test runner
//!
//! Messages quote the offending value so that a failing run tells the
//! operator exactly which file, name or field to look at.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the test runner
#[derive(Error, Debug)]
pub enum Error {
    // === Description Errors ===
    #[error("Malformed testcase description: {0}")]
    Format(String),

    #[error("Testcase description is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("Missing testcase description: '{}'", .0.display())]
    DescriptionNotFound(PathBuf),

    // === Resolution Errors ===
    #[error("Testcase '{0}' not found")]
    NotFound(String),

    #[error("Testcase '{}' does not have the '.{}' extension", path.display(), expected)]
    InvalidExtension { path: PathBuf, expected: String },

    // === Execution Errors ===
    #[error("Failed to execute '{program}' ({kind:?}): {message}")]
    Execution {
        program: String,
        kind: io::ErrorKind,
        message: String,
    },

    #[error("Execution timed out after {0} seconds")]
    ExecutionTimeout(u64),

    #[error("Execution interrupted")]
    Interrupted,

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write file '{path}': {error}")]
    FileWrite { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an execution error from the io error raised while talking to `program`
    pub fn execution(program: &str, error: &io::Error) -> Self {
        Self::Execution {
            program: program.to_string(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    /// Create an invalid extension error
    pub fn invalid_extension(path: impl Into<PathBuf>, expected: &str) -> Self {
        Self::InvalidExtension {
            path: path.into(),
            expected: expected.to_string(),
        }
    }

    /// Whether lenient decoding may replace this error with a default description
    pub fn is_recoverable_description(&self) -> bool {
        matches!(
            self,
            Error::Format(_) | Error::MissingField(_) | Error::DescriptionNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_description_errors() {
        assert!(Error::Format("x".into()).is_recoverable_description());
        assert!(Error::MissingField("returncode").is_recoverable_description());
        assert!(Error::DescriptionNotFound(PathBuf::from("a.txt")).is_recoverable_description());
        assert!(!Error::NotFound("a".into()).is_recoverable_description());
        assert!(!Error::Interrupted.is_recoverable_description());
    }

    #[test]
    fn test_messages_quote_offending_value() {
        let err = Error::invalid_extension("tests/foo.c", "mx");
        assert_eq!(
            err.to_string(),
            "Testcase 'tests/foo.c' does not have the '.mx' extension"
        );
        assert_eq!(
            Error::NotFound("hello".into()).to_string(),
            "Testcase 'hello' not found"
        );
    }

    #[test]
    fn test_execution_error_keeps_kind() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        match Error::execution("./Masfix", &io_err) {
            Error::Execution { program, kind, .. } => {
                assert_eq!(program, "./Masfix");
                assert_eq!(kind, io::ErrorKind::NotFound);
            }
            other => panic!("Expected Execution error, got {other:?}"),
        }
    }
}
