/*!
 * Error types for the modeler
 */

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelerError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_FATAL: i32 = 2;

#[derive(Error, Debug)]
pub enum ModelerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file could not be parsed
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested file filter does not exist
    #[error("unknown file type <{0}>")]
    UnknownFilter(String),

    /// Requested execution platform has no engine profile
    #[error("no profile for platform <{0}>")]
    UnknownPlatform(String),

    /// Endpoint could not be assembled from arguments and config
    #[error("Invalid endpoint: {0}")]
    Endpoint(String),
}

impl ModelerError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ModelerError::Config(_)
            | ModelerError::ConfigParse { .. }
            | ModelerError::Endpoint(_)
            | ModelerError::UnknownFilter(_)
            | ModelerError::UnknownPlatform(_) => EXIT_FATAL,
            ModelerError::Io(_) | ModelerError::Json(_) => EXIT_FAILURE,
        }
    }

    /// Check if this error is caused by bad input rather than a failed operation
    pub fn is_fatal(&self) -> bool {
        self.exit_code() == EXIT_FATAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ModelerError::Config("x".into()).exit_code(), EXIT_FATAL);
        assert_eq!(ModelerError::Endpoint("x".into()).exit_code(), EXIT_FATAL);
        assert_eq!(
            ModelerError::Io(io::Error::other("disk")).exit_code(),
            EXIT_FAILURE
        );
        assert!(!ModelerError::Io(io::Error::other("disk")).is_fatal());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ModelerError::UnknownPlatform("Camunda Foo".into()).to_string(),
            "no profile for platform <Camunda Foo>"
        );
        assert_eq!(
            ModelerError::UnknownFilter("docx".into()).to_string(),
            "unknown file type <docx>"
        );
    }
}
