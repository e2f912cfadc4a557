//! Error types for the task store and repository

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for task operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad user input: empty title, malformed date, id already taken
    #[error("Invalid input: {0}")]
    Validation(String),

    /// No task carries the referenced id
    #[error("Task not found: {0}")]
    NotFound(u64),

    /// The persisted file exists but is not a valid task document
    #[error("Task file {path} is corrupt: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Io(_) => 1,
            Error::Validation(_) => 2,
            Error::NotFound(_) => 3,
            Error::CorruptStore { .. } => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let corrupt = Error::CorruptStore {
            path: PathBuf::from("tasks.json"),
            source: serde_json::from_str::<u8>("nope").unwrap_err(),
        };
        let codes = [
            Error::Io(std::io::Error::other("disk")).exit_code(),
            Error::validation("empty title").exit_code(),
            Error::NotFound(7).exit_code(),
            corrupt.exit_code(),
        ];
        assert_eq!(codes, [1, 2, 3, 4]);
    }

    #[test]
    fn not_found_message_names_the_id() {
        assert_eq!(Error::NotFound(42).to_string(), "Task not found: 42");
    }
}
