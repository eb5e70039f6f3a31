//! Error types for sample organization and the command-line front end.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while placing a single file or listing a directory.
///
/// None of these stop a run: the organizer reports them and moves on to the
/// next file (or the next sibling directory, for listing failures).
#[derive(Error, Debug)]
pub enum OrganizeError {
    /// Failed to create a category directory.
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to copy a sample to its destination.
    #[error("Failed to copy {} to {}: {source}", .source_path.display(), .destination.display())]
    CopyFailed {
        source_path: PathBuf,
        destination: PathBuf,
        source: std::io::Error,
    },
    /// Failed to delete a stale file left in the destination tree.
    #[error("Failed to remove existing file {}: {source}", .path.display())]
    RemoveFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Could not determine whether a destination path exists.
    #[error("Failed to check {}: {source}", .path.display())]
    ExistsCheckFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Could not enumerate the entries of a source directory.
    #[error("Failed to read directory {}: {source}", .path.display())]
    DirectoryListFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Errors that abort the command-line run before traversal starts.
#[derive(Error, Debug)]
pub enum CliError {
    /// The source folder does not exist.
    #[error("Source folder does not exist: {}", .0.display())]
    SourceMissing(PathBuf),
    /// Reading an answer from the terminal failed.
    #[error("Failed to read input: {0}")]
    Prompt(#[source] std::io::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::SourceMissing(_) => 1,
            CliError::Prompt(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_missing_exit_code() {
        let err = CliError::SourceMissing(PathBuf::from("/no/such/samples"));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("/no/such/samples"));
    }

    #[test]
    fn test_copy_failed_message_names_both_paths() {
        let err = OrganizeError::CopyFailed {
            source_path: PathBuf::from("in/kick.wav"),
            destination: PathBuf::from("out/Drums/Kick/kick.wav"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("in/kick.wav"));
        assert!(message.contains("out/Drums/Kick/kick.wav"));
        assert!(message.contains("denied"));
    }
}
