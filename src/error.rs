use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for tpie-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Unable to locate the file: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Version control operation failed: {0}")]
    ExternalTool(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed changelog: {0}")]
    Changelog(String),

    #[error("Malformed manifest: {0}")]
    Manifest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Logical guards that stop a release step before anything is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Version has not been set")]
    EmptyVersion,

    #[error("Descriptor has no version field (expected one of {expected})")]
    NoVersionField { expected: String },

    #[error("Version has not been updated: descriptor `{descriptor}` == changelog `{changelog}`")]
    VersionUnchanged {
        descriptor: String,
        changelog: String,
    },

    #[error("Descriptor already carries version `{version}`")]
    DescriptorUnchanged { version: String },

    #[error("Versions are the same. Current: {current} | New: {new}")]
    ManifestUnchanged { current: String, new: String },

    #[error("Current branch is not `{expected}`: {actual}")]
    BranchMismatch { expected: String, actual: String },

    #[error("No new commits since last version: {last_commit} == {head}")]
    NoNewCommits { last_commit: String, head: String },
}

/// Convenience type alias for Results in tpie-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        ReleaseError::MissingFile { path: path.into() }
    }

    pub fn external(msg: impl Into<String>) -> Self {
        ReleaseError::ExternalTool(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    pub fn changelog(msg: impl Into<String>) -> Self {
        ReleaseError::Changelog(msg.into())
    }

    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseError::Manifest(msg.into())
    }

    /// Returns the validation guard that fired, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ReleaseError::Validation(v) => Some(v),
            _ => None,
        }
    }
}
