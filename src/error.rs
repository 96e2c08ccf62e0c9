//! Error types for merge-down

use thiserror::Error;

/// Errors produced while synchronizing branches
#[derive(Error, Debug)]
pub enum Error {
    /// The hosting service refused the merge because of conflicting changes
    #[error("merge conflict: could not merge '{head}' into '{base}'")]
    MergeConflict {
        /// Branch receiving the merge
        base: String,
        /// Branch being merged in
        head: String,
    },

    /// Reference creation was rejected because the reference already exists
    #[error("reference already exists: {0}")]
    ReferenceExists(String),

    /// Branch lookup found no such branch
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// GitHub answered with an error status
    #[error("GitHub API error ({status}): {message}")]
    GitHubApi {
        /// HTTP status code
        status: u16,
        /// Message from the error body
        message: String,
    },

    /// Transport or decoding failure talking to the platform
    #[error("platform error: {0}")]
    Platform(String),

    /// No usable credential
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Failure writing workflow outputs
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invariant violation
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => Self::GitHubApi {
                status: source.status_code.as_u16(),
                message: source.message,
            },
            other => Self::Platform(other.to_string()),
        }
    }
}
