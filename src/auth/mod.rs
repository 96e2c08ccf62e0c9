//! Authentication for GitHub
//!
//! Supports the action's `github_token` input and environment variables.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, resolve_github_token};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed explicitly (flag or `INPUT_GITHUB_TOKEN`)
    Input,
    /// Token from environment variable
    EnvVar,
}
