//! GitHub token resolution

use super::AuthSource;
use crate::error::{Error, Result};
use tracing::debug;

/// Environment variables checked when no token is passed explicitly
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolved GitHub credential
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// The access token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve a token from the process environment
pub fn get_github_auth(explicit: Option<&str>) -> Result<GitHubAuthConfig> {
    resolve_github_token(explicit, |name| std::env::var(name).ok())
}

/// Resolve a token from an explicit value, falling back to `lookup`
///
/// Blank values are treated as absent.
pub fn resolve_github_token<F>(explicit: Option<&str>, lookup: F) -> Result<GitHubAuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        debug!("using explicit GitHub token");
        return Ok(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Input,
        });
    }

    for var in TOKEN_ENV_VARS {
        if let Some(token) = lookup(var).filter(|t| !t.trim().is_empty()) {
            debug!(var, "using GitHub token from environment");
            return Ok(GitHubAuthConfig {
                token: token.trim().to_string(),
                source: AuthSource::EnvVar,
            });
        }
    }

    Err(Error::Auth(
        "no GitHub token: pass --github-token, set the github_token input, or export GITHUB_TOKEN"
            .to_string(),
    ))
}
