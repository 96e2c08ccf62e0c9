//! Repository and endpoint detection

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use url::Url;

/// Build a `PlatformConfig` from a repository identifier and an API URL
///
/// Accepts the `owner/repo` form used by `GITHUB_REPOSITORY` as well as
/// remote URLs:
/// - `https://github.com/owner/repo.git`
/// - `git@github.com:owner/repo.git`
pub fn parse_repo_info(repository: &str, api_url: &str) -> Result<PlatformConfig> {
    let repository = repository.trim();

    let path = if let Some(rest) = repository.strip_prefix("git@") {
        // SSH: git@host:owner/repo.git
        rest.split_once(':')
            .map(|(_, path)| path.to_string())
            .ok_or_else(|| invalid_repo(repository))?
    } else if repository.contains("://") {
        let url = Url::parse(repository).map_err(|_| invalid_repo(repository))?;
        url.path().to_string()
    } else {
        repository.to_string()
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let (owner, repo) = path
        .split_once('/')
        .ok_or_else(|| invalid_repo(repository))?;

    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(invalid_repo(repository));
    }

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        api_url: normalize_api_url(api_url)?,
    })
}

/// Validate an API base URL and strip trailing slashes
pub fn normalize_api_url(api_url: &str) -> Result<String> {
    let url = Url::parse(api_url.trim())
        .map_err(|e| Error::Config(format!("invalid API URL '{api_url}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "invalid API URL '{api_url}': scheme must be http or https"
        )));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn invalid_repo(repository: &str) -> Error {
    Error::Config(format!(
        "cannot determine owner/repo from '{repository}' (expected 'owner/repo')"
    ))
}
