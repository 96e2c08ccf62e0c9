//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{Branch, BranchRef, MergeResult, PlatformConfig};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Message GitHub returns when creating a ref that is already present
const REFERENCE_EXISTS_MESSAGE: &str = "Reference already exists";

/// Structured validation code for the same condition
const ALREADY_EXISTS_CODE: &str = "already_exists";

// REST response types

#[derive(Deserialize)]
struct CommitPointer {
    sha: String,
}

#[derive(Deserialize)]
struct BranchResponse {
    name: String,
    commit: CommitPointer,
}

#[derive(Deserialize)]
struct RefResponse {
    #[serde(rename = "ref")]
    ref_name: String,
    object: CommitPointer,
}

impl From<RefResponse> for BranchRef {
    fn from(r: RefResponse) -> Self {
        Self {
            ref_name: r.ref_name,
            sha: r.object.sha,
        }
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// GitHub service using octocrab
///
/// Ref and branch calls go through octocrab. The merge call uses a raw
/// request because the endpoint answers 204 with an empty body when there
/// is nothing to merge.
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (merge endpoint)
    token: String,
    /// HTTP client for raw requests (merge endpoint)
    http_client: Client,
}

impl GitHubService {
    /// Create a new GitHub service for the configured repository
    pub fn new(token: &str, config: PlatformConfig) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(config.api_url.as_str())
            .map_err(|e| Error::Config(format!("invalid API URL '{}': {e}", config.api_url)))?
            .build()
            .map_err(|e| Error::Platform(format!("Failed to create GitHub client: {e}")))?;

        let http_client = Client::builder()
            .user_agent(concat!("merge-down/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Platform(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
        })
    }

    fn repo_route(&self, tail: &str) -> String {
        format!("/repos/{}/{}/{tail}", self.config.owner, self.config.repo)
    }
}

/// Percent-encode each segment of a branch or ref path, keeping the slashes
fn encode_ref_path(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a 422 body describes a ref that already exists
///
/// Prefers the structured `already_exists` validation code and falls back to
/// the human-readable message.
fn is_reference_exists(message: &str, errors: Option<&[serde_json::Value]>) -> bool {
    let has_code = errors.is_some_and(|errors| {
        errors.iter().any(|e| {
            e.get("code").and_then(serde_json::Value::as_str) == Some(ALREADY_EXISTS_CODE)
        })
    });

    has_code || message.contains(REFERENCE_EXISTS_MESSAGE)
}

/// Build an error from a non-success raw response
async fn error_from_response(status: StatusCode, response: reqwest::Response) -> Error {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    Error::GitHubApi {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn merge_branches(&self, base: &str, head: &str, message: &str) -> Result<MergeResult> {
        #[derive(Serialize)]
        struct MergeRequest<'a> {
            base: &'a str,
            head: &'a str,
            commit_message: &'a str,
        }

        debug!(base, head, "merging branches");

        let url = format!("{}{}", self.config.api_url, self.repo_route("merges"));

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&MergeRequest {
                base,
                head,
                commit_message: message,
            })
            .send()
            .await
            .map_err(|e| Error::Platform(format!("Failed to send merge request: {e}")))?;

        let status = response.status();
        match status {
            StatusCode::NO_CONTENT => {
                debug!(base, head, "base already contains head");
                Ok(MergeResult::UpToDate)
            }
            StatusCode::CONFLICT => {
                debug!(base, head, "merge conflict");
                Err(Error::MergeConflict {
                    base: base.to_string(),
                    head: head.to_string(),
                })
            }
            s if s.is_success() => {
                let commit: CommitPointer = response
                    .json()
                    .await
                    .map_err(|e| Error::Platform(format!("Failed to parse merge response: {e}")))?;
                debug!(base, head, sha = %commit.sha, "merged branches");
                Ok(MergeResult::Merged { sha: commit.sha })
            }
            _ => Err(error_from_response(status, response).await),
        }
    }

    async fn get_branch(&self, name: &str) -> Result<Branch> {
        debug!(branch = name, "getting branch");

        let route = self.repo_route(&format!("branches/{}", encode_ref_path(name)));
        let branch: BranchResponse = self
            .client
            .get(route, None::<&()>)
            .await
            .map_err(|e| match e {
                octocrab::Error::GitHub { ref source, .. }
                    if source.status_code.as_u16() == 404 =>
                {
                    Error::BranchNotFound(name.to_string())
                }
                other => other.into(),
            })?;

        debug!(branch = %branch.name, sha = %branch.commit.sha, "got branch");
        Ok(Branch {
            name: branch.name,
            sha: branch.commit.sha,
        })
    }

    async fn create_ref(&self, ref_name: &str, sha: &str) -> Result<BranchRef> {
        debug!(ref_name, sha, "creating ref");

        let body = serde_json::json!({
            "ref": ref_name,
            "sha": sha,
        });
        let created: RefResponse = self
            .client
            .post(self.repo_route("git/refs"), Some(&body))
            .await
            .map_err(|e| match e {
                octocrab::Error::GitHub { ref source, .. }
                    if source.status_code.as_u16() == 422
                        && is_reference_exists(&source.message, source.errors.as_deref()) =>
                {
                    Error::ReferenceExists(ref_name.to_string())
                }
                other => other.into(),
            })?;

        debug!(ref_name = %created.ref_name, "created ref");
        Ok(created.into())
    }

    async fn update_ref(&self, ref_name: &str, sha: &str, force: bool) -> Result<BranchRef> {
        debug!(ref_name, sha, force, "updating ref");

        let body = serde_json::json!({
            "sha": sha,
            "force": force,
        });
        let route = self.repo_route(&format!("git/refs/{}", encode_ref_path(ref_name)));
        let updated: RefResponse = self.client.patch(route, Some(&body)).await?;

        debug!(ref_name = %updated.ref_name, "updated ref");
        Ok(updated.into())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
