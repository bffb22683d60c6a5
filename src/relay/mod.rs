mod error;

pub use error::{ErrorKind, RelayError};

use crate::github::{handler::BuilderExecutor, github_client::GithubClient, RepositoryId};
use std::fmt;

/// Bearer token supplied by the caller for a single push. Never printed.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone)]
pub struct PushRequest {
    pub repository: String,
    pub path: String,
    pub content: String,
    pub message: String,
    pub credential: Credential,
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub url: String,
    pub sha: String,
}

/// Writes `request.content` to `request.path`, creating the file or updating
/// it against the blob id GitHub currently reports.
///
/// Nothing is retried: a blob id that changed between the lookup and the
/// write comes back as [`RelayError::Conflict`].
pub async fn push_file(github: &GithubClient, request: PushRequest) -> Result<Commit, RelayError> {
    let repository = RepositoryId::parse(&request.repository)?;
    let path = normalize_path(&request.path)?;

    log::info!(
        "Pushing {} to {}/{}",
        path,
        repository.owner,
        repository.name
    );

    let mut builder = github
        .repo(&repository)
        .upsert_file()
        .path(path)
        .content(request.content)
        .message(request.message)
        .token(request.credential);

    if let Some(branch) = request.branch.filter(|branch| !branch.is_empty()) {
        builder = builder.branch(branch);
    }

    let result = builder.execute().await;

    match &result {
        Ok(commit) => log::info!("Pushed commit {}", commit.sha),
        Err(err) => log::warn!("Push to {} failed ({:?}): {}", repository, err.kind(), err),
    }

    result
}

fn normalize_path(path: &str) -> Result<String, RelayError> {
    let path = path.trim().trim_matches('/');

    if path.is_empty() {
        return Err(RelayError::Validation("File path must not be empty".to_owned()));
    }

    if path.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        return Err(RelayError::Validation(format!(
            "File path {path} contains an empty or relative segment"
        )));
    }

    Ok(path.to_owned())
}
