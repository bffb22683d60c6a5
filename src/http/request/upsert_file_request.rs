use base64::{prelude::BASE64_STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
///
/// `sha` must carry the current blob id when the file already exists and be
/// left out when it is being created.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertFileRequest {
    pub message: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl UpsertFileRequest {
    pub fn new(
        message: impl Into<String>,
        content: &str,
        branch: Option<String>,
        sha: Option<String>,
    ) -> Self {
        Self {
            message: message.into(),
            content: BASE64_STANDARD.encode(content.as_bytes()),
            branch,
            sha,
        }
    }
}
