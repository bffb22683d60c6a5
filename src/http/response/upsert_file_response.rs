use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpsertFileResponse {
    pub content: Option<Content>,
    pub commit: CommitResponse,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    pub path: String,
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub struct CommitResponse {
    pub sha: String,
    pub html_url: String,
}
