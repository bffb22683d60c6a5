use serde::Deserialize;

/// `GET /repos/{owner}/{repo}/contents/{path}` answers with an object for a
/// single entry and with an array when the path is a directory.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContentsResponse {
    Entry(FileShaResponse),
    Listing(Vec<serde_json::Value>),
}

#[derive(Debug, Deserialize)]
pub struct FileShaResponse {
    pub sha: String,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FileShaResponse {
    pub fn is_file(&self) -> bool {
        self.kind == "file"
    }
}
