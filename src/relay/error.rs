use crate::http::response::ErrorResponse;
use serde::Serialize;
use thiserror::Error;

/// Machine-readable failure class reported next to the human message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Auth,
    NotFound,
    Conflict,
    Remote,
    Unconfirmed,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Validation(String),
    #[error("Authentication failed: the token is invalid or lacks write access to this repository ({0})")]
    Auth(String),
    #[error("Repository or file not found: check the repository name, the file path and that the token can access it ({0})")]
    NotFound(String),
    #[error("Conflict: the file may have been modified since it was read, fetch it again and retry ({0})")]
    Conflict(String),
    #[error("{0}")]
    UnknownRemote(String),
    #[error("GitHub accepted the write but its reply could not be read, check the repository before retrying ({0})")]
    Unconfirmed(String),
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::Validation(_) => ErrorKind::Validation,
            RelayError::Auth(_) => ErrorKind::Auth,
            RelayError::NotFound(_) => ErrorKind::NotFound,
            RelayError::Conflict(_) => ErrorKind::Conflict,
            RelayError::UnknownRemote(_) => ErrorKind::Remote,
            RelayError::Unconfirmed(_) => ErrorKind::Unconfirmed,
        }
    }

    /// Maps a GitHub status code onto the relay taxonomy.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        let detail = detail.into();

        match status {
            401 | 403 => RelayError::Auth(detail),
            404 => RelayError::NotFound(detail),
            409 | 422 => RelayError::Conflict(detail),
            _ => RelayError::UnknownRemote(format!("GitHub responded with {status}: {detail}")),
        }
    }
}

impl From<ErrorResponse> for RelayError {
    fn from(response: ErrorResponse) -> Self {
        RelayError::from_status(response.status, response.message)
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::UnknownRemote(format!("Request to GitHub failed: {err}"))
    }
}
