use crate::{
    mail::MailError,
    relay::{ErrorKind, RelayError},
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Every failure leaves the relay as `{ "error": ... }`; relay failures also
/// carry their `kind`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Relay(RelayError),
    Mail(MailError),
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ErrorKind>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Mail(MailError::InvalidRecipient(_)) => StatusCode::BAD_REQUEST,
            ApiError::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::BadRequest(message) | ApiError::Internal(message) => ErrorBody {
                error: message,
                kind: None,
            },
            ApiError::Relay(err) => ErrorBody {
                kind: Some(err.kind()),
                error: err.to_string(),
            },
            ApiError::Mail(err) => {
                log::error!("Email dispatch failed: {}", err);
                ErrorBody {
                    error: err.to_string(),
                    kind: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        ApiError::Relay(err)
    }
}

impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        ApiError::Mail(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_answer_every_relay_failure_with_500() {
        for error in [
            RelayError::Validation("bad repo".to_owned()),
            RelayError::Auth("Bad credentials".to_owned()),
            RelayError::NotFound("Not Found".to_owned()),
            RelayError::Conflict("sha mismatch".to_owned()),
            RelayError::UnknownRemote("boom".to_owned()),
            RelayError::Unconfirmed("unreadable body".to_owned()),
        ] {
            assert_eq!(
                ApiError::Relay(error).status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn should_answer_bad_recipients_with_400() {
        let error = ApiError::Mail(MailError::InvalidRecipient("nope".to_owned()));

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }
}
