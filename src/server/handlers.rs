use super::{error::ApiError, AppState};
use crate::{
    mail::MailMode,
    relay::{self, Credential, PushRequest},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub email_service: MailMode,
}

/// `GET /api/status`
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        email_service: state.mailer.mode(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SendTestEmailBody {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `POST /api/send-test-email`
pub async fn send_test_email(
    State(state): State<AppState>,
    body: Result<Json<SendTestEmailBody>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let email = body
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Email address is required".to_owned()))?;

    let message = state.mailer.send_test(&email).await?;

    Ok(Json(MessageResponse { message }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushCodeBody {
    pub repo: Option<String>,
    pub file_path: Option<String>,
    pub content: Option<String>,
    pub message: Option<String>,
    pub token: Option<String>,
    pub branch: Option<String>,
}

impl PushCodeBody {
    fn into_push_request(self) -> Result<PushRequest, ApiError> {
        let fields = [
            ("repo", &self.repo),
            ("filePath", &self.file_path),
            ("content", &self.content),
            ("message", &self.message),
            ("token", &self.token),
        ];

        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(ApiError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(PushRequest {
            repository: self.repo.unwrap_or_default(),
            path: self.file_path.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
            credential: Credential::new(self.token.unwrap_or_default()),
            branch: self.branch,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushCodeResponse {
    pub success: bool,
    pub commit_url: String,
}

/// `POST /api/push-code`
pub async fn push_code(
    State(state): State<AppState>,
    body: Result<Json<PushCodeBody>, JsonRejection>,
) -> Result<Json<PushCodeResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let request = body.into_push_request()?;

    let commit = relay::push_file(&state.github, request).await?;

    Ok(Json(PushCodeResponse {
        success: true,
        commit_url: commit.url,
    }))
}

#[derive(Debug, Serialize)]
pub struct DocsContentResponse {
    pub content: String,
}

/// `GET /api/docs/content`
pub async fn docs_content(
    State(state): State<AppState>,
) -> Result<Json<DocsContentResponse>, ApiError> {
    let content = tokio::fs::read_to_string(&state.config.docs_path)
        .await
        .map_err(|err| {
            log::error!("Cannot read {}: {}", state.config.docs_path, err);
            ApiError::Internal("Documentation content is not available".to_owned())
        })?;

    Ok(Json(DocsContentResponse { content }))
}
