use serde::{de::DeserializeOwned, Deserialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

#[derive(Debug)]
pub enum Response<T> {
    Success(Inner<T>),
    Error(ErrorResponse),
}

#[derive(Debug)]
pub struct Inner<T> {
    pub payload: T,
    pub status: u16,
}

impl<T> Response<T> {
    pub fn status(&self) -> u16 {
        match self {
            Response::Success(inner) => inner.status,
            Response::Error(inner) => inner.status,
        }
    }

    pub fn collect(self) -> Result<T, ErrorResponse> {
        match self {
            Response::Success(response) => Ok(response.payload),
            Response::Error(response) => Err(response),
        }
    }
}

/// GitHub error bodies look like `{"message": "...", "documentation_url": "..."}`.
#[derive(Deserialize)]
struct GithubErrorBody {
    message: String,
}

fn error_message(text: &str) -> String {
    match serde_json::from_str::<GithubErrorBody>(text) {
        Ok(body) => body.message,
        Err(_) if text.trim().is_empty() => "empty response body".to_owned(),
        Err(_) => text.to_owned(),
    }
}

pub trait AsyncFrom<T>: Sized {
    async fn async_from(value: T) -> Self;
}

impl<T> AsyncFrom<reqwest::Response> for Response<T>
where
    T: DeserializeOwned,
{
    async fn async_from(value: reqwest::Response) -> Self {
        let status = value.status().as_u16();

        let text = match value.text().await {
            Ok(text) => text,
            Err(err) => {
                return Response::Error(ErrorResponse {
                    status,
                    message: format!("Failed to read response text: {}", err),
                });
            }
        };

        if !(200..300).contains(&status) {
            return Response::Error(ErrorResponse {
                status,
                message: error_message(&text),
            });
        }

        match serde_json::from_str::<T>(&text) {
            Ok(payload) => Response::Success(Inner { payload, status }),
            Err(err) => Response::Error(ErrorResponse {
                status,
                message: format!("Failed to parse json: {}", err),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_extract_the_github_message() {
        let body = r#"{"message":"Bad credentials","documentation_url":"https://docs.github.com/rest"}"#;

        assert_eq!(error_message(body), "Bad credentials");
    }

    #[test]
    fn should_fall_back_to_the_raw_body() {
        assert_eq!(error_message("upstream timeout"), "upstream timeout");
        assert_eq!(error_message("  "), "empty response body");
    }
}
