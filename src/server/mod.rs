pub mod error;
mod handlers;

use crate::{config::Config, github::github_client::GithubClient, mail::Mailer};
use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;

/// Shared by every handler. Holds no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub github: Arc<GithubClient>,
    pub mailer: Arc<Mailer>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let github = GithubClient::new(&config.github.api_url)?;
        let mailer = Mailer::from_config(&config.mail).context("Cannot configure email")?;

        Ok(AppState {
            config: Arc::new(config),
            github: Arc::new(github),
            mailer: Arc::new(mailer),
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(handlers::status))
        .route("/api/send-test-email", post(handlers::send_test_email))
        .route("/api/push-code", post(handlers::push_code))
        .route("/api/docs/content", get(handlers::docs_content))
        .with_state(state)
}

pub async fn run(state: AppState) -> Result<()> {
    let listen_addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Cannot bind {listen_addr}"))?;

    log::info!("Relay listening on {}", listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("Cannot listen for Ctrl-C: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => log::error!("Cannot listen for SIGTERM: {}", err),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailConfig;
    use anyhow::Result;
    use mockito::{Matcher, Server};
    use serde_json::{json, Value};
    use std::fs;
    use tempdir::TempDir;

    async fn spawn(config: Config) -> Result<String> {
        let state = AppState::new(config)?;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move { axum::serve(listener, create_router(state)).await });

        Ok(format!("http://{addr}"))
    }

    fn config_for(api_url: &str) -> Config {
        let mut config = Config::default();
        config.github.api_url = api_url.to_owned();
        config
    }

    #[tokio::test]
    async fn should_report_simulation_mode_repeatedly() -> Result<()> {
        let base = spawn(Config::default()).await?;
        let client = reqwest::Client::new();

        for _ in 0..2 {
            let response = client.get(format!("{base}/api/status")).send().await?;

            assert_eq!(response.status().as_u16(), 200);
            assert_eq!(
                response.json::<Value>().await?,
                json!({ "emailService": "simulation" })
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn should_report_live_mode() -> Result<()> {
        let mut config = Config::default();
        config.mail = MailConfig {
            host: Some("smtp.example.com".to_owned()),
            user: Some("relay@example.com".to_owned()),
            password: Some("secret".to_owned()),
            ..MailConfig::default()
        };
        let base = spawn(config).await?;

        let body: Value = reqwest::get(format!("{base}/api/status")).await?.json().await?;

        assert_eq!(body["emailService"], "live");

        Ok(())
    }

    #[tokio::test]
    async fn should_reject_a_push_with_a_missing_field() -> Result<()> {
        let mut server = Server::new_async().await;
        let lookup = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let write = server
            .mock("PUT", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let base = spawn(config_for(&server.url())).await?;
        let client = reqwest::Client::new();

        let complete = json!({
            "repo": "octo/demo",
            "filePath": "src/lib.rs",
            "content": "fn main() {}",
            "message": "fix",
            "token": "ghp_token"
        });

        for field in ["repo", "filePath", "content", "message", "token"] {
            let mut body = complete.clone();
            if let Some(object) = body.as_object_mut() {
                object.remove(field);
            }

            let response = client
                .post(format!("{base}/api/push-code"))
                .json(&body)
                .send()
                .await?;

            assert_eq!(response.status().as_u16(), 400, "without {field}");
            let body: Value = response.json().await?;
            assert!(body["error"].as_str().unwrap_or_default().contains(field));
        }

        lookup.assert_async().await;
        write.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn should_reject_malformed_json() -> Result<()> {
        let base = spawn(Config::default()).await?;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/push-code"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await?;

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await?;
        assert!(body["error"].is_string());

        Ok(())
    }

    #[tokio::test]
    async fn should_push_code_and_return_the_commit_url() -> Result<()> {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/octo/demo/contents/src/lib.rs")
            .match_header("authorization", "Bearer ghp_token")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("PUT", "/repos/octo/demo/contents/src/lib.rs")
            .match_body(Matcher::PartialJson(json!({ "message": "fix: escape html" })))
            .with_status(201)
            .with_body(
                r#"{"content":{"name":"lib.rs","path":"src/lib.rs","sha":"b1"},"commit":{"sha":"c1","html_url":"https://github.com/octo/demo/commit/c1"}}"#,
            )
            .create_async()
            .await;
        let base = spawn(config_for(&server.url())).await?;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/push-code"))
            .json(&json!({
                "repo": "octo/demo",
                "filePath": "src/lib.rs",
                "content": "fn main() {}",
                "message": "fix: escape html",
                "token": "ghp_token"
            }))
            .send()
            .await?;

        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(
            response.json::<Value>().await?,
            json!({ "success": true, "commitUrl": "https://github.com/octo/demo/commit/c1" })
        );

        Ok(())
    }

    #[tokio::test]
    async fn should_report_classified_push_failures() -> Result<()> {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/octo/demo/contents/src/lib.rs")
            .with_status(200)
            .with_body(r#"{"type":"file","name":"lib.rs","path":"src/lib.rs","sha":"old"}"#)
            .create_async()
            .await;
        server
            .mock("PUT", "/repos/octo/demo/contents/src/lib.rs")
            .with_status(422)
            .with_body(r#"{"message":"src/lib.rs does not match old"}"#)
            .create_async()
            .await;
        let base = spawn(config_for(&server.url())).await?;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/push-code"))
            .json(&json!({
                "repo": "octo/demo",
                "filePath": "src/lib.rs",
                "content": "fn main() {}",
                "message": "fix",
                "token": "ghp_token"
            }))
            .send()
            .await?;

        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await?;
        assert_eq!(body["kind"], "conflict");
        assert!(body["error"].as_str().unwrap_or_default().contains("does not match"));

        Ok(())
    }

    #[tokio::test]
    async fn should_answer_an_invalid_repository_with_500_and_its_kind() -> Result<()> {
        let base = spawn(Config::default()).await?;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/push-code"))
            .json(&json!({
                "repo": "not-a-valid-repo",
                "filePath": "src/lib.rs",
                "content": "fn main() {}",
                "message": "fix",
                "token": "ghp_token"
            }))
            .send()
            .await?;

        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await?;
        assert_eq!(body["kind"], "validation");
        assert!(body["error"].as_str().unwrap_or_default().contains("owner/name"));

        Ok(())
    }

    #[tokio::test]
    async fn should_simulate_the_test_email() -> Result<()> {
        let base = spawn(Config::default()).await?;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/api/send-test-email"))
            .json(&json!({ "email": "dev@example.com" }))
            .send()
            .await?;

        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await?;
        assert!(body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("dev@example.com"));

        let response = client
            .post(format!("{base}/api/send-test-email"))
            .json(&json!({}))
            .send()
            .await?;

        assert_eq!(response.status().as_u16(), 400);

        let response = client
            .post(format!("{base}/api/send-test-email"))
            .json(&json!({ "email": "nobody" }))
            .send()
            .await?;

        assert_eq!(response.status().as_u16(), 400);

        Ok(())
    }

    #[tokio::test]
    async fn should_serve_the_docs_content() -> Result<()> {
        let dir = TempDir::new("docs")?;
        let docs_path = dir.path().join("README.md");
        fs::write(&docs_path, "# Commit relay\n")?;

        let mut config = Config::default();
        config.docs_path = docs_path.to_string_lossy().into_owned();
        let base = spawn(config).await?;

        let response = reqwest::get(format!("{base}/api/docs/content")).await?;

        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(
            response.json::<Value>().await?,
            json!({ "content": "# Commit relay\n" })
        );

        dir.close()?;
        Ok(())
    }

    #[tokio::test]
    async fn should_fail_when_the_docs_file_is_missing() -> Result<()> {
        let dir = TempDir::new("docs")?;

        let mut config = Config::default();
        config.docs_path = dir.path().join("absent.md").to_string_lossy().into_owned();
        let base = spawn(config).await?;

        let response = reqwest::get(format!("{base}/api/docs/content")).await?;

        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await?;
        assert!(body["error"].is_string());

        dir.close()?;
        Ok(())
    }
}
