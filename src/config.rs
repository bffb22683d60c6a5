use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, path::Path};

const DEFAULT_CONFIG_FILE_NAME: &str = "relay.yaml";
const CONFIG_FILE_ENV: &str = "RELAY_CONFIG";

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_DOCS_PATH: &str = "docs/README.md";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_port")]
    pub port: u16,
    #[serde(default = "Config::default_log_level")]
    pub log_level: String,
    #[serde(default = "Config::default_docs_path")]
    pub docs_path: String,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub mail: MailConfig,
}

impl Config {
    /// Reads the optional YAML file, then lets the process environment
    /// override individual settings.
    pub async fn load() -> Result<Config> {
        let file = env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE_NAME.to_owned());

        let config = if Path::new(&file).exists() {
            let config_string = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Cannot read config file {file}"))?;

            Config::from_yaml(&config_string)
                .with_context(|| format!("Cannot parse config file {file}"))?
        } else {
            Config::default()
        };

        config.apply_env(|key| env::var(key).ok())
    }

    pub fn from_yaml(yaml: &str) -> Result<Config> {
        let config = serde_yaml::from_str::<Config>(yaml)?;

        Ok(config)
    }

    pub fn apply_env<F>(mut self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port}"))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(path) = lookup("DOCS_PATH") {
            self.docs_path = path;
        }
        if let Some(url) = lookup("GITHUB_API_URL") {
            self.github.api_url = url;
        }

        let mail = &mut self.mail;
        if let Some(host) = lookup("SMTP_HOST") {
            mail.host = Some(host);
        }
        if let Some(port) = lookup("SMTP_PORT") {
            mail.port = port
                .parse()
                .with_context(|| format!("SMTP_PORT must be a port number, got {port}"))?;
        }
        if let Some(user) = lookup("SMTP_USER") {
            mail.user = Some(user);
        }
        if let Some(password) = lookup("SMTP_PASS") {
            mail.password = Some(password);
        }
        if let Some(secure) = lookup("SMTP_SECURE") {
            mail.secure = secure
                .parse()
                .with_context(|| format!("SMTP_SECURE must be true or false, got {secure}"))?;
        }
        if let Some(from) = lookup("SMTP_FROM") {
            mail.from = Some(from);
        }

        Ok(self)
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    fn default_log_level() -> String {
        DEFAULT_LOG_LEVEL.to_owned()
    }

    fn default_docs_path() -> String {
        DEFAULT_DOCS_PATH.to_owned()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: Config::default_port(),
            log_level: Config::default_log_level(),
            docs_path: Config::default_docs_path(),
            github: GithubConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "GithubConfig::default_api_url")]
    pub api_url: String,
}

impl GithubConfig {
    fn default_api_url() -> String {
        DEFAULT_GITHUB_API_URL.to_owned()
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            api_url: GithubConfig::default_api_url(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub host: Option<String>,
    #[serde(default = "MailConfig::default_port")]
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub secure: bool,
    pub from: Option<String>,
}

impl MailConfig {
    fn default_port() -> u16 {
        DEFAULT_SMTP_PORT
    }

    /// Live delivery needs a host and a full set of credentials.
    pub fn is_live(&self) -> bool {
        [&self.host, &self.user, &self.password]
            .iter()
            .all(|value| value.as_deref().is_some_and(|v| !v.is_empty()))
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        MailConfig {
            host: None,
            port: MailConfig::default_port(),
            user: None,
            password: None,
            secure: false,
            from: None,
        }
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("secure", &self.secure)
            .field("from", &self.from)
            .finish()
    }
}
