//! CLI configuration

use anyhow::{bail, Context, Result};
use helpernote_client::{ClientConfig, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "helpernote.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,

    #[serde(default = "default_retry")]
    pub retry: RetrySettings,

    #[serde(default = "default_http")]
    pub http: HttpSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Where the token pair is kept between invocations
    #[serde(default = "default_session_file")]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl CliConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. HELPERNOTE_SERVER__URL
        settings = settings.add_source(
            config::Environment::with_prefix("HELPERNOTE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            bail!("Server URL is required (set HELPERNOTE_SERVER__URL)");
        }
        if self.retry.initial_delay_ms > self.retry.max_delay_ms {
            bail!(
                "retry.initial_delay_ms ({}) exceeds retry.max_delay_ms ({})",
                self.retry.initial_delay_ms,
                self.retry.max_delay_ms
            );
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_retries,
            Duration::from_millis(self.retry.initial_delay_ms),
            Duration::from_millis(self.retry.max_delay_ms),
        )
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.server.url.clone())
            .timeouts(
                Duration::from_secs(self.http.timeout_secs),
                Duration::from_secs(self.http.connect_timeout_secs),
            )
            .retry(self.retry_policy())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            session: default_session(),
            retry: default_retry(),
            http: default_http(),
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings { url: default_url() }
}

fn default_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_session() -> SessionSettings {
    SessionSettings {
        file: default_session_file(),
    }
}

fn default_session_file() -> PathBuf {
    PathBuf::from("./.helpernote/session.json")
}

fn default_retry() -> RetrySettings {
    RetrySettings {
        max_retries: default_max_retries(),
        initial_delay_ms: default_initial_delay_ms(),
        max_delay_ms: default_max_delay_ms(),
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_http() -> HttpSettings {
    HttpSettings {
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
