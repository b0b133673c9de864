//! Settings are layered, lowest precedence first: built-in defaults, the
//! config file, `GLYCO__*` environment variables (for example
//! `GLYCO__SERVICE__BASE_URL`), then `GLYCO_API_URL`. When built from the CLI,
//! `--api-url` and the other flags are applied last.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::cli::{Cli, Command};

/// Local development address of the prediction service
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Short-form base URL variable. Takes precedence over `GLYCO__SERVICE__BASE_URL`.
pub const API_URL_ENV: &str = "GLYCO_API_URL";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    pub service: ServiceSettings,
    #[serde(default)]
    pub mock_server: MockServerSettings,
}

/// Where and how to reach the prediction service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceSettings {
    pub base_url: String,
    /// Caller-side timeout. Absent means the call runs to completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

/// Settings for the local stand-in service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MockServerSettings {
    #[serde(default = "default_mock_host")]
    pub host: String,
    #[serde(default = "default_mock_port")]
    pub port: u16,
    /// Label returned for every well-formed request
    #[serde(default = "default_mock_label")]
    pub label: String,
    /// When set, every request fails with 503 and this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_message: Option<String>,
}

impl Default for MockServerSettings {
    fn default() -> Self {
        Self {
            host: default_mock_host(),
            port: default_mock_port(),
            label: default_mock_label(),
            fail_message: None,
        }
    }
}

fn default_mock_host() -> String {
    "127.0.0.1".to_string()
}

fn default_mock_port() -> u16 {
    5000
}

fn default_mock_label() -> String {
    "Non-Diabetic".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, environment, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Loads `<root>/glyco.{toml,yaml,json}` if present
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("glyco");
        let settings = Self::load(&config_path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(config_path: &Path) -> Result<Self, anyhow::Error> {
        Self::load_with_api_url(config_path, std::env::var(API_URL_ENV).ok())
    }

    fn load_with_api_url(config_path: &Path, api_url: Option<String>) -> Result<Self, anyhow::Error> {
        let api_url = api_url.filter(|url| !url.trim().is_empty());
        let s = Config::builder()
            .add_source(File::from(config_path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("GLYCO")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("service.base_url", DEFAULT_BASE_URL)?
            .set_default("mock_server.host", default_mock_host())?
            .set_default("mock_server.port", i64::from(default_mock_port()))?
            .set_default("mock_server.label", default_mock_label())?
            .set_override_option("service.base_url", api_url)?
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(api_url) = &cli.api_url {
            self.service.base_url = api_url.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.service.timeout_seconds = Some(timeout);
        }

        if let Command::MockServer(args) = &cli.command {
            if let Some(host) = &args.host {
                self.mock_server.host = host.clone();
            }
            if let Some(port) = args.port {
                self.mock_server.port = port;
            }
            if let Some(label) = &args.label {
                self.mock_server.label = label.clone();
            }
            if let Some(message) = &args.fail_message {
                self.mock_server.fail_message = Some(message.clone());
            }
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}
