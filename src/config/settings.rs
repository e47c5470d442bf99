use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GatewayError, Result};

pub const DEFAULT_MODEL: &str = "L1T3-Ωᴹ²";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full URL of the upstream chat endpoint.
    pub url: String,
    /// Sent as `Origin` and `Referer` on upstream calls when set.
    pub origin: Option<String>,
    pub default_model: String,
    /// Model identifiers advertised on `/v1/models`.
    pub models: Vec<String>,
    pub timeout_secs: Option<u64>,
    /// Emit the final unterminated line of an upstream event stream instead of dropping it.
    pub flush_trailing_line: bool,
    /// Hosts that are always dialed directly, even when proxy env vars are set.
    pub no_proxy_hosts: Vec<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            origin: None,
            default_model: DEFAULT_MODEL.to_string(),
            models: vec![DEFAULT_MODEL.to_string()],
            timeout_secs: None,
            flush_trailing_line: false,
            no_proxy_hosts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bearer key clients must present. `None` leaves the proxy open.
    pub api_key: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let mut settings = match Self::find_config_file() {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path);
                Self::from_path(&path)?
            }
            None => {
                tracing::info!("No config file found, using defaults and environment");
                Settings::default()
            }
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| GatewayError::Config(e.to_string()))
    }

    fn find_config_file() -> Option<String> {
        let possible_names = ["custom-config.toml", "config.toml"];
        possible_names
            .iter()
            .find(|name| Path::new(name).exists())
            .map(|name| name.to_string())
    }

    /// Environment overrides, read through `lookup` so tests don't touch the process env.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("GATEWAY_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| GatewayError::Config(format!("invalid GATEWAY_PORT: {}", port)))?;
        }
        if let Some(url) = get("UPSTREAM_URL") {
            self.upstream.url = url;
        }
        if let Some(origin) = get("UPSTREAM_ORIGIN") {
            self.upstream.origin = Some(origin);
        }
        if let Some(model) = get("DEFAULT_MODEL") {
            self.upstream.default_model = model;
        }
        if let Some(models) = get("MODELS") {
            self.upstream.models = models
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(secs) = get("UPSTREAM_TIMEOUT_SECS") {
            let secs = secs.trim().parse().map_err(|_| {
                GatewayError::Config(format!("invalid UPSTREAM_TIMEOUT_SECS: {}", secs))
            })?;
            self.upstream.timeout_secs = Some(secs);
        }
        if let Some(flag) = get("FLUSH_TRAILING_LINE") {
            self.upstream.flush_trailing_line =
                matches!(flag.trim(), "1" | "true" | "TRUE" | "yes" | "YES");
        }
        if let Some(key) = get("API_KEY") {
            self.auth.api_key = Some(key);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.upstream.url).map_err(|_| {
            GatewayError::Config(format!(
                "upstream.url must be an absolute URL, got '{}'",
                self.upstream.url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayError::Config(
                "upstream.url must use http or https".into(),
            ));
        }
        if self.upstream.default_model.trim().is_empty() {
            return Err(GatewayError::Config(
                "upstream.default_model must not be empty".into(),
            ));
        }
        Ok(())
    }
}
