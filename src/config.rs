use std::fmt;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Primary credential variable.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Accepted when [`API_KEY_VAR`] is unset or empty.
pub const FALLBACK_API_KEY_VAR: &str = "GOOGLE_GENERATIVE_AI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const ENDPOINT_VAR: &str = "GEMINI_ENDPOINT";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the built preview client (`trunk build` output).
    pub static_dir: PathBuf,
}

/// Upstream text-generation API configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Bearer credential. Never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    /// Full endpoint URL; derived from `model` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("frontend/dist"),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
            timeout_secs: 300,
        }
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl UpstreamConfig {
    /// The configured credential, treating an empty value as absent.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Resolved upstream URL (explicit override or the model's default endpoint).
    pub fn endpoint_url(&self) -> String {
        match self.endpoint.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!(
                "https://api.generativeai.googleapis.com/v1/models/{}:generateContent",
                self.model
            ),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file, then `REBUILD_*`
    /// variables, then the unprefixed credential/model/endpoint variables.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// [`AppConfig::load`] with an explicit file path. An unparseable file is
    /// skipped; the environment layers still apply.
    pub fn load_from(config_path: &Path) -> Self {
        let mut config = match Self::figment(config_path).extract::<AppConfig>() {
            Ok(config) => {
                log::info!("Loaded config (file: {})", config_path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Failed to load config from {}: {e}; using defaults and environment",
                    config_path.display()
                );
                Self::env_figment().extract().unwrap_or_else(|e| {
                    log::warn!("Ignoring REBUILD_* environment: {e}");
                    Self::default()
                })
            }
        };
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config
    }

    /// Layered provider chain used by [`AppConfig::load`].
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Self::env_provider())
    }

    /// Defaults plus `REBUILD_*` variables, without the file layer.
    fn env_figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default())).merge(Self::env_provider())
    }

    fn env_provider() -> Env {
        Env::prefixed("REBUILD_").split("__")
    }

    /// Apply the unprefixed variables the hosted deployment uses.
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(key) = non_empty(API_KEY_VAR).or_else(|| non_empty(FALLBACK_API_KEY_VAR)) {
            self.upstream.api_key = Some(key);
        }
        if let Some(model) = non_empty(MODEL_VAR) {
            self.upstream.model = model;
        }
        if let Some(endpoint) = non_empty(ENDPOINT_VAR) {
            self.upstream.endpoint = Some(endpoint);
        }
        if let Some(port) = non_empty("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("REBUILD_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("rebuild").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
