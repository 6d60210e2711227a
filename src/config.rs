use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::engine::lexicon::Lexicon;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PalaceConfig {
    pub server: ServerConfig,
    pub lexicon: Lexicon,
    pub enrichment: EnrichmentConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// OpenRouter API key. Enrichment is disabled when unset.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Upper bound on one enrichment round trip.
    pub timeout_secs: u64,
}

impl Default for PalaceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            lexicon: Lexicon::default(),
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3001,
            log_level: "info".into(),
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "anthropic/claude-3-haiku".into(),
            base_url: "https://openrouter.ai/api/v1/chat/completions".into(),
            timeout_secs: 10,
        }
    }
}

/// Returns `~/.palace/`
pub fn default_palace_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".palace")
}

/// Returns the default config file path: `~/.palace/config.toml`
pub fn default_config_path() -> PathBuf {
    default_palace_dir().join("config.toml")
}

impl PalaceConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            PalaceConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (PALACE_HOST, PALACE_PORT,
    /// PALACE_LOG_LEVEL, OPENROUTER_API_KEY, OPENROUTER_MODEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PALACE_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("PALACE_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("PALACE_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("OPENROUTER_API_KEY") {
            if !val.is_empty() {
                self.enrichment.api_key = Some(val);
            }
        }
        if let Ok(val) = std::env::var("OPENROUTER_MODEL") {
            self.enrichment.model = val;
        }
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PalaceConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.log_level, "info");
        assert!(config.enrichment.api_key.is_none());
        assert_eq!(config.enrichment.timeout_secs, 10);
        assert!(config.lexicon.is_domain_term("bitcoin"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
port = 8080
log_level = "debug"

[lexicon]
domain_terms = ["bitcoin", "ordinals"]

[enrichment]
model = "anthropic/claude-3-5-sonnet"
timeout_secs = 5
"#;
        let config: PalaceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_level, "debug");
        assert!(config.lexicon.is_domain_term("ordinals"));
        assert_eq!(config.enrichment.model, "anthropic/claude-3-5-sonnet");
        assert_eq!(config.enrichment.timeout_secs, 5);
        // defaults still apply for unset fields
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.lexicon.is_positive("great"));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = PalaceConfig::default();
        std::env::set_var("PALACE_PORT", "9999");
        std::env::set_var("PALACE_LOG_LEVEL", "trace");
        std::env::set_var("OPENROUTER_API_KEY", "sk-test");

        config.apply_env_overrides();

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.log_level, "trace");
        assert_eq!(config.enrichment.api_key.as_deref(), Some("sk-test"));

        // A non-numeric port is ignored, keeping the previous value
        std::env::set_var("PALACE_PORT", "not-a-port");
        config.apply_env_overrides();
        assert_eq!(config.server.port, 9999);

        // Clean up
        std::env::remove_var("PALACE_PORT");
        std::env::remove_var("PALACE_LOG_LEVEL");
        std::env::remove_var("OPENROUTER_API_KEY");
    }
}
