//! Server configuration: defaults, an optional TOML file, then environment overrides.
//!
//! Environment variables (empty values count as unset):
//! - `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`
//! - `DEDUP_SECONDS` (default 900), `STATE_PATH` (default `state.json`)
//! - `RISK_FIRST_MOVE` (default 0.25), `RISK_CONFIRM` (default 0.5)
//! - `SIGNALGATE_BIND` (default `0.0.0.0:8000`)

use serde::{Deserialize, Serialize};
use signalgate_core::RiskConfig;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {name}: '{value}' ({reason})")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("missing Telegram setting: {0} (set it or run with --dry-run)")]
    MissingTelegram(&'static str),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Telegram delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: "https://api.telegram.org".to_string(),
            timeout_secs: 20,
        }
    }
}

/// Dedup gate settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Suppression window in seconds.
    pub window_secs: u64,
    /// JSON file holding last-seen timestamps.
    pub state_path: PathBuf,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            window_secs: 900,
            state_path: PathBuf::from("state.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub telegram: TelegramConfig,
    pub dedup: DedupConfig,
    pub risk: RiskConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            telegram: TelegramConfig::default(),
            dedup: DedupConfig::default(),
            risk: RiskConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Override fields from environment-style lookups.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(v) = get("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = v;
        }
        if let Some(v) = get("TELEGRAM_CHAT_ID") {
            self.telegram.chat_id = v;
        }
        if let Some(v) = get("DEDUP_SECONDS") {
            self.dedup.window_secs = parse_env("DEDUP_SECONDS", v)?;
        }
        if let Some(v) = get("STATE_PATH") {
            self.dedup.state_path = PathBuf::from(v);
        }
        if let Some(v) = get("RISK_FIRST_MOVE") {
            self.risk.first_move_pct = parse_env("RISK_FIRST_MOVE", v)?;
        }
        if let Some(v) = get("RISK_CONFIRM") {
            self.risk.confirm_pct = parse_env("RISK_CONFIRM", v)?;
        }
        if let Some(v) = get("SIGNALGATE_BIND") {
            self.bind = v;
        }
        Ok(())
    }

    /// Reject values that would make the engine misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, pct) in [
            ("risk.first_move_pct", self.risk.first_move_pct),
            ("risk.confirm_pct", self.risk.confirm_pct),
        ] {
            if !pct.is_finite() || pct < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {pct}"
                )));
            }
        }
        if self.bind.trim().is_empty() {
            return Err(ConfigError::Invalid("bind address is empty".into()));
        }
        Ok(())
    }

    /// Telegram credentials are required unless delivery is disabled.
    pub fn require_telegram(&self) -> Result<(), ConfigError> {
        if self.telegram.bot_token.is_empty() {
            return Err(ConfigError::MissingTelegram("TELEGRAM_BOT_TOKEN"));
        }
        if self.telegram.chat_id.is_empty() {
            return Err(ConfigError::MissingTelegram("TELEGRAM_CHAT_ID"));
        }
        Ok(())
    }
}

fn parse_env<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnv {
        name,
        reason: e.to_string(),
        value,
    })
}
