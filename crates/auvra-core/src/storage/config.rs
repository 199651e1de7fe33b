//! TOML-based application configuration.
//!
//! Stores:
//! - Conversation timing (bot latency, confirmation dwell, recording tick)
//! - Scripted bot lines
//! - Rewards state inputs (current streak, tier boundaries)
//! - Log level
//!
//! Configuration is stored at `~/.config/auvra/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::rewards::{Tier, TierPolicy};

/// Delays driving the conversation's scheduled actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_bot_reply_delay_ms")]
    pub bot_reply_delay_ms: u64,
    #[serde(default = "default_confirm_dwell_ms")]
    pub confirm_dwell_ms: u64,
    #[serde(default = "default_recording_tick_ms")]
    pub recording_tick_ms: u64,
    /// Lets a newly shown transcript lay out before scrolling.
    #[serde(default = "default_scroll_delay_ms")]
    pub scroll_delay_ms: u64,
}

/// Scripted bot and placeholder lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptConfig {
    #[serde(default = "default_intro_question")]
    pub intro_question: String,
    #[serde(default = "default_slider_prompt")]
    pub slider_prompt: String,
    #[serde(default = "default_choice_follow_up")]
    pub choice_follow_up: String,
    #[serde(default = "default_voice_placeholder")]
    pub voice_placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsConfig {
    #[serde(default = "default_current_streak_days")]
    pub current_streak_days: u32,
    #[serde(default = "default_tiers")]
    pub tiers: Vec<Tier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when AUVRA_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/auvra/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub script: ScriptConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default functions
fn default_bot_reply_delay_ms() -> u64 {
    500
}
fn default_confirm_dwell_ms() -> u64 {
    1000
}
fn default_recording_tick_ms() -> u64 {
    1000
}
fn default_scroll_delay_ms() -> u64 {
    100
}
fn default_intro_question() -> String {
    "How was your bloating this week?".into()
}
fn default_slider_prompt() -> String {
    "Thanks for sharing. What do you think contributed to it?".into()
}
fn default_choice_follow_up() -> String {
    "Got it. I'll factor that into your plan for next week.".into()
}
fn default_voice_placeholder() -> String {
    "Voice message".into()
}
fn default_current_streak_days() -> u32 {
    9
}
fn default_tiers() -> Vec<Tier> {
    vec![Tier::new("Seed", 0), Tier::new("Grow", 16)]
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            bot_reply_delay_ms: default_bot_reply_delay_ms(),
            confirm_dwell_ms: default_confirm_dwell_ms(),
            recording_tick_ms: default_recording_tick_ms(),
            scroll_delay_ms: default_scroll_delay_ms(),
        }
    }
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            intro_question: default_intro_question(),
            slider_prompt: default_slider_prompt(),
            choice_follow_up: default_choice_follow_up(),
            voice_placeholder: default_voice_placeholder(),
        }
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            current_streak_days: default_current_streak_days(),
            tiers: default_tiers(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if key.is_empty() {
            return Err(unknown());
        }

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory. Returns error if key is unknown
    /// or the value does not fit the existing type.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check values that deserialize fine but cannot be used, such as an
    /// empty or ambiguous tier list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        TierPolicy::new(self.rewards.tiers.clone()).map_err(|e| ConfigError::InvalidValue {
            key: "rewards.tiers".into(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}
