//! Configuration loading and validation.
//!
//! All values are fixed at process start and immutable thereafter. A JSON
//! file may supply them, command-line flags override, and everything not
//! given falls back to a default. Durations are written as human-readable
//! strings ("500ms", "11s", "2m").

use crate::error::{NudgeError, Result};
use crate::keymap::Combo;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

/// Immutable run configuration for both periodic senders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Display name of the target application, e.g. "TextEdit".
    pub app_name: String,

    /// Modifier+key chord sent by the combo sender.
    #[serde(default = "default_combo")]
    pub combo: String,

    /// Interval between combo sends.
    #[serde(default = "default_combo_interval", with = "duration_str")]
    pub combo_interval: Duration,

    /// Message typed by the text sender, followed by Return.
    #[serde(default = "default_message")]
    pub message: String,

    /// Interval between typed messages.
    #[serde(default = "default_message_interval", with = "duration_str")]
    pub message_interval: Duration,

    /// Delay between consecutive characters while typing.
    #[serde(default = "default_key_delay", with = "duration_str")]
    pub key_delay: Duration,

    /// Process lookup attempts before giving up at startup.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Global hotkey that toggles pause/resume for both senders.
    #[serde(default = "default_pause_hotkey")]
    pub pause_hotkey: String,

    /// Enable debug-level logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_combo() -> String {
    "cmd+enter".to_string()
}

fn default_combo_interval() -> Duration {
    Duration::from_secs(11)
}

fn default_message() -> String {
    "continue doing what you think is best.".to_string()
}

fn default_message_interval() -> Duration {
    Duration::from_secs(120)
}

fn default_key_delay() -> Duration {
    Duration::from_millis(50)
}

fn default_max_retries() -> u32 {
    10
}

fn default_pause_hotkey() -> String {
    "ctrl+alt+p".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            combo: default_combo(),
            combo_interval: default_combo_interval(),
            message: default_message(),
            message_interval: default_message_interval(),
            key_delay: default_key_delay(),
            max_retries: default_max_retries(),
            pause_hotkey: default_pause_hotkey(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| NudgeError::config_load(path, e.to_string()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| NudgeError::config_load(path, e.to_string()))?;
        Ok(config)
    }

    /// Write the configuration to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| NudgeError::config_save(path, e.to_string()))
    }

    /// Validate the configuration before any sender starts.
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(NudgeError::config_validation("app_name cannot be empty"));
        }
        if self.message.is_empty() {
            return Err(NudgeError::config_validation("message cannot be empty"));
        }
        if self.combo_interval.is_zero() {
            return Err(NudgeError::config_validation(
                "combo_interval must be greater than zero",
            ));
        }
        if self.message_interval.is_zero() {
            return Err(NudgeError::config_validation(
                "message_interval must be greater than zero",
            ));
        }
        if self.max_retries == 0 {
            return Err(NudgeError::config_validation(
                "max_retries must be at least 1",
            ));
        }
        Combo::parse(&self.combo)?;
        Ok(())
    }
}

/// Parse a duration string: "500ms", "11s", "2m", or a bare number of
/// milliseconds. Case-insensitive; surrounding whitespace is ignored.
pub fn parse_duration(value: &str) -> Result<Duration> {
    let lowered = value.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return Err(NudgeError::invalid_duration(value, "empty string"));
    }

    let (digits, multiplier_ms) = if let Some(rest) = lowered.strip_suffix("ms") {
        (rest, 1)
    } else if let Some(rest) = lowered.strip_suffix('s') {
        (rest, 1_000)
    } else if let Some(rest) = lowered.strip_suffix('m') {
        (rest, 60_000)
    } else {
        (lowered.as_str(), 1)
    };

    let amount: u64 = digits
        .trim()
        .parse()
        .map_err(|_| NudgeError::invalid_duration(value, "expected a non-negative number"))?;

    Ok(Duration::from_millis(amount * multiplier_ms))
}

/// Format a duration in the largest unit that divides it evenly.
fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms > 0 && ms % 60_000 == 0 {
        format!("{}m", ms / 60_000)
    } else if ms > 0 && ms % 1_000 == 0 {
        format!("{}s", ms / 1_000)
    } else {
        format!("{ms}ms")
    }
}

mod duration_str {
    use super::{format_duration, parse_duration};
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_duration(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_duration(&raw).map_err(de::Error::custom)
    }
}
