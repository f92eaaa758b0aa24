//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Timeline start time and buffer between blocks
//! - Focus session length
//! - Priority tuning (top-N, skipped penalty, ramp horizons)
//! - Appearance
//!
//! Configuration is stored at `~/.config/smartstudy/config.toml`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::timeline::{PriorityConfig, SchedulerConfig, DEFAULT_BUFFER_MINUTES, DEFAULT_START_MINUTE};
use crate::timer::DEFAULT_FOCUS_MINUTES;

/// Timeline layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Minutes since midnight of the first block.
    #[serde(default = "default_start_minute")]
    pub start_minute: u32,
    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: u32,
}

/// Focus timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    #[serde(default = "default_focus_duration")]
    pub duration_min: u64,
}

/// Priority tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityConfigSection {
    /// How many tasks the priority view shows.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_skipped_penalty")]
    pub skipped_penalty: f64,
    #[serde(default = "default_exam_horizon_days")]
    pub exam_horizon_days: u32,
    #[serde(default = "default_urgency_horizon_days")]
    pub urgency_horizon_days: u32,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    /// Days shown in the weekly load view.
    #[serde(default = "default_week_days")]
    pub week_days: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/smartstudy/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub priority: PriorityConfigSection,
    #[serde(default)]
    pub ui: UiConfig,
}

// Default functions
fn default_start_minute() -> u32 {
    DEFAULT_START_MINUTE
}
fn default_buffer_minutes() -> u32 {
    DEFAULT_BUFFER_MINUTES
}
fn default_focus_duration() -> u64 {
    DEFAULT_FOCUS_MINUTES
}
fn default_top_n() -> usize {
    4
}
fn default_skipped_penalty() -> f64 {
    -0.4
}
fn default_exam_horizon_days() -> u32 {
    30
}
fn default_urgency_horizon_days() -> u32 {
    5
}
fn default_true() -> bool {
    true
}
fn default_week_days() -> u32 {
    5
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            start_minute: default_start_minute(),
            buffer_minutes: default_buffer_minutes(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            duration_min: default_focus_duration(),
        }
    }
}

impl Default for PriorityConfigSection {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            skipped_penalty: default_skipped_penalty(),
            exam_horizon_days: default_exam_horizon_days(),
            urgency_horizon_days: default_urgency_horizon_days(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            week_days: default_week_days(),
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

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
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
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from a specific file, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
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

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
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

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Timeline layout settings.
    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            start_minute: self.timeline.start_minute,
            buffer_minutes: self.timeline.buffer_minutes,
        }
    }

    /// Priority settings evaluated at `now`.
    pub fn priority_at(&self, now: DateTime<Utc>) -> PriorityConfig {
        PriorityConfig {
            exam_horizon_days: self.priority.exam_horizon_days,
            urgency_horizon_days: self.priority.urgency_horizon_days,
            skipped_penalty: self.priority.skipped_penalty,
            ..PriorityConfig::at(now)
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timeline.start_minute, 490);
        assert_eq!(parsed.timeline.buffer_minutes, 10);
        assert_eq!(parsed.focus.duration_min, 25);
        assert_eq!(parsed.priority.top_n, 4);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[timeline]\nstart_minute = 540\n").unwrap();
        assert_eq!(parsed.timeline.start_minute, 540);
        assert_eq!(parsed.timeline.buffer_minutes, 10);
        assert_eq!(parsed.priority.skipped_penalty, -0.4);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("ui.dark_mode").as_deref(), Some("true"));
        assert_eq!(cfg.get("focus.duration_min").as_deref(), Some("25"));
        assert!(cfg.get("ui.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.apply("timeline.buffer_minutes", "5").unwrap();
        cfg.apply("ui.dark_mode", "false").unwrap();
        cfg.apply("priority.skipped_penalty", "-0.25").unwrap();
        assert_eq!(cfg.timeline.buffer_minutes, 5);
        assert!(!cfg.ui.dark_mode);
        assert_eq!(cfg.priority.skipped_penalty, -0.25);
    }

    #[test]
    fn apply_rejects_unknown_key_and_bad_value() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("timeline.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.apply("timeline", "1"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(
            cfg.apply("ui.dark_mode", "not_a_bool"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.apply("focus.duration_min", "-5").is_err());
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.timeline.start_minute, 490);

        let mut changed = cfg.clone();
        changed.apply("priority.top_n", "6").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().priority.top_n, 6);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeline = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn derived_settings() {
        let mut cfg = Config::default();
        cfg.apply("timeline.start_minute", "540").unwrap();
        assert_eq!(cfg.scheduler().start_minute, 540);

        let now = Utc::now();
        let p = cfg.priority_at(now);
        assert_eq!(p.current_time, now);
        assert_eq!(p.skipped_penalty, -0.4);
    }
}
