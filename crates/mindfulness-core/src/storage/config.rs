//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Session framing pauses (get ready, cool down, summary)
//! - Breathing rhythm
//! - Reflection and listing pacing
//! - Custom prompt files
//! - Activity log location and prompt seed
//!
//! Configuration is stored at `~/.config/mindfulness/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::activity::{BreathingActivity, ListingActivity, ReflectionActivity, SessionPacing};
use crate::error::{ConfigError, Result};
use crate::log_sink::{FileLogSink, DEFAULT_LOG_FILE};
use crate::prompts;
use crate::sampler::ShuffleBag;

/// Pauses around every activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_3")]
    pub get_ready_secs: u64,
    #[serde(default = "default_3")]
    pub cool_down_secs: u64,
    #[serde(default = "default_summary")]
    pub summary_secs: u64,
}

/// Breathing rhythm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default = "default_inhale")]
    pub inhale_secs: u64,
    #[serde(default = "default_exhale")]
    pub exhale_secs: u64,
}

/// Reflection pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectionConfig {
    #[serde(default = "default_3")]
    pub prep_secs: u64,
    #[serde(default = "default_question_pause")]
    pub question_pause_secs: u64,
}

/// Listing pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_think")]
    pub think_secs: u64,
}

/// Optional prompt files replacing the built-in sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptsConfig {
    #[serde(default)]
    pub reflection_prompts: Option<String>,
    #[serde(default)]
    pub reflection_questions: Option<String>,
    #[serde(default)]
    pub listing_prompts: Option<String>,
}

/// Activity log location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file path. Defaults to `mindfulness_log.txt` in the data directory.
    #[serde(default)]
    pub file: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/mindfulness/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Fixed seed for prompt selection. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub breathing: BreathingConfig,
    #[serde(default)]
    pub reflection: ReflectionConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

// Default functions
fn default_3() -> u64 {
    3
}
fn default_summary() -> u64 {
    2
}
fn default_inhale() -> u64 {
    4
}
fn default_exhale() -> u64 {
    6
}
fn default_question_pause() -> u64 {
    6
}
fn default_think() -> u64 {
    5
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            get_ready_secs: default_3(),
            cool_down_secs: default_3(),
            summary_secs: default_summary(),
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            inhale_secs: default_inhale(),
            exhale_secs: default_exhale(),
        }
    }
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            prep_secs: default_3(),
            question_pause_secs: default_question_pause(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            think_secs: default_think(),
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(invalid("config key is empty".to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot replace a whole section".to_string()));
                    }
                    // Unset optionals: numbers stay numbers, anything else is a path.
                    serde_json::Value::Null => match value.parse::<u64>() {
                        Ok(n) => serde_json::Value::Number(n.into()),
                        Err(_) => serde_json::Value::String(value.into()),
                    },
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Path of `config.toml` in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
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

    /// Load from an explicit path, writing defaults there if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Reject pacing values that would stall an activity loop.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero breath phase or
    /// question pause.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("breathing.inhale_secs", self.breathing.inhale_secs),
            ("breathing.exhale_secs", self.breathing.exhale_secs),
            ("reflection.question_pause_secs", self.reflection.question_pause_secs),
        ];
        match positive.iter().find(|(_, secs)| *secs == 0) {
            Some((key, _)) => Err(ConfigError::InvalidValue {
                key: (*key).to_string(),
                message: "must be at least 1 second".to_string(),
            }),
            None => Ok(()),
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

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
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
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    pub fn session_pacing(&self) -> SessionPacing {
        SessionPacing {
            get_ready: Duration::from_secs(self.session.get_ready_secs),
            cool_down: Duration::from_secs(self.session.cool_down_secs),
            summary: Duration::from_secs(self.session.summary_secs),
        }
    }

    /// The activity log sink: `log.file` when set, else the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn log_sink(&self) -> Result<FileLogSink, ConfigError> {
        let path = match &self.log.file {
            Some(file) => PathBuf::from(file),
            None => data_dir()?.join(DEFAULT_LOG_FILE),
        };
        Ok(FileLogSink::new(path))
    }

    pub fn breathing_activity(&self) -> BreathingActivity {
        BreathingActivity::new(
            Duration::from_secs(self.breathing.inhale_secs),
            Duration::from_secs(self.breathing.exhale_secs),
        )
    }

    /// # Errors
    ///
    /// Returns an error if a configured prompt file cannot be read.
    pub fn reflection_activity(&self, seed: Option<u64>) -> Result<ReflectionActivity> {
        let prompts = prompts::resolve(
            prompts::REFLECTION_PROMPTS,
            self.prompts.reflection_prompts.as_deref().map(Path::new),
        )?;
        let questions = prompts::resolve(
            prompts::REFLECTION_QUESTIONS,
            self.prompts.reflection_questions.as_deref().map(Path::new),
        )?;
        Ok(ReflectionActivity::new(
            bag(prompts, seed)?,
            bag(questions, seed.map(|s| s.wrapping_add(1)))?,
        )
        .with_prep(Duration::from_secs(self.reflection.prep_secs))
        .with_question_pause(Duration::from_secs(self.reflection.question_pause_secs)))
    }

    /// # Errors
    ///
    /// Returns an error if a configured prompt file cannot be read.
    pub fn listing_activity(&self, seed: Option<u64>) -> Result<ListingActivity> {
        let prompts = prompts::resolve(
            prompts::LISTING_PROMPTS,
            self.prompts.listing_prompts.as_deref().map(Path::new),
        )?;
        Ok(ListingActivity::new(bag(prompts, seed.map(|s| s.wrapping_add(2)))?)
            .with_think(Duration::from_secs(self.listing.think_secs)))
    }
}

fn bag(items: Vec<String>, seed: Option<u64>) -> Result<ShuffleBag<String>> {
    match seed {
        Some(seed) => ShuffleBag::seeded(items, seed),
        None => ShuffleBag::new(items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::Activity;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.breathing.inhale_secs, 4);
        assert_eq!(parsed.reflection.question_pause_secs, 6);
        assert!(parsed.seed.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[breathing]\nexhale_secs = 8\n").unwrap();
        assert_eq!(parsed.breathing.exhale_secs, 8);
        assert_eq!(parsed.breathing.inhale_secs, 4);
        assert_eq!(parsed.listing.think_secs, 5);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("breathing.inhale_secs").as_deref(), Some("4"));
        assert_eq!(cfg.get("session.summary_secs").as_deref(), Some("2"));
        assert_eq!(cfg.get("seed").as_deref(), Some("null"));
        assert!(cfg.get("breathing.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "listing.think_secs", "9").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "listing.think_secs").unwrap(),
            &serde_json::Value::Number(9.into())
        );
    }

    #[test]
    fn set_json_value_by_path_fills_optional_path() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "log.file", "/tmp/mindful.txt").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "log.file").unwrap(),
            &serde_json::Value::String("/tmp/mindful.txt".to_string())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "breathing.hold_secs", "2");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "breathing.inhale_secs", "slow");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn apply_sets_seed() {
        let mut cfg = Config::default();
        cfg.apply("seed", "42").unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.get("seed").as_deref(), Some("42"));
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.session.get_ready_secs, 3);
        assert!(path.exists());
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "breathing = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn load_from_keeps_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let original = b"seed = 42\n[breathing]\ninhale_secs = 7\n# caf\xE9\n";
        std::fs::write(&path, original).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
        assert_eq!(std::fs::read(&path).unwrap(), original);
    }

    #[test]
    fn load_from_writes_defaults_when_missing_breathing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.breathing.inhale_secs, 4);
        assert!(path.exists());
    }

    #[test]
    fn zero_pauses_are_rejected() {
        let mut cfg = Config::default();
        let err = cfg.apply("reflection.question_pause_secs", "0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "reflection.question_pause_secs"
        ));
        assert_eq!(cfg.reflection.question_pause_secs, 6);
        assert!(cfg.apply("breathing.exhale_secs", "0").is_err());
        cfg.apply("session.get_ready_secs", "0").unwrap();
        assert_eq!(cfg.session.get_ready_secs, 0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[breathing]\ninhale_secs = 0\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn builds_activities_from_config() {
        let mut cfg = Config::default();
        cfg.breathing.inhale_secs = 5;
        let breathing = cfg.breathing_activity();
        assert_eq!(breathing.inhale(), Duration::from_secs(5));

        let reflection = cfg.reflection_activity(Some(1)).unwrap();
        assert_eq!(reflection.kind(), crate::ActivityKind::Reflection);
        assert_eq!(reflection.questions().pool_len(), prompts::REFLECTION_QUESTIONS.len());

        let pacing = cfg.session_pacing();
        assert_eq!(pacing.summary, Duration::from_secs(2));
    }

    #[test]
    fn unreadable_prompt_file_fails_activity() {
        let mut cfg = Config::default();
        cfg.prompts.listing_prompts = Some("/definitely/not/here.txt".to_string());
        assert!(cfg.listing_activity(None).is_err());
    }
}
