//! TOML-based application configuration.
//!
//! Stores:
//! - Countdown duration and starting fill
//! - Dial colors and stroke width
//! - Default size of the drawing region
//!
//! Configuration is stored at `<config dir>/dial-timer/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::dial::{Color, Size};
use crate::error::{ConfigError, Result};
use crate::timer::TimerSettings;

/// Countdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_total_time_ms")]
    pub total_time_ms: u64,
    #[serde(default = "default_initial_progress")]
    pub initial_progress: f64,
}

/// Dial appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialConfig {
    #[serde(default = "default_handle_color")]
    pub handle_color: Color,
    #[serde(default = "default_inactive_bar_color")]
    pub inactive_bar_color: Color,
    #[serde(default = "default_active_bar_color")]
    pub active_bar_color: Color,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default = "default_density")]
    pub density: f32,
}

/// Drawing region used until the host reports a real size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    #[serde(default = "default_surface_edge")]
    pub width: u32,
    #[serde(default = "default_surface_edge")]
    pub height: u32,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub dial: DialConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
}

// Default functions
fn default_total_time_ms() -> u64 {
    3000
}
fn default_initial_progress() -> f64 {
    1.0
}
fn default_handle_color() -> Color {
    Color::GREEN
}
fn default_inactive_bar_color() -> Color {
    Color::DARK_GRAY
}
fn default_active_bar_color() -> Color {
    Color::LEAF
}
fn default_stroke_width() -> f32 {
    5.0
}
fn default_density() -> f32 {
    1.0
}
fn default_surface_edge() -> u32 {
    200
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            total_time_ms: default_total_time_ms(),
            initial_progress: default_initial_progress(),
        }
    }
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            handle_color: default_handle_color(),
            inactive_bar_color: default_inactive_bar_color(),
            active_bar_color: default_active_bar_color(),
            stroke_width: default_stroke_width(),
            density: default_density(),
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_edge(),
            height: default_surface_edge(),
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
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
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
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot set a whole section".to_string()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if no file exists.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(format!("{}: {e}", path.display())))?;
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                tracing::info!(path = %path.display(), "wrote default config");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
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

    /// Set a value by dot-separated key in memory. The result must still
    /// describe a valid timer.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.settings()?;
        *self = updated;
        Ok(())
    }

    /// Timer construction parameters described by this config.
    ///
    /// # Errors
    ///
    /// Returns an error if the values do not describe a valid timer.
    pub fn settings(&self) -> Result<TimerSettings> {
        let settings = TimerSettings {
            total_time_ms: self.timer.total_time_ms,
            initial_progress: self.timer.initial_progress,
            handle_color: self.dial.handle_color,
            inactive_bar_color: self.dial.inactive_bar_color,
            active_bar_color: self.dial.active_bar_color,
            stroke_width: self.dial.stroke_width,
            density: self.dial.density,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn surface_size(&self) -> Size {
        Size::new(self.surface.width, self.surface.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.total_time_ms, 3000);
        assert_eq!(parsed.dial.active_bar_color, Color::LEAF);
        assert_eq!(parsed.surface_size(), Size::new(200, 200));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[timer]\ntotal_time_ms = 60000\n").unwrap();
        assert_eq!(parsed.timer.total_time_ms, 60000);
        assert_eq!(parsed.timer.initial_progress, 1.0);
        assert_eq!(parsed.dial.stroke_width, 5.0);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.total_time_ms").as_deref(), Some("3000"));
        assert_eq!(cfg.get("dial.handle_color").as_deref(), Some("#00FF00"));
        assert!(cfg.get("dial.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_number_and_color() {
        let mut cfg = Config::default();
        cfg.set("timer.total_time_ms", "60000").unwrap();
        cfg.set("dial.active_bar_color", "#FF5733").unwrap();
        cfg.set("dial.stroke_width", "7.5").unwrap();
        assert_eq!(cfg.timer.total_time_ms, 60000);
        assert_eq!(cfg.dial.active_bar_color, "#FF5733".parse::<Color>().unwrap());
        assert_eq!(cfg.dial.stroke_width, 7.5);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("dial.nonexistent_key", "1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_values_that_break_the_timer() {
        let mut cfg = Config::default();
        assert!(cfg.set("timer.total_time_ms", "0").is_err());
        assert!(cfg.set("timer.total_time_ms", "soon").is_err());
        assert!(cfg.set("timer.initial_progress", "2").is_err());
        assert!(cfg.set("dial.handle_color", "green").is_err());
        assert!(cfg.set("dial", "{}").is_err());
        // Nothing stuck.
        assert_eq!(cfg.timer.total_time_ms, 3000);
        assert_eq!(cfg.dial.handle_color, Color::GREEN);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.timer.total_time_ms, 3000);
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("surface.width", "320").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.surface.width, 320);
    }

    #[test]
    fn load_from_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timer = [").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::ParseFailed(_))));
        assert!(err.to_string().contains("config.toml"));
        // The broken file is left alone rather than replaced with defaults.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "timer = [");
    }

    #[test]
    fn load_from_directory_fails_to_read() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
    }

    #[test]
    fn settings_carry_dial_values() {
        let cfg = Config::default();
        let settings = cfg.settings().unwrap();
        assert_eq!(settings, TimerSettings::default());
    }
}
