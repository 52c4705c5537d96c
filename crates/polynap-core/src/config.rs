//! TOML-based application configuration.
//!
//! Stores:
//! - Which schedule catalog to rank (built-in or an external file)
//! - Description language and default output format
//! - Log filter used when `POLYNAP_LOG` is unset
//!
//! Configuration is stored at `~/.config/polynap/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{Language, ScheduleCatalog};
use crate::error::{ConfigError, Result};

/// Returns `~/.config/polynap[-dev]/` based on POLYNAP_ENV.
///
/// Set POLYNAP_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Same location as [`data_dir`], without creating it.
pub fn config_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    match std::env::var("POLYNAP_ENV").as_deref() {
        Ok("dev") => base_dir.join("polynap-dev"),
        _ => base_dir.join("polynap"),
    }
}

const CONFIG_FILE: &str = "config.toml";

/// Path of the config file inside [`config_dir`].
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Catalog source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// External catalog file; empty means the built-in catalog.
    #[serde(default)]
    pub path: String,
}

/// Output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub language: Language,
    /// Print JSON instead of text by default.
    #[serde(default)]
    pub json: bool,
}

/// Logging preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `warn` or `polynap_core=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/polynap/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: Language::En,
            json: false,
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
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot overwrite a section".to_string()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join(CONFIG_FILE))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LoadFailed`] if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(cfg)
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SaveFailed`] if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Serialize in the on-disk format.
    ///
    /// # Errors
    ///
    /// Returns an error if TOML serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read `path` if it exists, otherwise return defaults. Never writes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LoadFailed`] if the file exists but cannot be
    /// read or parsed.
    pub fn read_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Read the default location without creating anything, falling back to
    /// defaults on any error. Used by commands that only consume config.
    pub fn load_or_default() -> Self {
        Self::read_or_default(&config_path()).unwrap_or_default()
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

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// The new value must have the same type as the current one.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse.
    pub fn update(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
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
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.update(key, value)?;
        self.save()
    }

    /// External catalog path, if one is configured.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        let path = self.catalog.path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }

    /// Resolve the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if an external catalog is configured and fails to load.
    pub fn catalog(&self) -> Result<ScheduleCatalog> {
        match self.catalog_path() {
            Some(path) => ScheduleCatalog::load(&path),
            None => Ok(ScheduleCatalog::builtin()),
        }
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
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.logging.level, "warn");
    }

    #[test]
    fn empty_file_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("display.language").as_deref(), Some("en"));
        assert_eq!(cfg.get("display.json").as_deref(), Some("false"));
        assert_eq!(cfg.get("catalog.path").as_deref(), Some(""));
        assert!(cfg.get("display.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn update_changes_nested_values() {
        let mut cfg = Config::default();
        cfg.update("display.json", "true").unwrap();
        cfg.update("display.language", "tr").unwrap();
        cfg.update("logging.level", "polynap_core=debug").unwrap();
        assert!(cfg.display.json);
        assert_eq!(cfg.display.language, Language::Tr);
        assert_eq!(cfg.logging.level, "polynap_core=debug");
    }

    #[test]
    fn update_rejects_unknown_key() {
        let mut cfg = Config::default();
        let result = cfg.update("display.nonexistent_key", "value");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));
    }

    #[test]
    fn update_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.update("display.json", "not_a_bool").is_err());
        assert!(cfg.update("display.language", "klingon").is_err());
        assert!(cfg.update("display", "x").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn catalog_defaults_to_builtin() {
        let cfg = Config::default();
        assert!(cfg.catalog_path().is_none());
        let catalog = cfg.catalog().unwrap();
        assert_eq!(catalog.len(), ScheduleCatalog::builtin().len());
    }

    #[test]
    fn save_and_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.update("display.language", "tr").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.display.language, Language::Tr);
    }

    #[test]
    fn read_or_default_does_not_create_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::read_or_default(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(!path.exists());

        let mut saved = Config::default();
        saved.update("display.json", "true").unwrap();
        saved.save_to(&path).unwrap();
        assert!(Config::read_or_default(&path).unwrap().display.json);
    }

    #[test]
    fn load_from_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "display = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }
}
