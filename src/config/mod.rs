use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::Result;
use crate::storage::JsonFileStore;
use crate::utils::paths::{self, ensure_dir};

const DEFAULT_PROFILE_FILE: &str = "profile.json";

/// Display and storage preferences read from `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub grouping_separator: char,
    pub week_start: Weekday,
    /// File name of the key-value profile inside the data directory.
    pub profile_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            grouping_separator: ',',
            week_start: Weekday::Sun,
            profile_file: DEFAULT_PROFILE_FILE.into(),
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at [`paths::app_data_dir`].
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Loads `config.json`, writing the defaults first when it is missing.
    pub fn load_or_init(&self) -> Result<Config> {
        if self.path.exists() {
            return self.load();
        }
        let config = Config::default();
        self.save(&config)?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Opens the key-value profile named by `config`.
    pub fn open_profile(&self, config: &Config) -> Result<JsonFileStore> {
        JsonFileStore::new(self.base.join(&config.profile_file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn first_load_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert!(!manager.path().exists());
        assert_eq!(manager.load_or_init().unwrap(), Config::default());
        assert!(manager.path().exists());

        fs::write(manager.path(), r#"{ "currency_symbol": "£" }"#).unwrap();
        assert_eq!(manager.load_or_init().unwrap().currency_symbol, "£");
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            currency_symbol: "€".into(),
            grouping_separator: '.',
            week_start: Weekday::Mon,
            profile_file: "work.json".into(),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        let profile = manager.open_profile(&config).unwrap();
        assert_eq!(profile.path(), temp.path().join("work.json"));
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "currency_symbol": "£" }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency_symbol, "£");
        assert_eq!(config.week_start, Weekday::Sun);
        assert_eq!(config.profile_file, "profile.json");
    }
}
