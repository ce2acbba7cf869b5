use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::AdvisorError;

const APP_DIR: &str = "advisor";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SUBMIT_PATH: &str = "/api/submit-form/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub submit_path: String,
    pub timeout_secs: u64,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            submit_path: DEFAULT_SUBMIT_PATH.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            currency_symbol: "₹".into(),
        }
    }
}

impl Config {
    /// Full URL the questionnaire payload is posted to.
    pub fn submit_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.submit_path
        )
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, AdvisorError> {
        let base = dirs::config_dir().ok_or_else(|| {
            AdvisorError::Config("could not resolve a user configuration directory".into())
        })?;
        Self::from_base(base)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, AdvisorError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, AdvisorError> {
        let config_root = base.join(APP_DIR);
        ensure_dir(&config_root)?;
        Ok(Self {
            path: config_root.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, AdvisorError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), AdvisorError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn ensure_dir(path: &Path) -> Result<(), AdvisorError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), AdvisorError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = Config::default();
        assert_eq!(config.submit_url(), "http://localhost:8000/api/submit-form/");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn submit_url_tolerates_trailing_slash() {
        let config = Config {
            base_url: "http://localhost:8000/".into(),
            ..Config::default()
        };
        assert_eq!(config.submit_url(), "http://localhost:8000/api/submit-form/");
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.base_url = "http://scoring.internal:9000".into();
        config.timeout_secs = 5;
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.base_url, "http://scoring.internal:9000");
        assert_eq!(loaded.timeout_secs, 5);
        assert!(manager.path().exists());
    }
}
