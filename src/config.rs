use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::AppError;
use crate::text_input::DEFAULT_CHAR_LIMIT;

pub const DEFAULT_TICK_RATE_MS: u64 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub time: String,
    pub word_count: String,
    pub wpm: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            time: "#33FF57".to_string(),
            word_count: "#FFD700".to_string(),
            wpm: "#ef7c8e".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub char_limit: usize,
    pub tick_rate_ms: u64,
    pub show_banner: bool,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            char_limit: DEFAULT_CHAR_LIMIT,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            show_banner: true,
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Reject values the app cannot run with
    pub fn validate(&self) -> Result<(), AppError> {
        if self.char_limit == 0 {
            return Err(AppError::Config("char_limit must be at least 1".into()));
        }
        if self.tick_rate_ms == 0 {
            return Err(AppError::Config("tick_rate_ms must be at least 1".into()));
        }
        Ok(())
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "wpm") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("wpm_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Config::default(),
            Err(e) => {
                warn!(path = %self.path.display(), %e, "cannot read config, using defaults");
                return Config::default();
            }
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %self.path.display(), %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
