use crate::core::aggregator::{AggregationPolicy, DEFAULT_MAX_LOOKBACK_HOURS};
use crate::core::report::DEFAULT_UNAVAILABLE_MARKER;
use crate::core::service::ServiceOptions;
use crate::errors::{AppError, AppResult};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "rattendance";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    /// First day of the weekly cut (`monday`, `sunday`, ...)
    pub week_start: String,
    /// Per-operation store deadline in milliseconds; 0 disables it.
    pub store_timeout_ms: u64,
    pub max_lookback_hours: i64,
    pub unavailable_marker: String,
    /// Default tracing filter when `RATTENDANCE_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            week_start: "monday".to_string(),
            store_timeout_ms: 5_000,
            max_lookback_hours: DEFAULT_MAX_LOOKBACK_HOURS,
            unavailable_marker: DEFAULT_UNAVAILABLE_MARKER.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join(APP_DIR)
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(format!(".{APP_DIR}"))
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))?;

        cfg.week_start_day()?;
        Ok(cfg)
    }

    /// Create the config directory, write the config file (unless `is_test`) and return
    /// the database path to initialize.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) if Path::new(name).is_absolute() => PathBuf::from(name),
            Some(name) => dir.join(name),
            None => Self::database_file(),
        };

        if !is_test {
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(format!("cannot serialize config: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }

    pub fn week_start_day(&self) -> AppResult<Weekday> {
        self.week_start.trim().parse::<Weekday>().map_err(|_| {
            AppError::Config(format!(
                "week_start: '{}' is not a day of the week",
                self.week_start
            ))
        })
    }

    pub fn store_timeout(&self) -> Option<Duration> {
        (self.store_timeout_ms > 0).then(|| Duration::from_millis(self.store_timeout_ms))
    }

    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            timeout: self.store_timeout(),
            policy: AggregationPolicy::with_lookback_hours(self.max_lookback_hours),
            unavailable_marker: self.unavailable_marker.clone(),
        }
    }
}
