use crate::core::reconcile::DuplicatePolicy;
use crate::errors::{AppError, AppResult};
use crate::models::RollupOrder;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys every complete configuration file carries.
pub const CONFIG_KEYS: &[&str] = &[
    "database",
    "currency_symbol",
    "separator_char",
    "duplicate_clock_policy",
    "rollup_order",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    /// `last` | `first`: which duplicate clock event of a kind wins per worker-day
    #[serde(default = "default_duplicate_clock_policy")]
    pub duplicate_clock_policy: String,
    /// `cost` | `hours` | `name`
    #[serde(default = "default_rollup_order")]
    pub rollup_order: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_duplicate_clock_policy() -> String {
    DuplicatePolicy::LastWins.as_str().to_string()
}
fn default_rollup_order() -> String {
    "cost".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            currency_symbol: default_currency_symbol(),
            separator_char: default_separator_char(),
            duplicate_clock_policy: default_duplicate_clock_policy(),
            rollup_order: default_rollup_order(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rlaborlog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rlaborlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rlaborlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rlaborlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Keys from [`CONFIG_KEYS`] absent from the file at `path`.
    pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

        let map = yaml
            .as_mapping()
            .ok_or_else(|| AppError::Config("configuration root is not a mapping".into()))?;

        Ok(CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(serde_yaml::Value::String(k.to_string())))
            .collect())
    }

    pub fn duplicate_policy(&self) -> AppResult<DuplicatePolicy> {
        DuplicatePolicy::from_input(&self.duplicate_clock_policy).ok_or_else(|| {
            AppError::Config(format!(
                "duplicate_clock_policy must be 'last' or 'first', got '{}'",
                self.duplicate_clock_policy
            ))
        })
    }

    pub fn rollup_order(&self) -> AppResult<RollupOrder> {
        RollupOrder::from_input(&self.rollup_order).ok_or_else(|| {
            AppError::Config(format!(
                "rollup_order must be 'cost', 'hours' or 'name', got '{}'",
                self.rollup_order
            ))
        })
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            Self::with_database(db_path.clone()).save(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
