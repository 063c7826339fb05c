use crate::error::StorageError;
use crate::lists::ListManager;
use crate::lookup::ModelConfig;
use crate::storage::{JsonDocumentStore, SqliteStore};
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "GLOSARIO_DATA_DIR";
pub const LOG_FILE_ENV: &str = "GLOSARIO_LOG_FILE";
pub const MODEL_ENV: &str = "GLOSARIO_MODEL";

const DB_FILE_NAME: &str = "glosario.db";
const LOG_FILE_NAME: &str = "glosario.log";

fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\glosario")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/glosario")
    }
}

/// Where data lives and which model answers lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_file: PathBuf,
    pub log_file: PathBuf,
    pub lookup: ModelConfig,
}

impl Config {
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            db_file: data_dir.join(DB_FILE_NAME),
            log_file: data_dir.join(LOG_FILE_NAME),
            data_dir,
            lookup: ModelConfig::default(),
        }
    }

    /// Defaults overridden by `GLOSARIO_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let data_dir = set(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let mut config = Self::with_data_dir(data_dir);

        if let Some(log_file) = set(LOG_FILE_ENV) {
            config.log_file = PathBuf::from(log_file);
        }
        if let Some(model) = set(MODEL_ENV) {
            config.lookup.model = model;
        }
        config
    }

    pub fn open_store(&self) -> Result<SqliteStore, StorageError> {
        SqliteStore::open(&self.db_file)
    }

    /// Opens the on-disk store and wraps it in a list manager.
    pub fn open_list_manager(
        &self,
    ) -> Result<ListManager<JsonDocumentStore<SqliteStore>>, StorageError> {
        let store = self.open_store()?;
        Ok(ListManager::new(JsonDocumentStore::new(store)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_data_dir(default_data_dir())
    }
}
