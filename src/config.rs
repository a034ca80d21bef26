use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use tracing::info;

use crate::workflows::{FileHistoryStore, HistoryStore, InMemoryHistoryStore, WorkflowEngine};

/// Main configuration structure for docflow
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DocflowConfig {
    /// Where transition history is kept
    pub history: HistoryConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    Memory,
    File,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub backend: HistoryBackend,
    /// JSON-lines file used by the file backend
    pub path: PathBuf,
    /// Connection string used by the sqlite backend
    pub database_url: String,
    pub max_connections: u32,
    /// Run embedded migrations on startup
    pub auto_migrate: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    /// Emit logs as JSON instead of human-readable lines
    pub json: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            backend: HistoryBackend::File,
            path: PathBuf::from(".docflow/history.jsonl"),
            database_url: "sqlite://.docflow/history.db".to_string(),
            max_connections: 5,
            auto_migrate: true,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: true,
        }
    }
}

impl DocflowConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (docflow.toml, .docflow-rc)
    /// 3. Environment variables (prefixed with DOCFLOW_, sections split by `__`)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Same as [`Self::load`], resolving configuration files under `dir`
    pub fn load_from(dir: &Path) -> Result<Self> {
        let mut builder = Config::builder();

        let toml_path = dir.join("docflow.toml");
        if toml_path.exists() {
            builder = builder.add_source(File::from(toml_path));
        }

        let rc_path = dir.join(".docflow-rc");
        if rc_path.exists() {
            builder = builder.add_source(File::from(rc_path).format(config::FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("DOCFLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env from the working directory if it exists
    pub fn load_env_file() -> Result<bool> {
        Self::load_env_file_from(Path::new("."))
    }

    /// Load `dir/.env` into the process environment.
    ///
    /// Returns whether a file was found. A malformed file is an error.
    pub fn load_env_file_from(dir: &Path) -> Result<bool> {
        let path = dir.join(".env");
        if !path.exists() {
            return Ok(false);
        }
        dotenvy::from_path(&path)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(true)
    }

    /// Build a workflow engine over the configured history backend
    pub async fn build_engine(&self) -> Result<WorkflowEngine> {
        let store: Arc<dyn HistoryStore> = match self.history.backend {
            HistoryBackend::Memory => Arc::new(InMemoryHistoryStore::new()),
            HistoryBackend::File => Arc::new(FileHistoryStore::new(self.history.path.clone())),
            #[cfg(feature = "database")]
            HistoryBackend::Sqlite => Arc::new(
                crate::database::SqliteHistoryStore::new(
                    &self.history.database_url,
                    self.history.max_connections,
                    self.history.auto_migrate,
                )
                .await?,
            ),
            #[cfg(not(feature = "database"))]
            HistoryBackend::Sqlite => {
                anyhow::bail!("sqlite history backend requires the `database` feature")
            }
        };
        info!(backend = ?self.history.backend, "History store ready");
        Ok(WorkflowEngine::new(store))
    }
}

struct LoadedConfig {
    config: DocflowConfig,
    env_file_loaded: bool,
}

/// Global configuration instance
static CONFIG: LazyLock<Result<LoadedConfig>> = LazyLock::new(|| {
    // .env must be applied before the DOCFLOW_* environment source is read
    let env_file_loaded = DocflowConfig::load_env_file()?;
    Ok(LoadedConfig {
        config: DocflowConfig::load()?,
        env_file_loaded,
    })
});

fn loaded() -> Result<&'static LoadedConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {:#}", e))
}

/// Get the global configuration
pub fn config() -> Result<&'static DocflowConfig> {
    loaded().map(|l| &l.config)
}

/// Initialize configuration (called at startup, once logging is up)
pub fn init_config() -> Result<&'static DocflowConfig> {
    let loaded = loaded()?;
    if loaded.env_file_loaded {
        info!("Loaded environment variables from .env file");
    }
    info!(backend = ?loaded.config.history.backend, "Configuration loaded successfully");
    Ok(&loaded.config)
}
