use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use n2k_import::ImportOptions;
use n2k_store::{BackendKind, StoreConfig};

use crate::cli::Cli;

/// Application configuration: TOML file merged with command-line overrides.
///
/// Every section and field has a default, so an absent or partial file is
/// fine. A file that exists but does not parse falls back to defaults with
/// a warning rather than aborting; the same policy the service has always
/// had for its configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreSection,
    pub import: ImportSection,
    pub server: ServerSection,
    pub log: LogSection,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub database: BackendKind,
    pub dir: PathBuf,
    pub memory: bool,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            database: BackendKind::Sled,
            dir: PathBuf::from("n2kdb"),
            memory: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ImportSection {
    pub batch_block: usize,
    pub progress_every: usize,
    pub grid: String,
}

impl Default for ImportSection {
    fn default() -> Self {
        let defaults = ImportOptions::default();
        Self {
            batch_block: defaults.batch_block,
            progress_every: defaults.progress_every,
            grid: defaults.grid,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "error".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the file named by `--config` (if readable) and apply flag
    /// overrides on top.
    pub fn resolve(cli: &Cli) -> Self {
        let mut config = Self::load_or_default(cli);
        if let Some(database) = cli.database {
            config.store.database = database;
        }
        if let Some(dir) = &cli.dir {
            config.store.dir = dir.clone();
        }
        if cli.memory {
            config.store.memory = true;
        }
        if let Some(batch_block) = cli.batch_block {
            config.import.batch_block = batch_block;
        }
        if let Some(level) = &cli.log_level {
            config.log.level = level.clone();
        }
        config
    }

    fn load_or_default(cli: &Cli) -> Self {
        let raw = match fs::read_to_string(&cli.config) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!(
                    "error reading config file {:?}, falling back to defaults: {e}",
                    cli.config
                );
                return Self::default();
            }
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "error parsing config file {:?}, falling back to defaults: {e}",
                    cli.config
                );
                Self::default()
            }
        }
    }

    /// The process-lifetime storage selection.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.store.database,
            dir: self.store.dir.clone(),
            in_memory: self.store.memory,
        }
    }

    /// Import tuning derived from the config file.
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            batch_block: self.import.batch_block,
            progress_every: self.import.progress_every,
            grid: self.import.grid.clone(),
        }
    }
}
