//! Configuration discovery
//!
//! Resolves where the refractive-index database lives and how output paths
//! are derived. Settings come from an optional YAML file; the database
//! directory can also be overridden from the environment or the CLI.
//!
//! Database directory resolution order:
//! 1. CLI override (`--database`)
//! 2. `REFCAT_DATABASE` environment variable
//! 3. `database_dir` in the config file
//! 4. `~/refractiveindex.info-database`

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

use crate::error::{CatalogError, Result};

/// Environment variable overriding the database directory
pub const DATABASE_ENV: &str = "REFCAT_DATABASE";

/// Catalog file looked up inside the database directory
pub const DEFAULT_CATALOG_FILE: &str = "catalog-nk.yml";

/// Suffix appended to the input path when no output path is given
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".sorted";

/// Database directory name under the home directory
pub const DEFAULT_DATABASE_DIR: &str = "refractiveindex.info-database";

const CONFIG_FILE: &str = "config.yml";

/// User settings (`<config dir>/refcat/config.yml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Settings {
    /// Root of the refractive-index database checkout
    pub database_dir: Option<PathBuf>,

    /// Catalog file name relative to the database directory
    pub catalog_file: String,

    /// Suffix for the default output path
    pub output_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_dir: None,
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl Settings {
    /// Load settings, preferring an explicit config file
    ///
    /// An explicit file must exist. The platform config file is optional;
    /// when absent the defaults are used.
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_override {
            if !path.exists() {
                return Err(CatalogError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            debug!("Using --config override: {}", path.display());
            return Self::load_from_path(path);
        }

        match Self::platform_config_path() {
            Some(path) if path.exists() => {
                info!("Found configuration at {}", path.display());
                Self::load_from_path(&path)
            }
            Some(path) => {
                debug!("No configuration found at {}", path.display());
                Ok(Self::default())
            }
            None => {
                debug!("No platform config directory available");
                Ok(Self::default())
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content, &path.display().to_string())
    }

    /// Parse settings from YAML; an empty document yields the defaults
    pub fn from_yaml(content: &str, origin: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(content).map_err(|e| CatalogError::ConfigInvalid {
            origin: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// Location of the per-user config file, if the platform has one
    pub fn platform_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "refcat")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Resolve the database directory
    pub fn database_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        self.database_dir_with_env(cli_override, std::env::var_os(DATABASE_ENV))
    }

    fn database_dir_with_env(&self, cli_override: Option<&Path>, env: Option<OsString>) -> PathBuf {
        if let Some(path) = cli_override {
            trace!("Database directory from CLI: {}", path.display());
            return path.to_path_buf();
        }

        if let Some(value) = env.filter(|v| !v.is_empty()) {
            trace!("Database directory from {}", DATABASE_ENV);
            return PathBuf::from(value);
        }

        if let Some(path) = &self.database_dir {
            trace!("Database directory from config: {}", path.display());
            return path.clone();
        }

        let home = directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        home.join(DEFAULT_DATABASE_DIR)
    }

    /// Default input catalog: `<database dir>/<catalog file>`
    pub fn catalog_path(&self, database_override: Option<&Path>) -> PathBuf {
        self.database_dir(database_override).join(&self.catalog_file)
    }

    /// Default output path: the input path with the output suffix appended
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let mut name = input.as_os_str().to_os_string();
        name.push(&self.output_suffix);
        PathBuf::from(name)
    }
}
