//! Configuration loading and root folder resolution
//!
//! Settings come from a small TOML file; every key has a built-in default
//! so a missing file is not an error. The root folder (where the canonical
//! table cache lives) is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "LLMC_CONFIG";
/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV_VAR: &str = "LLMC_ROOT_FOLDER";

const APP_DIR: &str = "llm-calculator";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Base URL of the benchmark runs repository (with trailing slash)
    pub benchmark_base_url: String,

    /// URL of the model registry JSON
    pub registry_url: String,

    /// Pricing JSON: local file path or http(s) URL
    ///
    /// The default is the list shipped in the workspace `assets/` folder,
    /// resolved against the working directory.
    pub pricing_source: String,

    /// Root folder for the canonical table cache
    pub root_folder: Option<PathBuf>,

    /// Cache file name inside the root folder
    pub cache_file: String,

    /// HTTP server port
    pub port: u16,

    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            benchmark_base_url: "https://raw.githubusercontent.com/clembench/clembench-runs/main/"
                .to_string(),
            registry_url: "https://raw.githubusercontent.com/clp-research/clemcore/refs/heads/refactor_model_registry/backends/model_registry.json"
                .to_string(),
            pricing_source: "assets/pricing.json".to_string(),
            root_folder: None,
            cache_file: "merged_data.csv".to_string(),
            port: 7860,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Default config file location (`<config_dir>/llm-calculator/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Load the TOML config
///
/// Looks at `explicit`, then `$LLMC_CONFIG`, then the default location.
/// A missing file yields defaults; a malformed file is an error.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .or_else(default_config_path);

    let Some(path) = path else {
        warn!("Could not determine config directory, using defaults");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Resolve the root folder following the priority order above
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Some(path) = std::env::var_os(ROOT_FOLDER_ENV_VAR) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./llm_calculator_data"))
}

/// Prepares the root folder and names files inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    /// Create the root folder if it does not exist yet
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!(path = %self.root_folder.display(), "Created root folder");
        }
        Ok(())
    }

    pub fn cache_path(&self, config: &TomlConfig) -> PathBuf {
        self.root_folder.join(&config.cache_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: TomlConfig = toml::from_str("port = 8080\n[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.cache_file, "merged_data.csv");
        assert!(config.benchmark_base_url.ends_with('/'));
    }

    #[test]
    fn test_cli_argument_wins() {
        let config = TomlConfig {
            root_folder: Some(PathBuf::from("/from/toml")),
            ..Default::default()
        };
        let resolved = resolve_root_folder(Some(Path::new("/from/cli")), &config);
        assert_eq!(resolved, PathBuf::from("/from/cli"));
    }
}
