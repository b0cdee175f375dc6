//! Path management for bazaar data and configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/bazaar/            # Config directory
//! └── bazaar.toml              # Runtime settings
//!
//! ~/.local/share/bazaar/       # Data directory (overridable)
//! ├── products.json            # Single products, keyed by id
//! ├── bundles.json             # Bundles, keyed by id
//! └── config.json              # Workspace configuration and purchase counters
//! ```

use std::path::{Path, PathBuf};

use bazaar_core::error::{BazaarError, Result};

const APP_DIR: &str = "bazaar";

/// Resolves the files bazaar reads and writes.
#[derive(Debug, Clone)]
pub struct BazaarPaths {
    data_dir: PathBuf,
}

impl BazaarPaths {
    pub const PRODUCTS_FILE: &'static str = "products.json";
    pub const BUNDLES_FILE: &'static str = "bundles.json";
    pub const CONFIG_FILE: &'static str = "config.json";
    pub const SETTINGS_FILE: &'static str = "bazaar.toml";

    /// Uses `data_dir` if given, the platform data directory otherwise.
    pub fn new(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_data_dir()?,
        };
        Ok(Self { data_dir })
    }

    /// Platform data directory (e.g., `~/.local/share/bazaar/`).
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| BazaarError::config("Cannot determine data directory"))
    }

    /// Default runtime settings file (e.g., `~/.config/bazaar/bazaar.toml`).
    pub fn default_settings_file() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(Self::SETTINGS_FILE))
            .ok_or_else(|| BazaarError::config("Cannot determine config directory"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn products_file(&self) -> PathBuf {
        self.data_dir.join(Self::PRODUCTS_FILE)
    }

    pub fn bundles_file(&self) -> PathBuf {
        self.data_dir.join(Self::BUNDLES_FILE)
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(Self::CONFIG_FILE)
    }
}
