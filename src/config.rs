//! Runtime configuration and the fixed city-to-file table.
//!
//! Settings are read from `<config_dir>/bikeshare/config.json` when present
//! (or from an explicit path), then command-line overrides are layered on top.
//! Every field has a default, so a partial file is fine:
//!
//! ```json
//! { "data_dir": "/srv/bikeshare" }
//! ```

use crate::error::{BikeshareError, Result, ResultExt as _};
use crate::explorer::filters::City;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dataset file for each city, relative to [`AppConfig::data_dir`].
pub const CITY_DATA: [(City, &str); 3] = [
    (City::Chicago, City::Chicago.file_name()),
    (City::NewYork, City::NewYork.file_name()),
    (City::Washington, City::Washington.file_name()),
];

/// Rows shown per page by the row viewer unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the three city CSV files
    pub data_dir: PathBuf,
    /// Rows per page in the row viewer
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Standard config file location.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bikeshare").join("config.json"))
    }

    /// Load configuration from `path`, or from the standard location.
    ///
    /// A missing file yields the defaults. An explicitly requested file that
    /// does not exist is an error.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::Config`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) if !p.exists() => {
                return Err(BikeshareError::Config(format!(
                    "config file {} does not exist",
                    p.display()
                )));
            }
            Some(p) => p.to_path_buf(),
            None => match Self::config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| BikeshareError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_json(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration JSON, filling in missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::Config`] for malformed JSON or a zero page size.
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validated()
    }

    /// Reject settings the session cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::Config`] when `page_size` is zero.
    pub fn validated(self) -> Result<Self> {
        if self.page_size == 0 {
            return Err(BikeshareError::Config(
                "page_size must be at least 1".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Full path of the dataset for `city`.
    pub fn city_file(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }
}
