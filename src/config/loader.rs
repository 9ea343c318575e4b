//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! rate tables from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{JurisdictionMetadata, RateBook, StatutoryRates};

/// Loads and provides access to the statutory rate book.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// exposes the immutable [`RateBook`] built from them.
///
/// # Directory Structure
///
/// ```text
/// config/sg/
/// ├── jurisdiction.yaml   # Jurisdiction metadata
/// └── rates/
///     └── 2025.yaml       # Statutory tables effective from this year
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sg").unwrap();
/// let rates = loader.rates().for_year(2025).unwrap();
/// println!("Monthly OW ceiling: {}", rates.cpf.monthly_ordinary_ceiling);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rates: RateBook,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/sg")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata_path = path.join("jurisdiction.yaml");
        let metadata = Self::load_yaml::<JurisdictionMetadata>(&metadata_path)?;

        let rates_dir = path.join("rates");
        let tables = Self::load_rate_tables(&rates_dir)?;

        Ok(Self {
            rates: RateBook::new(metadata, tables),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all yearly rate files from the rates directory.
    fn load_rate_tables(rates_dir: &Path) -> EngineResult<Vec<StatutoryRates>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<StatutoryRates>(&path)?;
                tables.push(table);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the loaded rate book.
    pub fn rates(&self) -> &RateBook {
        &self.rates
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        self.rates.metadata()
    }
}
