//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CompanyMetadata, PayrollConfig, PayrollPolicy};

/// The file name looked up inside a configuration directory.
pub const CONFIG_FILE_NAME: &str = "payroll.yaml";

/// Loads and provides access to the payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── payroll.yaml   # Company metadata and payroll policy
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Deduction policy: {:?}", loader.policy().deduction_policy);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `payroll.yaml` is missing (`ConfigNotFound`)
    /// - the file contains invalid YAML or unknown enum values (`ConfigParseError`)
    /// - a policy value is unusable (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config_path = path.as_ref().join(CONFIG_FILE_NAME);
        let config = Self::load_yaml::<PayrollConfig>(&config_path)?;
        config.policy.validate()?;

        tracing::debug!(
            path = %config_path.display(),
            deduction_policy = ?config.policy.deduction_policy,
            transit_policy = ?config.policy.transit_policy,
            "Loaded payroll configuration"
        );

        Ok(Self { config })
    }

    /// Builds a loader from an in-memory policy, validating it first.
    pub fn from_policy(company: CompanyMetadata, policy: PayrollPolicy) -> EngineResult<Self> {
        policy.validate()?;
        Ok(Self {
            config: PayrollConfig { company, policy },
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

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        &self.config.company
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.config.policy
    }
}
