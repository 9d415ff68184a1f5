//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the HRMS
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{HrmsError, HrmsResult};

use super::types::{HrmsConfig, PolicyConfig, RoleConfig, SeedData};

/// Loads and provides access to the HRMS configuration.
///
/// # Directory Structure
///
/// ```text
/// config/hrms/
/// ├── roles.yaml     # Claim keywords, email prefix table, fallback
/// ├── policies.yaml  # Attendance, contract, leave and payroll rules
/// └── seed.yaml      # Mock records loaded into the store
/// ```
///
/// # Example
///
/// ```no_run
/// use hrms_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hrms").unwrap();
/// println!("Grace period: {} min", loader.policies().attendance.late_grace_minutes);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HrmsConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or misses a required field
    /// - A policy value is unusable (zero working days per month)
    pub fn load<P: AsRef<Path>>(path: P) -> HrmsResult<Self> {
        let path = path.as_ref();

        let roles = Self::load_yaml::<RoleConfig>(&path.join("roles.yaml"))?;

        let policies_path = path.join("policies.yaml");
        let policies = Self::load_yaml::<PolicyConfig>(&policies_path)?;
        Self::validate_policies(&policies, &policies_path)?;

        let seed = Self::load_yaml::<SeedData>(&path.join("seed.yaml"))?;

        debug!(
            path = %path.display(),
            employees = seed.employees.len(),
            email_prefixes = roles.email_prefixes.len(),
            "Loaded HRMS configuration"
        );

        Ok(Self {
            config: HrmsConfig::new(roles, policies, seed),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: HrmsConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> HrmsResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| HrmsError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| HrmsError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_policies(policies: &PolicyConfig, path: &Path) -> HrmsResult<()> {
        if policies.payroll.working_days_per_month == 0 {
            return Err(HrmsError::ConfigParseError {
                path: path.display().to_string(),
                message: "payroll.working_days_per_month must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &HrmsConfig {
        &self.config
    }

    /// Returns the role resolution tables.
    pub fn roles(&self) -> &RoleConfig {
        self.config.roles()
    }

    /// Returns the business policies.
    pub fn policies(&self) -> &PolicyConfig {
        self.config.policies()
    }

    /// Returns the seed records.
    pub fn seed(&self) -> &SeedData {
        self.config.seed()
    }
}
