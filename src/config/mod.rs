//! Configuration loading and management for the HRMS engine.
//!
//! This module loads role resolution tables, business policies and the mock
//! seed records from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use hrms_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/hrms").unwrap();
//! println!("Seeded employees: {}", config.seed().employees.len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendancePolicy, ClaimKeyword, ContractPolicy, EmailPrefixRule, Fallback, HrmsConfig,
    LeavePolicy, PayrollPolicy, PolicyConfig, RoleConfig, SeedData,
};
