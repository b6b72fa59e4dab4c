//! Configuration loading and management for the Payroll Engine.
//!
//! This module loads the payroll policy (absence pricing, transit formula,
//! month constants, optional deduction cutoff) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded payroll config for {}", config.company().name);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{
    CompanyMetadata, DeductionPolicy, MAX_CUTOFF_BUSINESS_DAY, PayrollConfig, PayrollPolicy,
    TransitPolicy, TransitScope,
};
