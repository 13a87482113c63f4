//! Configuration loading for the RSE costing engine.
//!
//! Salary scales are loaded from YAML files: scale metadata plus one band
//! file per financial year.
//!
//! # Example
//!
//! ```no_run
//! use rse_costing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/uos-grades").unwrap();
//! println!("Loaded scale: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BandEntry, BandFile, SalaryScale, ScaleMetadata};
