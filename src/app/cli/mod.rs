//! CLI module containing argument parsing, configuration loading and validation

pub mod args;
pub mod config;
pub mod validation;

pub use args::Args;
pub use config::ConfigError;
pub use validation::ScanSettings;
