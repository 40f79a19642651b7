//! Configuration module for Topshelf
//!
//! Loads and validates TOML configuration files. Running without a file
//! falls back to [`Config::builtin`], which matches the real chart sites.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, HttpConfig, SourceSettings};
pub use validation::validate;
