//! Layered configuration: command-line flags take precedence over `--set KEY=VALUE`
//! overrides, which take precedence over the TOML file, which takes precedence over the
//! built-in defaults.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
