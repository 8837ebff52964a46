//! Configuration Module
//!
//! Loads and validates configuration from TOML files and the environment.

pub mod loader;

pub use loader::{
    load_config, load_with_env, Config, ConfigError, ConfigStatus, CredentialStatus,
};
