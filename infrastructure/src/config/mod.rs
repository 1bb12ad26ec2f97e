//! Configuration loading and TOML data types

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDebateConfig, FileModelProfile, FileProviderConfig,
};
pub use loader::ConfigLoader;
