//! Configuration Module
//!
//! Client settings and configuration loading.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{ClientConfig, FileConfig, CZ_API_URL, DEFAULT_TIMEOUT_SECS, SK_API_URL};
