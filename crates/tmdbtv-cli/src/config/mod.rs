//! Application configuration module.
//!
//! Manages the TOML config file holding the TMDB meta pool defaults
//! (API key, session IDs, language) and transport settings.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TmdbConfig, mask_secret};
pub use paths::resolve_config_path;
