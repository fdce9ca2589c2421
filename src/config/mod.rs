// src/config/mod.rs

//! Configuration loading and validation for compose-hook.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and the secret from the environment
//!   (`loader.rs`).
//! - Validate basic invariants like non-zero ports (`validate.rs`).
//! - Hold the merged result (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_secret, load_settings, settings_from};
pub use model::{AuthSection, ConfigFile, DockerSection, RawConfigFile, ServerSection};
pub use settings::Settings;
