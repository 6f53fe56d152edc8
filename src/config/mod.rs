//! Configuration module for the two-way speech translator.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the language
//! defaults and the translation endpoint, `AppPaths` for cross-platform
//! config directories, and TOML persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, LanguagesConfig, TranslationConfig};
