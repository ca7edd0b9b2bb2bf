//! Configuration module for tsdev
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (TSDEV_*)
//! 3. Project config (`tsdev.toml` next to `tsconfig.json`) or `--config <file>`
//! 4. User config (`<config dir>/tsdev/config.toml`)
//! 5. Built-in defaults (lowest priority)
//!
//! The result is read once and never mutated afterwards.

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{
    load_layered, user_config_path, with_env_overrides, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{BuildConfig, BuildFlags, CompilerConfig, ServerConfig, DEFAULT_RESTART_DELAY_MS};
