//! Configuration type definitions

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::BuildResult;

use super::loader::{self, ConfigWarning};

/// Default restart delay after the supervised process crashes
pub const DEFAULT_RESTART_DELAY_MS: u64 = 10;

/// Build mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BuildFlags {
    /// Production build: output one directory further up, ship package.json
    #[serde(default)]
    pub production: bool,

    /// Invoked from inside a host tool's directory: no `..` prefix on paths
    #[serde(default)]
    pub from_plugin: bool,
}

/// Compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Program and leading arguments used to run the TypeScript compiler
    #[serde(default = "default_compiler_command")]
    pub command: Vec<String>,

    /// Project configuration, relative to the resolved project root
    #[serde(default = "default_tsconfig")]
    pub tsconfig: String,

    /// Abort the task chain when the compiler reports errors
    #[serde(default)]
    pub fail_on_compile_error: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: default_compiler_command(),
            tsconfig: default_tsconfig(),
            fail_on_compile_error: false,
        }
    }
}

fn default_compiler_command() -> Vec<String> {
    vec!["npx".to_string(), "tsc".to_string()]
}

fn default_tsconfig() -> String {
    "tsconfig.json".to_string()
}

/// Supervised server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Runtime program and leading arguments; the entry point is appended
    #[serde(default = "default_runtime_command")]
    pub command: Vec<String>,

    /// Compiled entry point, relative to the resolved project root
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Fixed delay before restarting after a crash
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: default_runtime_command(),
            entry: default_entry(),
            restart_delay_ms: DEFAULT_RESTART_DELAY_MS,
        }
    }
}

impl ServerConfig {
    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

fn default_runtime_command() -> Vec<String> {
    vec!["node".to_string()]
}

fn default_entry() -> String {
    "dist/index.js".to_string()
}

fn default_restart_delay_ms() -> u64 {
    DEFAULT_RESTART_DELAY_MS
}

/// Main configuration structure
///
/// Read once at startup; every task receives it by shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BuildConfig {
    #[serde(default)]
    pub build: BuildFlags,

    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl BuildConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BuildResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BuildResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (TSDEV_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Merge command-line flags; a flag set on the command line always wins
    pub fn with_flags(mut self, production: bool, from_plugin: bool) -> Self {
        self.build.production |= production;
        self.build.from_plugin |= from_plugin;
        self
    }

    pub fn production(&self) -> bool {
        self.build.production
    }

    pub fn from_plugin(&self) -> bool {
        self.build.from_plugin
    }
}
