//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, BuildResult};

use super::types::BuildConfig;

/// File name of the project-level config, next to `tsconfig.json`
pub const PROJECT_CONFIG_FILE: &str = "tsdev.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BuildResult<(BuildConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_with_warnings(path, &content)
}

pub(crate) fn parse_with_warnings(
    path: &Path,
    content: &str,
) -> BuildResult<(BuildConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: BuildConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BuildError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the user config, then the project file (or `--config`) on top of it.
///
/// Later layers override earlier ones key by key. An explicit file must
/// exist; the others are optional.
pub fn load_layered(
    explicit: Option<&Path>,
    project_config: &Path,
) -> BuildResult<(BuildConfig, Vec<ConfigWarning>)> {
    let user_config = user_config_path();
    load_layered_from(user_config.as_deref(), explicit, project_config)
}

pub(crate) fn load_layered_from(
    user_config: Option<&Path>,
    explicit: Option<&Path>,
    project_config: &Path,
) -> BuildResult<(BuildConfig, Vec<ConfigWarning>)> {
    let mut layers: Vec<&Path> = Vec::new();
    if let Some(user) = user_config.filter(|p| p.is_file()) {
        layers.push(user);
    }
    match explicit {
        Some(path) => layers.push(path),
        None if project_config.is_file() => layers.push(project_config),
        None => {}
    }

    let mut merged = toml::Table::new();
    let mut warnings = Vec::new();
    for path in &layers {
        let content = fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        // each layer must be valid on its own
        let (_, layer_warnings) = parse_with_warnings(path, &content)?;
        warnings.extend(layer_warnings);

        let table: toml::Table = toml::from_str(&content).map_err(|e| BuildError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        merge_tables(&mut merged, table);
    }

    let Some(last) = layers.last() else {
        return Ok((BuildConfig::default(), warnings));
    };
    log::debug!("config layers: {layers:?}");
    let config = toml::Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| BuildError::InvalidConfig {
            file: last.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok((config, warnings))
}

/// Overlay `upper` onto `base`; nested tables merge, everything else is replaced
fn merge_tables(base: &mut toml::Table, upper: toml::Table) {
    for (key, value) in upper {
        let upper_table = match value {
            toml::Value::Table(table) => table,
            other => {
                base.insert(key, other);
                continue;
            }
        };
        if let Some(toml::Value::Table(lower)) = base.get_mut(&key) {
            merge_tables(lower, upper_table);
            continue;
        }
        base.insert(key, toml::Value::Table(upper_table));
    }
}

/// `<config dir>/tsdev/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tsdev").join("config.toml"))
}

/// Apply environment variable overrides (TSDEV_* prefix)
pub fn with_env_overrides(
    mut config: BuildConfig,
    get_env: impl Fn(&str) -> Option<String>,
) -> BuildConfig {
    // TSDEV_COMPILER (whitespace separated command line)
    if let Some(command) = get_env("TSDEV_COMPILER").and_then(|v| split_command(&v)) {
        config.compiler.command = command;
    }

    // TSDEV_RUNTIME
    if let Some(command) = get_env("TSDEV_RUNTIME").and_then(|v| split_command(&v)) {
        config.server.command = command;
    }

    // TSDEV_RESTART_DELAY_MS
    if let Some(delay) = get_env("TSDEV_RESTART_DELAY_MS") {
        match delay.trim().parse::<u64>() {
            Ok(ms) => config.server.restart_delay_ms = ms,
            Err(_) => log::warn!("ignoring TSDEV_RESTART_DELAY_MS={delay:?}: not a number"),
        }
    }

    config
}

fn split_command(value: &str) -> Option<Vec<String>> {
    let parts: Vec<String> = value.split_whitespace().map(str::to_string).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "build",
        "production",
        "from_plugin",
        "compiler",
        "command",
        "tsconfig",
        "fail_on_compile_error",
        "server",
        "entry",
        "restart_delay_ms",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
