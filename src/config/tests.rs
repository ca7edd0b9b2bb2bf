//! Tests for the config module

use super::loader::{load_layered_from, parse_with_warnings, with_env_overrides};
use super::types::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_default() {
    let config = BuildConfig::default();

    assert!(!config.production());
    assert!(!config.from_plugin());
    assert_eq!(config.compiler.command, vec!["npx", "tsc"]);
    assert_eq!(config.compiler.tsconfig, "tsconfig.json");
    assert!(!config.compiler.fail_on_compile_error);
    assert_eq!(config.server.command, vec!["node"]);
    assert_eq!(config.server.entry, "dist/index.js");
    assert_eq!(config.server.restart_delay(), Duration::from_millis(10));
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[build]
production = true

[compiler]
command = ["node_modules/.bin/tsc"]
fail_on_compile_error = true

[server]
entry = "dist/main.js"
restart_delay_ms = 250
"#;

    let config: BuildConfig = toml::from_str(toml).unwrap();

    assert!(config.production());
    assert!(!config.from_plugin());
    assert_eq!(config.compiler.command, vec!["node_modules/.bin/tsc"]);
    assert_eq!(config.compiler.tsconfig, "tsconfig.json");
    assert!(config.compiler.fail_on_compile_error);
    assert_eq!(config.server.entry, "dist/main.js");
    assert_eq!(config.server.restart_delay_ms, 250);
}

#[test]
fn test_unknown_keys_become_warnings() {
    let toml = r#"
[server]
entyr = "dist/main.js"
"#;

    let (config, warnings) = parse_with_warnings(Path::new("tsdev.toml"), toml).unwrap();

    assert_eq!(config.server.entry, "dist/index.js");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "entyr");
    assert_eq!(warnings[0].line, Some(3));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("entry"));
}

#[test]
fn test_invalid_toml_is_an_error() {
    let result = parse_with_warnings(Path::new("tsdev.toml"), "[server\nentry = 1");
    assert!(result.is_err());
}

#[test]
fn test_cli_flags_win() {
    let config = BuildConfig::default().with_flags(true, false);
    assert!(config.production());
    assert!(!config.from_plugin());

    let from_file: BuildConfig = toml::from_str("[build]\nfrom_plugin = true\n").unwrap();
    let merged = from_file.with_flags(false, false);
    assert!(merged.from_plugin());
}

#[test]
fn test_env_overrides() {
    let env = env_from(&[
        ("TSDEV_COMPILER", "pnpm exec tsc"),
        ("TSDEV_RUNTIME", "bun"),
        ("TSDEV_RESTART_DELAY_MS", "500"),
    ]);

    let config = with_env_overrides(BuildConfig::default(), env);

    assert_eq!(config.compiler.command, vec!["pnpm", "exec", "tsc"]);
    assert_eq!(config.server.command, vec!["bun"]);
    assert_eq!(config.server.restart_delay_ms, 500);
}

#[test]
fn test_env_overrides_ignore_garbage() {
    let env = env_from(&[("TSDEV_COMPILER", "   "), ("TSDEV_RESTART_DELAY_MS", "soon")]);

    let config = with_env_overrides(BuildConfig::default(), env);

    assert_eq!(config.compiler.command, vec!["npx", "tsc"]);
    assert_eq!(config.server.restart_delay_ms, DEFAULT_RESTART_DELAY_MS);
}

#[test]
fn test_load_layered_prefers_explicit_file() {
    let dir = tempdir().unwrap();
    let explicit = dir.path().join("custom.toml");
    let project = dir.path().join("tsdev.toml");
    fs::write(&explicit, "[server]\nentry = \"out/app.js\"\n").unwrap();
    fs::write(&project, "[server]\nentry = \"dist/other.js\"\n").unwrap();

    let (config, _) = load_layered_from(None, Some(&explicit), &project).unwrap();
    assert_eq!(config.server.entry, "out/app.js");

    let (config, _) = load_layered_from(None, None, &project).unwrap();
    assert_eq!(config.server.entry, "dist/other.js");
}

#[test]
fn test_load_layered_missing_explicit_file_fails() {
    let dir = tempdir().unwrap();
    let result = load_layered_from(
        None,
        Some(&dir.path().join("missing.toml")),
        &dir.path().join("tsdev.toml"),
    );
    assert!(result.is_err());
}

#[test]
fn test_load_layered_merges_user_and_project_keys() {
    let dir = tempdir().unwrap();
    let user = dir.path().join("user.toml");
    let project = dir.path().join("tsdev.toml");
    fs::write(
        &user,
        "[compiler]\ncommand = [\"pnpm\", \"exec\", \"tsc\"]\n\n[server]\nentry = \"out/main.js\"\n",
    )
    .unwrap();
    fs::write(&project, "[server]\nrestart_delay_ms = 250\n").unwrap();

    let (config, warnings) = load_layered_from(Some(&user), None, &project).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(config.compiler.command, vec!["pnpm", "exec", "tsc"]);
    // sibling keys of an overridden section survive
    assert_eq!(config.server.entry, "out/main.js");
    assert_eq!(config.server.restart_delay_ms, 250);
}

#[test]
fn test_project_layer_overrides_user_layer() {
    let dir = tempdir().unwrap();
    let user = dir.path().join("user.toml");
    let explicit = dir.path().join("ci.toml");
    fs::write(&user, "[server]\nrestart_delay_ms = 5\nbogus = 1\n").unwrap();
    fs::write(&explicit, "[server]\nrestart_delay_ms = 40\n").unwrap();

    let (config, warnings) =
        load_layered_from(Some(&user), Some(&explicit), &dir.path().join("tsdev.toml")).unwrap();

    assert_eq!(config.server.restart_delay_ms, 40);
    assert_eq!(warnings.len(), 1, "warnings from every layer");
    assert_eq!(warnings[0].key, "bogus");
    assert_eq!(warnings[0].file, user);
}

#[test]
fn test_load_layered_without_files_is_default() {
    let dir = tempdir().unwrap();
    let (config, warnings) = load_layered_from(
        Some(&dir.path().join("absent.toml")),
        None,
        &dir.path().join("tsdev.toml"),
    )
    .unwrap();
    assert_eq!(config, BuildConfig::default());
    assert!(warnings.is_empty());
}
