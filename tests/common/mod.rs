//! Common helpers for tsdev integration tests.
//!
//! `TestProject` lays out a throwaway project the way tsdev expects to find
//! it when run from a `build/` directory:
//!
//! ```text
//! <tmp>/workspace/app/          project root (src/, tsconfig.json, dist/)
//! <tmp>/workspace/app/build/    working directory
//! <tmp>/workspace/dist/         production output
//! ```

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running the tsdev binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parsed NDJSON lines of `--json` output
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("invalid json line {line:?}: {e}"))
            })
            .collect()
    }

    /// Events whose `event` tag equals `name`
    pub fn events_named(&self, name: &str) -> Vec<serde_json::Value> {
        self.events()
            .into_iter()
            .filter(|event| event["event"] == name)
            .collect()
    }
}

/// Isolated project plus an isolated home directory
pub struct TestProject {
    tmp: TempDir,
    home: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let home = TempDir::new().expect("Failed to create home dir");
        std::fs::create_dir_all(tmp.path().join("workspace/app/build"))
            .expect("Failed to create build dir");
        Self { tmp, home }
    }

    pub fn workspace(&self) -> PathBuf {
        self.tmp.path().join("workspace")
    }

    /// Path relative to the project root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.workspace().join("app").join(relative)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.path("build")
    }

    pub fn write(&self, relative: &str, content: &str) -> &Self {
        write_file(&self.path(relative), content);
        self
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
    }

    /// Run from `build/` with a compiler that succeeds without output
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[("TSDEV_COMPILER", "true")])
    }

    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> TestResult {
        self.run_in(&self.build_dir(), args, env)
    }

    pub fn run_in(&self, cwd: &Path, args: &[&str], env: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tsdev"));
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("TSDEV_COMPILER")
            .env_remove("TSDEV_RUNTIME")
            .env_remove("TSDEV_RESTART_DELAY_MS");
        for (key, value) in env {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute tsdev");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}
