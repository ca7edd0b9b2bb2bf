//! TypeScript compiler adapter
//!
//! Runs `tsc` against a derived project file that extends the project's own
//! `tsconfig.json` and pins the inputs and output locations for one invocation:
//!
//! ```json
//! {
//!   "extends": "/work/tsconfig.json",
//!   "compilerOptions": { "outDir": "/work/dist", "rootDir": "/work/src", "sourceMap": true },
//!   "files": ["/work/src/index.ts"],
//!   "include": []
//! }
//! ```
//!
//! The derived file lives next to the project tsconfig for the duration of
//! the call and is removed when the compiler returns.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use serde_json::{json, Value};

use crate::config::CompilerConfig;
use crate::domain::ports::{CompileOutcome, CompileRequest, Compiler};
use crate::domain::value_objects::to_slash;
use crate::error::{BuildError, BuildResult};

/// Compiler backed by an external `tsc` command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TscCompiler {
    command: Vec<String>,
}

impl TscCompiler {
    pub fn new(command: Vec<String>) -> BuildResult<Self> {
        if command.is_empty() {
            return Err(BuildError::EmptyCommand { role: "compiler" });
        }
        Ok(Self { command })
    }

    pub fn from_config(config: &CompilerConfig) -> BuildResult<Self> {
        Self::new(config.command.clone())
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }
}

/// Project file content for one invocation
pub fn derived_project(request: &CompileRequest<'_>) -> Value {
    let files: Vec<String> = request.files.iter().map(|f| to_slash(f)).collect();
    json!({
        "extends": to_slash(request.project),
        "compilerOptions": {
            "outDir": to_slash(request.out_dir),
            "rootDir": to_slash(request.root_dir),
            "sourceMap": true,
            "inlineSourceMap": false,
            "noEmitOnError": false,
        },
        "files": files,
        "include": [],
    })
}

fn split_diagnostics(stdout: &[u8], stderr: &[u8]) -> Vec<String> {
    [stdout, stderr]
        .iter()
        .flat_map(|bytes| {
            String::from_utf8_lossy(bytes)
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

impl Compiler for TscCompiler {
    fn compile(&self, request: &CompileRequest<'_>) -> BuildResult<CompileOutcome> {
        if request.files.is_empty() {
            return Ok(CompileOutcome::ok());
        }

        let project_dir = request
            .project
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let to_write_error = |source: std::io::Error| BuildError::Write {
            path: project_dir.to_path_buf(),
            source,
        };
        let mut derived = tempfile::Builder::new()
            .prefix(".tsdev-")
            .suffix(".json")
            .tempfile_in(project_dir)
            .map_err(to_write_error)?;
        serde_json::to_writer_pretty(&mut derived, &derived_project(request))
            .map_err(|e| to_write_error(std::io::Error::other(e)))?;
        derived.flush().map_err(to_write_error)?;

        // `new` guarantees at least one element
        let (program, args) = self
            .command
            .split_first()
            .ok_or(BuildError::EmptyCommand { role: "compiler" })?;

        log::debug!(
            "running {} --project {} ({} file(s))",
            self.command.join(" "),
            derived.path().display(),
            request.files.len()
        );

        let output = Command::new(program)
            .args(args)
            .arg("--project")
            .arg(derived.path())
            .current_dir(project_dir)
            .output()
            .map_err(|source| BuildError::Spawn {
                program: program.clone(),
                source,
            })?;

        let diagnostics = split_diagnostics(&output.stdout, &output.stderr);
        for line in &diagnostics {
            log::debug!("tsc: {line}");
        }

        Ok(CompileOutcome {
            success: output.status.success(),
            diagnostics,
        })
    }
}
