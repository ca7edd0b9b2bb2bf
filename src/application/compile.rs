//! Compile use case
//!
//! Runs the compile selection through the [`Compiler`] port, then points every
//! emitted source map back at its `.ts` file.

use std::path::{Path, PathBuf};

use crate::application::context::BuildContext;
use crate::application::events::TaskEvent;
use crate::domain::ports::{CompileRequest, Compiler, FileSystem};
use crate::domain::services::rewrite_sources;
use crate::domain::value_objects::FileRole;
use crate::error::{BuildError, BuildResult};

/// Result of one compiler invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Sources handed to the compiler
    pub files: usize,
    /// Output files present after the run (compiled files and maps)
    pub emitted: usize,
    pub diagnostics: Vec<String>,
    pub success: bool,
}

pub struct CompileUseCase<'a, C: Compiler, FS: FileSystem> {
    ctx: &'a BuildContext,
    compiler: C,
    fs: FS,
}

impl<'a, C: Compiler, FS: FileSystem> CompileUseCase<'a, C, FS> {
    pub fn new(ctx: &'a BuildContext, compiler: C, fs: FS) -> Self {
        Self { ctx, compiler, fs }
    }

    /// Compile every selected source under the source root
    pub fn compile_all(&self, on_event: &impl Fn(TaskEvent)) -> BuildResult<CompileReport> {
        let files = self.ctx.selection()?.collect(FileRole::Compile)?;
        self.compile_files(&files, on_event)
    }

    /// Recompile a single source, used by the watcher
    pub fn compile_file(
        &self,
        source: &Path,
        on_event: &impl Fn(TaskEvent),
    ) -> BuildResult<CompileReport> {
        self.compile_files(&[source.to_path_buf()], on_event)
    }

    fn compile_files(
        &self,
        files: &[PathBuf],
        on_event: &impl Fn(TaskEvent),
    ) -> BuildResult<CompileReport> {
        on_event(TaskEvent::CompileStarted { files: files.len() });

        let project = self.ctx.tsconfig();
        let root_dir = self.ctx.src_dir();
        let out_dir = self.ctx.dist_dir();
        let request = CompileRequest {
            project: &project,
            files,
            root_dir: &root_dir,
            out_dir: &out_dir,
        };
        let outcome = self.compiler.compile(&request)?;

        let layout = self.ctx.layout();
        let mut emitted = 0;
        for source in files {
            for artifact in layout.artifacts(source, FileRole::Compile) {
                if self.fs.exists(&artifact) {
                    emitted += 1;
                }
            }
            if let Some(map) = layout.source_map_output(source) {
                if self.fs.exists(&map) {
                    self.fix_source_map(&map, source, on_event)?;
                }
            }
        }

        let report = CompileReport {
            files: files.len(),
            emitted,
            diagnostics: outcome.diagnostics,
            success: outcome.success,
        };

        if !report.success {
            for line in &report.diagnostics {
                log::warn!("{line}");
            }
            on_event(TaskEvent::CompileFailed {
                diagnostics: report.diagnostics.clone(),
            });
            if self.ctx.config().compiler.fail_on_compile_error {
                return Err(BuildError::CompileFailed {
                    count: report.diagnostics.len(),
                });
            }
        }

        on_event(TaskEvent::CompileComplete {
            files: report.files,
            emitted: report.emitted,
        });
        Ok(report)
    }

    fn fix_source_map(
        &self,
        map: &Path,
        source: &Path,
        on_event: &impl Fn(TaskEvent),
    ) -> BuildResult<()> {
        let content = self.fs.read(map)?;
        match rewrite_sources(&content, map, source) {
            Ok(rewritten) => self.fs.write(map, &rewritten),
            Err(e) => {
                // leave the compiler's map in place
                on_event(TaskEvent::Warning {
                    message: e.to_string(),
                });
                Ok(())
            }
        }
    }
}
