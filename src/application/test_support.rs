//! Fakes shared by the use case tests

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::context::BuildContext;
use crate::config::BuildConfig;
use crate::domain::ports::{CompileOutcome, CompileRequest, Compiler, FileSystem};
use crate::domain::services::OutputLayout;
use crate::error::{BuildError, BuildResult};

/// Compiler that writes a stub `.js` and `.js.map` per input through a file system
pub struct FakeCompiler<FS: FileSystem> {
    fs: FS,
    diagnostics: Vec<String>,
    launch_failures: AtomicUsize,
    calls: Mutex<Vec<Vec<PathBuf>>>,
}

impl<FS: FileSystem> FakeCompiler<FS> {
    pub fn new(fs: FS) -> Self {
        Self {
            fs,
            diagnostics: Vec::new(),
            launch_failures: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The first `times` invocations fail as if the program could not be started
    pub fn unavailable(fs: FS, times: usize) -> Self {
        Self {
            launch_failures: AtomicUsize::new(times),
            ..Self::new(fs)
        }
    }

    /// Emit output anyway but report these diagnostics and fail
    pub fn failing(fs: FS, diagnostics: &[&str]) -> Self {
        Self {
            diagnostics: diagnostics.iter().map(|d| d.to_string()).collect(),
            ..Self::new(fs)
        }
    }

    pub fn calls(&self) -> Vec<Vec<PathBuf>> {
        self.calls.lock().unwrap().clone()
    }
}

impl<FS: FileSystem> Compiler for FakeCompiler<FS> {
    fn compile(&self, request: &CompileRequest<'_>) -> BuildResult<CompileOutcome> {
        self.calls.lock().unwrap().push(request.files.to_vec());

        let failing = self
            .launch_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(BuildError::Spawn {
                program: "tsc".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }

        let layout = OutputLayout::new(request.root_dir, request.out_dir);
        for file in request.files {
            if let (Some(js), Some(map)) =
                (layout.compiled_output(file), layout.source_map_output(file))
            {
                self.fs.write(&js, "\"use strict\";")?;
                self.fs.write(
                    &map,
                    r#"{"version":3,"sourceRoot":"","sources":["../tmp/compiler-view.ts"],"mappings":"AAAA"}"#,
                )?;
            }
        }

        if self.diagnostics.is_empty() {
            Ok(CompileOutcome::ok())
        } else {
            Ok(CompileOutcome::failed(self.diagnostics.clone()))
        }
    }
}

/// Standalone context anchored at `<root>/build`, so sources live in `<root>/src`
pub fn context_in(root: &Path, config: BuildConfig) -> BuildContext {
    BuildContext::new(config, root.join("build"))
}
