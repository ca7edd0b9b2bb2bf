//! Watch Use Case implementation

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::application::compile::CompileUseCase;
use crate::application::context::BuildContext;
use crate::application::copy::CopyFilesUseCase;
use crate::application::events::TaskEvent;
use crate::domain::ports::{Compiler, FileSystem};
use crate::domain::value_objects::{FileRole, SourceSelection};
use crate::error::{BuildError, BuildResult};
use crate::infrastructure::watcher::DirectoryWatcher;

use super::cache::ContentCache;
use super::event::{changes_from_event, reconcile, ChangeKind, WatcherState, STARTUP_COOLDOWN_MS};

/// Watch Use Case
///
/// Rebuilds single sources as they change. Entry point of the `watch` task.
pub struct WatchUseCase<'a, C: Compiler, FS: FileSystem> {
    ctx: &'a BuildContext,
    compiler: C,
    fs: FS,
}

impl<'a, C: Compiler, FS: FileSystem> WatchUseCase<'a, C, FS> {
    pub fn new(ctx: &'a BuildContext, compiler: C, fs: FS) -> Self {
        Self { ctx, compiler, fs }
    }

    /// Start watching (blocking)
    ///
    /// Returns once `running` is cleared. Failures while handling a single
    /// change are reported as `error` events and the loop keeps going.
    pub fn start<F>(&self, running: &AtomicBool, on_event: F) -> BuildResult<()>
    where
        F: Fn(TaskEvent),
    {
        let src = self.ctx.src_dir();
        if !src.is_dir() {
            return Err(BuildError::DirectoryNotFound { path: src });
        }
        let selection = self.ctx.selection()?;

        let watcher = DirectoryWatcher::new(&src)?;
        // notify reports resolved paths; map them back onto the configured root
        let canonical_src = src.canonicalize().unwrap_or_else(|_| src.clone());

        on_event(TaskEvent::WatchStarted {
            source: src.display().to_string(),
        });

        // Pre-populate to avoid spurious rebuilds on startup
        let mut cache = ContentCache::new();
        cache.seed(&self.fs, &selection.collect(FileRole::Compile)?);
        cache.seed(&self.fs, &selection.collect(FileRole::Copy)?);
        log::debug!("tracking {} source file(s)", cache.len());

        watcher.drain_until(Instant::now() + Duration::from_millis(STARTUP_COOLDOWN_MS));

        let mut state = WatcherState::new();
        while running.load(Ordering::SeqCst) {
            if let Some(event) = watcher.next_event(Duration::from_millis(50)) {
                for (path, kind) in changes_from_event(&event) {
                    let path = rebase(&path, &canonical_src, &src);
                    if selection.role(&path) != FileRole::Ignored {
                        state.add_change(path, kind);
                    }
                }
            }

            if state.should_sync() {
                for (path, kind) in state.take_changes() {
                    let kind = reconcile(kind, self.fs.exists(&path));
                    if let Err(e) = self.apply(&selection, &path, kind, &mut cache, &on_event) {
                        log::error!("{e}");
                        on_event(TaskEvent::Error {
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        on_event(TaskEvent::Shutdown);
        Ok(())
    }

    /// Bring the output directory up to date with one settled change
    pub(super) fn apply(
        &self,
        selection: &SourceSelection,
        path: &Path,
        kind: ChangeKind,
        cache: &mut ContentCache,
        on_event: &impl Fn(TaskEvent),
    ) -> BuildResult<()> {
        let role = selection.role(path);
        if role == FileRole::Ignored {
            return Ok(());
        }

        if kind == ChangeKind::Removed {
            cache.forget(path);
            on_event(TaskEvent::SourceChanged {
                path: path.display().to_string(),
                change: kind,
            });
            for artifact in self.ctx.layout().artifacts(path, role) {
                on_event(TaskEvent::Removing {
                    path: artifact.display().to_string(),
                });
                self.fs.remove_all(&artifact)?;
            }
            return Ok(());
        }

        let hash = self.fs.hash(path)?;
        if cache.is_current(path, &hash) {
            log::debug!("{} unchanged", path.display());
            return Ok(());
        }

        on_event(TaskEvent::SourceChanged {
            path: path.display().to_string(),
            change: kind,
        });

        match role {
            FileRole::Compile => {
                CompileUseCase::new(self.ctx, &self.compiler, &self.fs)
                    .compile_file(path, on_event)?;
            }
            FileRole::Copy => {
                if let Some(to) = CopyFilesUseCase::new(self.ctx, &self.fs).copy_file(path)? {
                    log::info!("copied {}", to.display());
                }
            }
            FileRole::Ignored => {}
        }
        // only a finished rebuild makes the content current
        cache.record(path, hash);
        Ok(())
    }
}

fn rebase(path: &Path, from: &Path, to: &Path) -> PathBuf {
    match path.strip_prefix(from) {
        Ok(relative) => to.join(relative),
        Err(_) => path.to_path_buf(),
    }
}
