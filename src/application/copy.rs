//! Copy-files use case
//!
//! Copies plain JavaScript and `example-*.ts` files into the output directory
//! untouched. Production builds also ship `package.json`.

use std::path::{Path, PathBuf};

use crate::application::context::BuildContext;
use crate::application::events::TaskEvent;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{FileRole, SourceSelection};
use crate::error::BuildResult;

/// One file to copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyEntry {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Everything `copy-files` writes, in order
pub fn copy_plan(ctx: &BuildContext, selection: &SourceSelection) -> BuildResult<Vec<CopyEntry>> {
    let layout = ctx.layout();
    let mut plan: Vec<CopyEntry> = selection
        .collect(FileRole::Copy)?
        .into_iter()
        .filter_map(|from| {
            let to = layout.copied_output(&from)?;
            Some(CopyEntry { from, to })
        })
        .collect();

    if ctx.resolver().is_production() {
        plan.push(CopyEntry {
            from: ctx.package_json(),
            to: ctx.dist_dir().join("package.json"),
        });
    }
    Ok(plan)
}

pub struct CopyFilesUseCase<'a, FS: FileSystem> {
    ctx: &'a BuildContext,
    fs: FS,
}

impl<'a, FS: FileSystem> CopyFilesUseCase<'a, FS> {
    pub fn new(ctx: &'a BuildContext, fs: FS) -> Self {
        Self { ctx, fs }
    }

    /// Copy the whole plan; returns the number of files written
    pub fn execute(&self, on_event: &impl Fn(TaskEvent)) -> BuildResult<usize> {
        let selection = self.ctx.selection()?;
        let plan = copy_plan(self.ctx, &selection)?;
        for entry in &plan {
            log::debug!("copy {} -> {}", entry.from.display(), entry.to.display());
            self.fs.copy(&entry.from, &entry.to)?;
        }
        on_event(TaskEvent::CopyComplete {
            copied: plan.len(),
        });
        Ok(plan.len())
    }

    /// Copy one source into its mirrored output location
    pub fn copy_file(&self, source: &Path) -> BuildResult<Option<PathBuf>> {
        let Some(to) = self.ctx.layout().copied_output(source) else {
            return Ok(None);
        };
        self.fs.copy(source, &to)?;
        Ok(Some(to))
    }
}
