//! Clean use case implementation

use std::path::PathBuf;

use crate::application::events::TaskEvent;
use crate::domain::ports::FileSystem;
use crate::error::BuildResult;

use super::result::CleanResult;

/// Clean use case - deletes output directories recursively
pub struct CleanUseCase<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> CleanUseCase<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    /// Delete every target. Stops at the first target that cannot be removed.
    pub fn execute(
        &self,
        targets: &[PathBuf],
        on_event: &impl Fn(TaskEvent),
    ) -> BuildResult<CleanResult> {
        let mut result = CleanResult::new();

        for target in targets {
            on_event(TaskEvent::Removing {
                path: target.display().to_string(),
            });
            if self.fs.remove_all(target)? {
                log::debug!("removed {}", target.display());
                result.add_removed(target.clone());
            } else {
                log::debug!("{} does not exist", target.display());
                result.add_missing(target.clone());
            }
        }

        Ok(result)
    }
}
