//! Source selection
//!
//! Decides which files under the source root are compiled and which are
//! copied verbatim. Uses `ignore` overrides, so patterns have gitignore
//! glob semantics and a later `!pattern` excludes what an earlier one matched.

use std::path::{Path, PathBuf};

use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;

use crate::error::{BuildError, BuildResult};

/// Files handed to the compiler
pub const COMPILE_GLOBS: &[&str] = &["**/*.ts", "!**/example-*.ts"];

/// Files copied to the output directory as-is
pub const COPY_GLOBS: &[&str] = &["**/*.js", "**/example-*.ts"];

/// What happens to a file under the source root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    /// Compiled by the TypeScript compiler
    Compile,
    /// Copied into the output directory unchanged
    Copy,
    /// Not part of the build
    Ignored,
}

/// Compiled include/exclude globs for one source root.
#[derive(Debug, Clone)]
pub struct SourceSelection {
    root: PathBuf,
    compile: Override,
    copy: Override,
}

impl SourceSelection {
    /// Build the default selection rooted at `root`
    pub fn new(root: &Path) -> BuildResult<Self> {
        Self::with_globs(root, COMPILE_GLOBS, COPY_GLOBS)
    }

    /// Build a selection from explicit glob lists
    pub fn with_globs(root: &Path, compile: &[&str], copy: &[&str]) -> BuildResult<Self> {
        Ok(Self {
            root: root.to_path_buf(),
            compile: build_override(root, compile)?,
            copy: build_override(root, copy)?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Classify a file. Accepts paths relative to the root or absolute paths under it.
    pub fn role(&self, path: &Path) -> FileRole {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        if self.compile.matched(relative, false).is_whitelist() {
            FileRole::Compile
        } else if self.copy.matched(relative, false).is_whitelist() {
            FileRole::Copy
        } else {
            FileRole::Ignored
        }
    }

    /// Every file under the root with the given role, sorted.
    pub fn collect(&self, role: FileRole) -> BuildResult<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(BuildError::DirectoryNotFound {
                path: self.root.clone(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkBuilder::new(&self.root).standard_filters(false).build() {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if self.role(entry.path()) == role {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }
}

fn build_override(root: &Path, globs: &[&str]) -> BuildResult<Override> {
    let mut builder = OverrideBuilder::new(root);
    for glob in globs {
        builder.add(glob)?;
    }
    Ok(builder.build()?)
}
