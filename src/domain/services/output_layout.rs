//! Output layout
//!
//! Maps a file under the source root to the files it produces under the
//! output root. The relative directory nesting is preserved; compiled sources
//! swap their extension and gain a `.map` sibling.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::FileRole;

/// Extension of the sources the compiler is given
pub const SOURCE_EXTENSION: &str = "ts";

/// Extension the compiler emits for them
pub const COMPILED_EXTENSION: &str = "js";

/// Source and output roots of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    src_root: PathBuf,
    dist_root: PathBuf,
}

impl OutputLayout {
    pub fn new(src_root: impl Into<PathBuf>, dist_root: impl Into<PathBuf>) -> Self {
        Self {
            src_root: src_root.into(),
            dist_root: dist_root.into(),
        }
    }

    pub fn src_root(&self) -> &Path {
        &self.src_root
    }

    pub fn dist_root(&self) -> &Path {
        &self.dist_root
    }

    /// Source path relative to the source root, `None` when it lies outside.
    pub fn relative<'a>(&self, source: &'a Path) -> Option<&'a Path> {
        source.strip_prefix(&self.src_root).ok()
    }

    /// Directory under the output root that mirrors the source file's directory.
    pub fn output_dir_for(&self, source: &Path) -> Option<PathBuf> {
        let relative = self.relative(source)?;
        Some(match relative.parent() {
            Some(parent) => self.dist_root.join(parent),
            None => self.dist_root.clone(),
        })
    }

    /// Compiled file for a TypeScript source (`a/b.ts` → `dist/a/b.js`).
    pub fn compiled_output(&self, source: &Path) -> Option<PathBuf> {
        let relative = self.relative(source)?;
        if relative.extension()? != SOURCE_EXTENSION {
            return None;
        }
        Some(self.dist_root.join(relative).with_extension(COMPILED_EXTENSION))
    }

    /// Source map emitted next to the compiled file (`dist/a/b.js.map`).
    pub fn source_map_output(&self, source: &Path) -> Option<PathBuf> {
        let compiled = self.compiled_output(source)?;
        let mut name = compiled.into_os_string();
        name.push(".map");
        Some(PathBuf::from(name))
    }

    /// Destination of a verbatim copy (`a/lib.js` → `dist/a/lib.js`).
    pub fn copied_output(&self, source: &Path) -> Option<PathBuf> {
        Some(self.dist_root.join(self.relative(source)?))
    }

    /// Every output file a source produces, given its role.
    pub fn artifacts(&self, source: &Path, role: FileRole) -> Vec<PathBuf> {
        match role {
            FileRole::Compile => self
                .compiled_output(source)
                .into_iter()
                .chain(self.source_map_output(source))
                .collect(),
            FileRole::Copy => self.copied_output(source).into_iter().collect(),
            FileRole::Ignored => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> OutputLayout {
        OutputLayout::new("/p/src", "/p/dist")
    }

    #[test]
    fn compiled_output_swaps_extension() {
        let layout = layout();
        assert_eq!(
            layout.compiled_output(Path::new("/p/src/index.ts")),
            Some(PathBuf::from("/p/dist/index.js"))
        );
        assert_eq!(
            layout.compiled_output(Path::new("/p/src/api/v1/users.ts")),
            Some(PathBuf::from("/p/dist/api/v1/users.js"))
        );
    }

    #[test]
    fn only_ts_sources_have_compiled_outputs() {
        let layout = layout();
        assert_eq!(layout.compiled_output(Path::new("/p/src/lib.js")), None);
        assert_eq!(layout.compiled_output(Path::new("/p/src/types.d")), None);
        assert_eq!(layout.compiled_output(Path::new("/p/src/Makefile")), None);
        // the stem is not mistaken for an extension
        assert_eq!(layout.compiled_output(Path::new("/p/src/ts")), None);
    }

    #[test]
    fn dotted_names_keep_their_stem() {
        let layout = layout();
        assert_eq!(
            layout.compiled_output(Path::new("/p/src/user.service.ts")),
            Some(PathBuf::from("/p/dist/user.service.js"))
        );
    }

    #[test]
    fn removing_a_source_targets_exactly_two_artifacts() {
        let layout = layout();
        let artifacts = layout.artifacts(Path::new("/p/src/routes/home.ts"), FileRole::Compile);
        assert_eq!(
            artifacts,
            vec![
                PathBuf::from("/p/dist/routes/home.js"),
                PathBuf::from("/p/dist/routes/home.js.map"),
            ]
        );
    }

    #[test]
    fn copied_files_have_one_artifact() {
        let layout = layout();
        assert_eq!(
            layout.artifacts(Path::new("/p/src/example-a.ts"), FileRole::Copy),
            vec![PathBuf::from("/p/dist/example-a.ts")]
        );
        assert!(layout
            .artifacts(Path::new("/p/src/readme.md"), FileRole::Ignored)
            .is_empty());
    }

    #[test]
    fn sources_outside_the_root_have_no_output() {
        let layout = layout();
        assert_eq!(layout.compiled_output(Path::new("/elsewhere/a.ts")), None);
        assert_eq!(layout.output_dir_for(Path::new("/elsewhere/a.ts")), None);
    }

    #[test]
    fn output_dir_mirrors_nesting() {
        let layout = layout();
        assert_eq!(
            layout.output_dir_for(Path::new("/p/src/a/b/c.ts")),
            Some(PathBuf::from("/p/dist/a/b"))
        );
        assert_eq!(
            layout.output_dir_for(Path::new("/p/src/top.ts")),
            Some(PathBuf::from("/p/dist"))
        );
    }
}
