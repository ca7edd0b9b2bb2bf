//! Build context
//!
//! Configuration plus the derived path state, fixed for the lifetime of the process.
//! Resolved strings from [`PathResolver`] are anchored at the working directory.

use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::domain::ports::LaunchSpec;
use crate::domain::services::OutputLayout;
use crate::domain::value_objects::{lexical_normalize, PathResolver, SourceSelection};
use crate::error::{BuildError, BuildResult};

/// Immutable configuration shared by every task
#[derive(Debug, Clone)]
pub struct BuildContext {
    config: BuildConfig,
    resolver: PathResolver,
    base_dir: PathBuf,
}

impl BuildContext {
    /// `base_dir` is the directory resolved paths are relative to
    pub fn new(config: BuildConfig, base_dir: impl Into<PathBuf>) -> Self {
        let resolver = PathResolver::new(config.production(), config.from_plugin());
        Self {
            config,
            resolver,
            base_dir: base_dir.into(),
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Anchor a project-relative segment at the working directory
    pub fn resolve(&self, segment: &str) -> PathBuf {
        lexical_normalize(&self.base_dir.join(self.resolver.path(segment)))
    }

    /// Project root (where `src/` and `tsconfig.json` live)
    pub fn project_root(&self) -> PathBuf {
        self.resolve("")
    }

    pub fn src_dir(&self) -> PathBuf {
        self.resolve("src")
    }

    /// Output directory for compile and copy
    pub fn dist_dir(&self) -> PathBuf {
        lexical_normalize(&self.base_dir.join(self.resolver.dist_path()))
    }

    /// Directories removed by `clean`
    pub fn clean_targets(&self) -> Vec<PathBuf> {
        vec![self.resolve("dist"), self.resolve("maps")]
    }

    pub fn tsconfig(&self) -> PathBuf {
        self.resolve(&self.config.compiler.tsconfig)
    }

    pub fn package_json(&self) -> PathBuf {
        self.resolve("package.json")
    }

    /// Directory the supervisor watches for restarts
    pub fn server_watch_dir(&self) -> PathBuf {
        self.resolve("dist")
    }

    pub fn entry_point(&self) -> PathBuf {
        self.resolve(&self.config.server.entry)
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(self.src_dir(), self.dist_dir())
    }

    pub fn selection(&self) -> BuildResult<SourceSelection> {
        SourceSelection::new(&self.src_dir())
    }

    /// Command line of the supervised server: runtime, its arguments, then the entry point
    pub fn launch_spec(&self) -> BuildResult<LaunchSpec> {
        let (program, args) = self
            .config
            .server
            .command
            .split_first()
            .ok_or(BuildError::EmptyCommand { role: "server" })?;
        let mut args = args.to_vec();
        args.push(self.entry_point().to_string_lossy().into_owned());
        Ok(LaunchSpec {
            program: program.clone(),
            args,
            cwd: self.project_root(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(production: bool, from_plugin: bool) -> BuildContext {
        let config = BuildConfig::default().with_flags(production, from_plugin);
        BuildContext::new(config, "/work/project/build")
    }

    #[test]
    fn standalone_paths_hop_out_of_the_build_folder() {
        let ctx = context(false, false);
        assert_eq!(ctx.src_dir(), PathBuf::from("/work/project/src"));
        assert_eq!(ctx.dist_dir(), PathBuf::from("/work/project/dist"));
        assert_eq!(ctx.tsconfig(), PathBuf::from("/work/project/tsconfig.json"));
        assert_eq!(ctx.project_root(), PathBuf::from("/work/project"));
    }

    #[test]
    fn production_output_moves_up_one_level() {
        let ctx = context(true, false);
        assert_eq!(ctx.dist_dir(), PathBuf::from("/work/dist"));
        // clean and the supervisor keep using the project-level dist
        assert_eq!(
            ctx.clean_targets(),
            vec![
                PathBuf::from("/work/project/dist"),
                PathBuf::from("/work/project/maps")
            ]
        );
        assert_eq!(ctx.server_watch_dir(), PathBuf::from("/work/project/dist"));
    }

    #[test]
    fn plugin_mode_resolves_in_place() {
        let ctx = context(false, true);
        assert_eq!(ctx.src_dir(), PathBuf::from("/work/project/build/src"));
        assert_eq!(ctx.dist_dir(), PathBuf::from("/work/project/build/dist"));
    }

    #[test]
    fn launch_spec_appends_entry_point() {
        let ctx = context(false, false);
        let spec = ctx.launch_spec().unwrap();
        assert_eq!(spec.program, "node");
        assert_eq!(spec.args, vec!["/work/project/dist/index.js".to_string()]);
        assert_eq!(spec.cwd, PathBuf::from("/work/project"));
    }

    #[test]
    fn launch_spec_requires_a_program() {
        let mut config = BuildConfig::default();
        config.server.command.clear();
        let ctx = BuildContext::new(config, "/work");
        assert!(matches!(
            ctx.launch_spec(),
            Err(BuildError::EmptyCommand { role: "server" })
        ));
    }
}
