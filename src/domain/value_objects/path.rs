//! Path resolution
//!
//! Every location the tasks touch (`src`, `dist`, `maps`, `tsconfig.json`, ...)
//! is derived from a fixed prefix list chosen once at startup:
//! - standalone invocation runs from a `build/` folder, so paths get a `..` prefix
//! - plugin invocation runs from the project root, so there is no prefix
//!
//! Production mode moves the output directory one more level up.
//!
//! Resolved paths are strings with forward slashes, relative to the working directory.

use std::path::{Component, Path, PathBuf};

/// Resolves project-relative segments into working-directory-relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    prefixes: Vec<String>,
    production: bool,
}

impl PathResolver {
    /// Create a resolver for the given build flags
    pub fn new(production: bool, from_plugin: bool) -> Self {
        let prefixes = if from_plugin {
            Vec::new()
        } else {
            vec!["..".to_string()]
        };
        Self {
            prefixes,
            production,
        }
    }

    /// Resolve a project-relative segment.
    ///
    /// `path("src")` is `../src` standalone and `src` in plugin mode.
    pub fn path(&self, segment: &str) -> String {
        let mut parts: Vec<&str> = self.prefixes.iter().map(String::as_str).collect();
        parts.push(segment);
        normalize_join(&parts)
    }

    /// Output directory for compiled files and copied assets
    pub fn dist_path(&self) -> String {
        if self.production {
            self.path("../dist")
        } else {
            self.path("dist")
        }
    }

    /// Source tree root
    pub fn src_path(&self) -> String {
        self.path("src")
    }

    /// Standalone source-map directory
    pub fn maps_path(&self) -> String {
        self.path("maps")
    }

    pub fn is_production(&self) -> bool {
        self.production
    }
}

/// Join segments and normalize them the way `path.join` does in Node:
/// backslashes count as separators, `.` and empty components vanish, `..`
/// pops the previous component when it can. An empty result renders as `.`.
pub fn normalize_join<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("/")
        .replace('\\', "/");
    let absolute = joined.starts_with('/');

    let mut out: Vec<&str> = Vec::new();
    for component in joined.split('/') {
        match component {
            "" | "." => {}
            ".." => match out.last() {
                Some(&last) if last != ".." => {
                    out.pop();
                }
                // `/..` is `/`
                _ if absolute => {}
                _ => out.push(".."),
            },
            name => out.push(name),
        }
    }

    let body = out.join("/");
    if absolute {
        format!("/{body}")
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

/// Remove `.` and `..` components without touching the filesystem.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Path of `to` as seen from the directory `from_dir`.
///
/// Both paths must be lexically normalized and share the same anchor
/// (both absolute or both relative to the same directory).
pub fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from_dir.components().collect();
    let target: Vec<Component> = to.components().collect();

    let common = from
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for component in &target[common..] {
        rel.push(component.as_os_str());
    }
    rel
}

/// Render a path with forward slashes regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
        .replace("//", "/")
}
