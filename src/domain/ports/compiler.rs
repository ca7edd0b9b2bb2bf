//! Compiler port
//!
//! The TypeScript compiler is an external collaborator; the pipeline only
//! needs to hand it a file list and learn whether it complained.

use std::path::{Path, PathBuf};

use crate::error::BuildResult;

/// One compiler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest<'a> {
    /// Project configuration the invocation inherits from
    pub project: &'a Path,
    /// Files to compile
    pub files: &'a [PathBuf],
    /// Root the output nesting is computed from
    pub root_dir: &'a Path,
    /// Output directory for compiled files and their source maps
    pub out_dir: &'a Path,
}

/// What the compiler reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOutcome {
    /// The compiler exited successfully
    pub success: bool,
    /// Diagnostic lines, in the order printed
    pub diagnostics: Vec<String>,
}

impl CompileOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            diagnostics: Vec::new(),
        }
    }

    pub fn failed(diagnostics: Vec<String>) -> Self {
        Self {
            success: false,
            diagnostics,
        }
    }
}

/// Compiles TypeScript sources into JavaScript plus source maps.
///
/// Diagnostics are part of the outcome, not an error. `Err` is reserved for
/// failing to run the compiler at all.
pub trait Compiler {
    fn compile(&self, request: &CompileRequest<'_>) -> BuildResult<CompileOutcome>;
}

impl<T: Compiler + ?Sized> Compiler for &T {
    fn compile(&self, request: &CompileRequest<'_>) -> BuildResult<CompileOutcome> {
        (**self).compile(request)
    }
}
