//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod path;
mod selection;

pub use path::{lexical_normalize, normalize_join, relative_path, to_slash, PathResolver};
pub use selection::{FileRole, SourceSelection, COMPILE_GLOBS, COPY_GLOBS};
