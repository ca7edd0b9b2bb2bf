//! Domain Services
//!
//! Pure logic over paths and file contents. No I/O.

mod output_layout;
mod source_map;

pub use output_layout::{OutputLayout, COMPILED_EXTENSION, SOURCE_EXTENSION};
pub use source_map::rewrite_sources;
