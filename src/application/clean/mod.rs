//! Clean Use Case
//!
//! Removes the output directories of previous builds.
//! Missing directories are not an error.

mod result;
mod use_case;

pub use result::CleanResult;
pub use use_case::CleanUseCase;
