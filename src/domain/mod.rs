//! Domain Layer
//!
//! Pure build logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - Path resolution and source selection
//! - `services/` - Output layout and source map rewriting
//! - `ports/` - Interfaces for the compiler, the file system and processes

pub mod ports;
pub mod services;
pub mod value_objects;
