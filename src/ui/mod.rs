//! Terminal presentation for task events

pub mod context;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
