pub mod list;
pub mod task;
