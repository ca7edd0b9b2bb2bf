//! Watch Use Case
//!
//! Keeps the output directory in sync with the source tree while developing.
//! It orchestrates:
//! - File system monitoring (via `notify`)
//! - Debouncing (100ms) and per-path coalescing
//! - Content-hash filtering of no-op saves
//! - Single-file recompiles, copies and artifact removal
//!
//! ## Architecture
//!
//! - `WatchUseCase` - Main loop
//! - `ContentCache` - Last seen content hash per source
//! - `WatcherState` - Pending changes waiting out the debounce window

mod cache;
mod event;
mod use_case;


pub use cache::ContentCache;
pub use event::{
    changes_from_event, reconcile, ChangeKind, WatcherState, DEBOUNCE_MS, STARTUP_COOLDOWN_MS,
};
pub use use_case::WatchUseCase;
