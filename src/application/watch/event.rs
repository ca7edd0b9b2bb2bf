//! Change classification and debouncing

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use notify::event::{EventKind, ModifyKind, RenameMode};
use notify::Event;
use serde::Serialize;

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Events arriving this long after the watch starts are discarded
pub const STARTUP_COOLDOWN_MS: u64 = 500;

/// What happened to a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

/// Translate a raw `notify` event into per-path changes.
///
/// Renames become a removal of the old name and an addition of the new one.
/// Access and metadata-only events are dropped.
pub fn changes_from_event(event: &Event) -> Vec<(PathBuf, ChangeKind)> {
    let all = |kind: ChangeKind| {
        event
            .paths
            .iter()
            .map(|p| (p.clone(), kind))
            .collect::<Vec<_>>()
    };

    match event.kind {
        EventKind::Create(_) => all(ChangeKind::Added),
        EventKind::Remove(_) => all(ChangeKind::Removed),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => all(ChangeKind::Removed),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => all(ChangeKind::Added),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let mut changes = Vec::new();
            if let Some(from) = event.paths.first() {
                changes.push((from.clone(), ChangeKind::Removed));
            }
            if let Some(to) = event.paths.get(1) {
                changes.push((to.clone(), ChangeKind::Added));
            }
            changes
        }
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => all(ChangeKind::Modified),
        _ => Vec::new(),
    }
}

/// Correct a coalesced change against what is on disk once the debounce settles.
pub fn reconcile(kind: ChangeKind, exists: bool) -> ChangeKind {
    match (kind, exists) {
        (_, false) => ChangeKind::Removed,
        (ChangeKind::Removed, true) => ChangeKind::Modified,
        (kind, true) => kind,
    }
}

fn merge(previous: ChangeKind, next: ChangeKind) -> ChangeKind {
    match (previous, next) {
        (ChangeKind::Added, ChangeKind::Modified) => ChangeKind::Added,
        (ChangeKind::Removed, ChangeKind::Added) => ChangeKind::Modified,
        (_, next) => next,
    }
}

/// Watcher state for debouncing
#[derive(Debug, Default)]
pub struct WatcherState {
    pending_changes: BTreeMap<PathBuf, ChangeKind>,
    last_change: Option<Instant>,
}

impl WatcherState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a change, merging it with one already pending for the same path
    pub fn add_change(&mut self, path: PathBuf, kind: ChangeKind) {
        self.add_change_at(path, kind, Instant::now());
    }

    pub fn add_change_at(&mut self, path: PathBuf, kind: ChangeKind, now: Instant) {
        self.pending_changes
            .entry(path)
            .and_modify(|pending| *pending = merge(*pending, kind))
            .or_insert(kind);
        self.last_change = Some(now);
    }

    /// Check if debounce period has passed and we have pending changes
    pub fn should_sync(&self) -> bool {
        self.should_sync_at(Instant::now())
    }

    pub fn should_sync_at(&self, now: Instant) -> bool {
        match self.last_change {
            Some(last) => {
                !self.pending_changes.is_empty()
                    && now.saturating_duration_since(last) >= Duration::from_millis(DEBOUNCE_MS)
            }
            None => false,
        }
    }

    /// Take all pending changes in path order, resetting state
    pub fn take_changes(&mut self) -> Vec<(PathBuf, ChangeKind)> {
        self.last_change = None;
        std::mem::take(&mut self.pending_changes)
            .into_iter()
            .collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}
