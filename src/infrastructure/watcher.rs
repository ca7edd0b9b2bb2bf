//! Recursive directory watcher on top of `notify`
//!
//! Both the source watcher and the process supervisor poll one of these from
//! their own loop with a timeout, so a shutdown flag can be checked in between.

use std::path::Path;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::BuildResult;

/// A live recursive watch; dropping it stops the OS watch
pub struct DirectoryWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<Event>,
}

impl DirectoryWatcher {
    /// Start watching `dir` recursively
    pub fn new(dir: &Path) -> BuildResult<Self> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    let _ = tx.send(event);
                }
                Err(e) => log::warn!("watch error: {e}"),
            },
            Config::default(),
        )?;
        watcher.watch(dir, RecursiveMode::Recursive)?;
        log::debug!("watching {}", dir.display());

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Next event, or `None` when nothing arrived within `timeout`
    pub fn next_event(&self, timeout: Duration) -> Option<Event> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Discard everything that arrives before `until`.
    ///
    /// Some backends report existing files right after the watch is registered.
    pub fn drain_until(&self, until: Instant) {
        while Instant::now() < until {
            let _ = self.rx.recv_timeout(Duration::from_millis(50));
        }
    }
}
