//! Request generations — discard results from superseded requests.
//!
//! When a caller issues a new request while an earlier one is still in flight,
//! whichever response lands last would otherwise win. Tagging each request with
//! a generation lets the caller drop anything that is no longer the latest.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Ticket identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing generations. Each `begin` supersedes all
/// earlier tickets.
#[derive(Debug, Default)]
pub struct RequestGenerations {
    latest: AtomicU64,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }

    /// Pass `value` through only if `generation` is still the latest.
    pub fn accept<T>(&self, generation: Generation, value: T) -> Option<T> {
        if self.is_current(generation) {
            Some(value)
        } else {
            tracing::debug!(
                stale = generation.0,
                latest = self.latest.load(Ordering::SeqCst),
                "discarding superseded result"
            );
            None
        }
    }
}

/// Holds the newest value seen so far, keyed by generation.
///
/// Stores from generations older than the one already held are rejected, so
/// out-of-order completions can never overwrite a fresher result.
#[derive(Debug)]
pub struct LatestSlot<T> {
    inner: Mutex<Option<(Generation, T)>>,
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }
}

impl<T: Clone> LatestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` if `generation` is at least as new as the held one.
    /// Returns whether the value was stored.
    pub fn offer(&self, generation: Generation, value: T) -> bool {
        let mut slot = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match slot.as_ref() {
            Some((held, _)) if *held > generation => false,
            _ => {
                *slot = Some((generation, value));
                true
            }
        }
    }

    pub fn get(&self) -> Option<(Generation, T)> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
