//! Concurrency gate.
//!
//! A counting admission primitive: at most `capacity` permits are out at
//! any instant. Waiters are admitted first-come-first-served (tokio's
//! semaphore is fair). Current and peak holder counts are tracked so the
//! ceiling can be observed from the outside.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

#[derive(Debug, Default)]
struct Holders {
    current: AtomicUsize,
    peak: AtomicUsize,
}

/// Bounds how many probes run at once. Capacity is fixed at construction.
#[derive(Debug, Clone)]
pub struct Gate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    holders: Arc<Holders>,
}

impl Gate {
    /// Creates a gate admitting at most `capacity` holders.
    ///
    /// `capacity` comes from a validated `EngineConfig` and is at least 1.
    /// Anything above the semaphore's permit ceiling is clamped to it.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 1, "gate capacity must be at least 1");
        let capacity = capacity.min(Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            holders: Arc::default(),
        }
    }

    /// Waits for a free slot and takes it. The slot is returned when the
    /// permit is dropped.
    ///
    /// # Panics
    ///
    /// Panics if the semaphore was closed, which never happens: the gate
    /// does not expose `close`.
    pub async fn acquire(&self) -> GatePermit {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .expect("gate semaphore is never closed");

        let current = self.holders.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.holders.peak.fetch_max(current, Ordering::SeqCst);

        GatePermit {
            holders: Arc::clone(&self.holders),
            _permit: permit,
        }
    }

    /// Maximum number of simultaneous holders.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of permits currently held.
    pub fn in_flight(&self) -> usize {
        self.holders.current.load(Ordering::SeqCst)
    }

    /// Highest number of permits ever held at once.
    pub fn peak(&self) -> usize {
        self.holders.peak.load(Ordering::SeqCst)
    }
}

/// One admission slot. Dropping it releases the slot.
#[derive(Debug)]
pub struct GatePermit {
    holders: Arc<Holders>,
    // Declared last: released after the holder count is decremented.
    _permit: OwnedSemaphorePermit,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.holders.current.fetch_sub(1, Ordering::SeqCst);
    }
}
