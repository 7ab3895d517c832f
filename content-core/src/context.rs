//! Collaborators the engine consumes: identifiers, time and the acting user.
//!
//! Nothing in the engine calls `Uuid::new_v4()` or reads the system clock
//! directly. Callers pass an [`EngineContext`]; tests use
//! [`SequentialContext`] for reproducible output.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

/// Identifier generator, clock and current actor.
pub trait EngineContext {
    /// A fresh identifier.
    fn new_id(&self) -> Uuid;

    /// Current time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;

    /// Identity stamped as `createdBy` on new versions.
    fn actor(&self) -> &str;
}

/// Context backed by random UUIDs and the system clock.
#[derive(Debug, Clone)]
pub struct SystemContext {
    actor: String,
}

impl SystemContext {
    /// Create a context acting as `actor`.
    #[must_use]
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
        }
    }
}

impl EngineContext for SystemContext {
    fn new_id(&self) -> Uuid {
        Uuid::new_v4()
    }

    #[allow(clippy::cast_possible_truncation)] // Timestamps won't exceed u64 for billions of years
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn actor(&self) -> &str {
        &self.actor
    }
}

/// High 64 bits of every identifier a [`SequentialContext`] issues.
///
/// Keeps counter-derived identifiers apart from hand-written fixture IDs such
/// as `00000000-0000-0000-0000-000000000001`.
pub const SEQUENTIAL_NAMESPACE: u64 = 0x636f_6e74_656e_7473;

/// Deterministic context: counter-derived identifiers and a manual clock.
///
/// Identifiers are `SEQUENTIAL_NAMESPACE` in the high word and a counter in
/// the low word. Call [`SequentialContext::reserve`] with the identifiers of
/// loaded content so the counter never reissues one of them.
#[derive(Debug)]
pub struct SequentialContext {
    actor: String,
    next_id: AtomicU64,
    now: AtomicU64,
}

impl SequentialContext {
    /// Create a context acting as `actor`, with the clock at zero.
    #[must_use]
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            next_id: AtomicU64::new(1),
            now: AtomicU64::new(0),
        }
    }

    /// Set the clock.
    pub fn set_now(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::Relaxed);
    }

    /// Move the clock forward.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::Relaxed);
    }

    /// Counter position: identifiers issued plus any skipped by [`SequentialContext::reserve`].
    #[must_use]
    pub fn ids_issued(&self) -> u64 {
        self.next_id.load(Ordering::Relaxed) - 1
    }

    /// Move the counter past any of `ids` that lie in this context's namespace.
    pub fn reserve(&self, ids: impl IntoIterator<Item = Uuid>) {
        for id in ids {
            let (high, low) = id.as_u64_pair();
            if high == SEQUENTIAL_NAMESPACE {
                self.next_id.fetch_max(low.saturating_add(1), Ordering::Relaxed);
            }
        }
    }
}

impl EngineContext for SequentialContext {
    fn new_id(&self) -> Uuid {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        Uuid::from_u64_pair(SEQUENTIAL_NAMESPACE, n)
    }

    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }

    fn actor(&self) -> &str {
        &self.actor
    }
}
