//! Elements that report their own lifetimes.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counters for a family of [`Tracked`] values.
#[derive(Clone, Default)]
pub struct LiveCounter {
    live: Arc<AtomicUsize>,
    drops: Arc<AtomicUsize>,
}

impl LiveCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracked element holding `value`.
    pub fn track(&self, value: i32) -> Tracked {
        self.live.fetch_add(1, Ordering::SeqCst);
        Tracked {
            value,
            counter: self.clone(),
        }
    }

    /// Number of tracked values currently alive.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Total number of drops observed so far.
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

/// An `i32` that registers construction, clones and drops with a
/// [`LiveCounter`].
pub struct Tracked {
    pub value: i32,
    counter: LiveCounter,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counter.track(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        let previous = self.counter.live.fetch_sub(1, Ordering::SeqCst);
        assert!(previous > 0, "tracked value {} dropped twice", self.value);
        self.counter.drops.fetch_add(1, Ordering::SeqCst);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<i32> for Tracked {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

/// A value with no `Clone` implementation.
#[derive(Debug, PartialEq, Eq)]
pub struct MoveOnly(pub String);

impl MoveOnly {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}
