//! Failure injection: elements whose `Clone` or `Default` panics on demand.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::tracked::{LiveCounter, Tracked};

/// Number of clones still allowed across every [`FaultyClone`] sharing it.
#[derive(Clone, Debug)]
pub struct CloneBudget(Arc<AtomicUsize>);

impl CloneBudget {
    pub fn new(clones: usize) -> Self {
        Self(Arc::new(AtomicUsize::new(clones)))
    }

    /// Effectively unlimited.
    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }

    pub fn remaining(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Replace the remaining budget.
    pub fn set(&self, clones: usize) {
        self.0.store(clones, Ordering::SeqCst);
    }

    fn spend(&self) {
        let spent = self
            .0
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if spent.is_err() {
            panic!("clone budget exhausted");
        }
    }
}

/// A [`Tracked`] element whose `Clone` panics when its budget is spent.
///
/// The panic happens before the inner value is cloned, so a failed
/// clone never creates a live instance.
#[derive(Debug)]
pub struct FaultyClone {
    inner: Tracked,
    budget: CloneBudget,
}

impl FaultyClone {
    pub fn new(value: i32, counter: &LiveCounter, budget: &CloneBudget) -> Self {
        Self {
            inner: counter.track(value),
            budget: budget.clone(),
        }
    }

    pub fn value(&self) -> i32 {
        self.inner.value
    }
}

impl Clone for FaultyClone {
    fn clone(&self) -> Self {
        self.budget.spend();
        Self {
            inner: self.inner.clone(),
            budget: self.budget.clone(),
        }
    }
}

impl PartialEq for FaultyClone {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

thread_local! {
    static DEFAULT_BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
    static DEFAULT_LIVE: Cell<usize> = const { Cell::new(0) };
}

/// An element whose `Default` panics once the thread-local budget set by
/// [`FaultyDefault::arm`] is spent.
///
/// Tests run on their own threads, so budgets do not leak between tests.
/// The private second field means values can only be made through
/// `Default`, so every drop matches a counted construction.
#[derive(Debug, PartialEq, Eq)]
pub struct FaultyDefault(pub u32, ());

impl FaultyDefault {
    /// Allow `constructions` more default constructions, then panic.
    pub fn arm(constructions: usize) {
        DEFAULT_BUDGET.with(|budget| budget.set(Some(constructions)));
    }

    /// Remove the limit.
    pub fn disarm() {
        DEFAULT_BUDGET.with(|budget| budget.set(None));
    }

    /// Number of `FaultyDefault` values alive on this thread.
    pub fn live() -> usize {
        DEFAULT_LIVE.with(Cell::get)
    }
}

impl Default for FaultyDefault {
    fn default() -> Self {
        DEFAULT_BUDGET.with(|budget| match budget.get() {
            Some(0) => panic!("default budget exhausted"),
            Some(n) => budget.set(Some(n - 1)),
            None => {}
        });
        DEFAULT_LIVE.with(|live| live.set(live.get() + 1));
        Self(7, ())
    }
}

impl Drop for FaultyDefault {
    fn drop(&mut self) {
        DEFAULT_LIVE.with(|live| {
            let remaining = live
                .get()
                .checked_sub(1)
                .expect("FaultyDefault dropped more often than constructed");
            live.set(remaining);
        });
    }
}

/// Run `f`, which must panic, and return the panic message.
///
/// # Panics
///
/// Panics if `f` returns normally.
pub fn expect_panic<R>(f: impl FnOnce() -> R) -> String {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => panic!("expected a panic, but the closure returned"),
        Err(payload) => panic_message(payload),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(msg) => *msg,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(msg) => msg.to_string(),
            Err(_) => "<non-string panic payload>".to_string(),
        },
    }
}
