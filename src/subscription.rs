//! One-shot latches and cancellation-scoped subscription tasks.
//!
//! DESIGN
//! ======
//! "First matching event only" is modeled as an explicit `Latch` guarding the
//! handler body, not as implicit stream take-semantics. Subscription tasks
//! live in a `SubscriptionSet` keyed to their owner's lifetime: dropping the
//! set aborts every task, which is the only cancellation mechanism the shell
//! needs.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;

// =============================================================================
// LATCH
// =============================================================================

/// One-shot flag. `acquire` returns true exactly once.
#[derive(Debug)]
pub struct Latch(AtomicBool);

impl Latch {
    #[must_use]
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Claim the single shot. True for the first caller, false forever after.
    pub fn acquire(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }

    /// Whether the shot has been claimed.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for Latch {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SUBSCRIPTION SET
// =============================================================================

/// A merged set of spawned subscription tasks. Aborts all of them on drop.
pub struct SubscriptionSet {
    handles: Vec<JoinHandle<()>>,
}

impl SubscriptionSet {
    #[must_use]
    pub fn new() -> Self {
        Self { handles: Vec::new() }
    }

    /// Spawn a subscription task scoped to this set.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handles.push(tokio::spawn(task));
    }

    /// Fold another set into this one, extending its lifetime to ours.
    pub fn merge(&mut self, mut other: SubscriptionSet) {
        self.handles.append(&mut other.handles);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

impl Default for SubscriptionSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "subscription_test.rs"]
mod tests;
