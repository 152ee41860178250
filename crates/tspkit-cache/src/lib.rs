//! A generic, keyed, at-most-once-per-key computation cache.
//!
//! `ComputationCache<K, V, E>` guarantees that for any key, at most one
//! caller ever runs the supplied compute function; every other caller
//! (present or future) blocks on, and then shares, that single result —
//! including a failure, which is cached and re-raised identically to every
//! waiter. Distinct keys never block one another: the table lock is held
//! only to get-or-insert a per-key slot, never while the compute function
//! runs.
//!
//! This crate has no knowledge of TSP; it is the primary client
//! infrastructure for `tspkit-solver`'s combination catalogs, but is
//! otherwise a general-purpose memo.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Errors surfaced by [`ComputationCache::get`].
#[derive(Debug, Clone, Error)]
pub enum CacheError<E> {
    /// `get` was called with an absent key.
    #[error("cache key is absent")]
    NullKey,

    /// The blocking wait for another thread's computation was cancelled
    /// before the computation completed.
    #[error("interrupted while waiting for computation")]
    Interrupted,

    /// The compute function itself failed; this is the same error every
    /// caller of `get` for this key will observe, cached verbatim.
    #[error(transparent)]
    Compute(#[from] E),
}

/// The three states a per-key slot passes through, monotonically.
enum SlotState<V, E> {
    Pending,
    Running,
    Done(Result<V, E>),
}

struct Slot<V, E> {
    state: Mutex<SlotState<V, E>>,
    cond: Condvar,
}

impl<V, E> Slot<V, E> {
    fn new() -> Self {
        Self {
            state: Mutex::new(SlotState::Pending),
            cond: Condvar::new(),
        }
    }
}

/// A thread-safe keyed memo with at-most-one-computation-per-key semantics.
pub struct ComputationCache<K, V, E> {
    table: Mutex<HashMap<K, Arc<Slot<V, E>>>>,
}

impl<K, V, E> Default for ComputationCache<K, V, E>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> ComputationCache<K, V, E>
where
    K: Eq + Hash + Clone,
    V: Clone,
    E: Clone,
{
    pub fn new() -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
        }
    }

    /// `get` for a key that may be absent; an absent key is `NullKey`
    /// rather than being looked up, matching the "null keys are rejected"
    /// rule.
    pub fn get_optional(
        &self,
        key: Option<K>,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, CacheError<E>> {
        match key {
            Some(key) => self.get(key, compute),
            None => Err(CacheError::NullKey),
        }
    }

    /// Returns the cached value for `key`, computing it via `compute` if
    /// this is the first call for that key. Blocks if another thread is
    /// already computing it; never blocks on unrelated keys.
    pub fn get(&self, key: K, compute: impl FnOnce() -> Result<V, E>) -> Result<V, CacheError<E>> {
        self.get_with_deadline(key, compute, None)
    }

    /// Like [`ComputationCache::get`], but gives up waiting (without
    /// disturbing the slot for other waiters) after `timeout` and returns
    /// `CacheError::Interrupted`. Rust has no portable thread-interrupt
    /// primitive, so this is the concrete form of "the blocking wait was
    /// interrupted".
    pub fn get_timeout(
        &self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
        timeout: Duration,
    ) -> Result<V, CacheError<E>> {
        self.get_with_deadline(key, compute, Some(timeout))
    }

    fn get_with_deadline(
        &self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
        timeout: Option<Duration>,
    ) -> Result<V, CacheError<E>> {
        let slot = {
            let mut table = self.table.lock().expect("cache table poisoned");
            table.entry(key).or_insert_with(|| Arc::new(Slot::new())).clone()
        };

        // Outside the table lock: at most one caller transitions Pending
        // -> Running and actually invokes `compute`.
        let became_runner = {
            let mut state = slot.state.lock().expect("cache slot poisoned");
            if matches!(*state, SlotState::Pending) {
                *state = SlotState::Running;
                true
            } else {
                false
            }
        };

        if became_runner {
            tracing::debug!("computation cache: running compute function");
            let result = compute();
            let mut state = slot.state.lock().expect("cache slot poisoned");
            *state = SlotState::Done(result);
            slot.cond.notify_all();
        }

        let mut state = slot.state.lock().expect("cache slot poisoned");
        let deadline = timeout.map(|d| Instant::now() + d);
        loop {
            if let SlotState::Done(result) = &*state {
                return result.clone().map_err(CacheError::Compute);
            }
            state = match deadline {
                None => slot.cond.wait(state).expect("cache slot poisoned"),
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return Err(CacheError::Interrupted);
                    }
                    let (state, timed_out) = slot
                        .cond
                        .wait_timeout(state, remaining)
                        .expect("cache slot poisoned");
                    if timed_out.timed_out() {
                        if let SlotState::Done(result) = &*state {
                            return result.clone().map_err(CacheError::Compute);
                        }
                        return Err(CacheError::Interrupted);
                    }
                    state
                }
            };
        }
    }

    /// Number of keys currently present (pending, running, or done).
    pub fn len(&self) -> usize {
        self.table.lock().expect("cache table poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
