use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use seedkit_database::StoreError;
use tracing::{debug, warn};

use crate::error::{SeedError, StoreFailure};

pub type OnDone = Box<dyn FnOnce(Result<(), SeedError>) + Send + 'static>;

/// Joins the requests dispatched by one clear or populate call.
///
/// Every occurrence of a key in `expected` is one report that key waits for.
/// Once all reports are in, the callback runs exactly once: with `Ok(())` when
/// every report succeeded, otherwise with `SeedError::StoreFailures` carrying
/// each failed report. A barrier with no expected keys fires as soon as it is
/// built.
///
/// Each call owns its barrier; it is never shared between calls.
pub struct CompletionBarrier {
    state: Mutex<BarrierState>,
}

struct BarrierState {
    pending: HashMap<String, usize>,
    failures: Vec<StoreFailure>,
    on_done: Option<OnDone>,
}

impl BarrierState {
    fn take_if_complete(&mut self) -> Option<(OnDone, Result<(), SeedError>)> {
        if self.pending.values().any(|remaining| *remaining > 0) {
            return None;
        }
        let on_done = self.on_done.take()?;
        let result = if self.failures.is_empty() {
            Ok(())
        } else {
            Err(SeedError::StoreFailures(std::mem::take(&mut self.failures)))
        };
        Some((on_done, result))
    }
}

impl CompletionBarrier {
    pub fn new<I, S, F>(expected: I, on_done: F) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(Result<(), SeedError>) + Send + 'static,
    {
        let mut pending: HashMap<String, usize> = HashMap::new();
        for key in expected {
            *pending.entry(key.into()).or_default() += 1;
        }

        let barrier = Arc::new(Self {
            state: Mutex::new(BarrierState {
                pending,
                failures: Vec::new(),
                on_done: Some(Box::new(on_done)),
            }),
        });

        let ready = barrier.lock().take_if_complete();
        if let Some((on_done, result)) = ready {
            debug!("barrier has no expected keys, completing immediately");
            on_done(result);
        }
        barrier
    }

    /// Records one report for `key`. Reports for unknown keys, for keys with
    /// nothing left to report, or after the barrier fired are ignored.
    pub fn signal(&self, key: &str, outcome: Result<(), StoreError>) {
        let ready = {
            let mut state = self.lock();
            if state.on_done.is_none() {
                debug!(key, "signal after barrier fired, ignoring");
                return;
            }
            match state.pending.get_mut(key) {
                Some(remaining) if *remaining > 0 => *remaining -= 1,
                _ => {
                    warn!(key, "unexpected completion signal, ignoring");
                    return;
                }
            }
            if let Err(error) = outcome {
                state.failures.push(StoreFailure { collection: key.to_string(), error });
            }
            debug!(key, remaining = state.pending.get(key).copied().unwrap_or_default(), "barrier signal");
            state.take_if_complete()
        };

        // outside the lock, the callback may do anything
        if let Some((on_done, result)) = ready {
            on_done(result);
        }
    }

    /// Hands out a ticket that reports for `key` exactly once.
    pub fn ticket(self: &Arc<Self>, key: impl Into<String>) -> Ticket {
        Ticket { barrier: Arc::clone(self), key: key.into(), reported: false }
    }

    pub fn is_fired(&self) -> bool {
        self.lock().on_done.is_none()
    }

    /// Keys still waiting for at least one report, sorted.
    pub fn pending_keys(&self) -> Vec<String> {
        let state = self.lock();
        let mut keys: Vec<String> = state
            .pending
            .iter()
            .filter(|(_, remaining)| **remaining > 0)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    fn lock(&self) -> MutexGuard<'_, BarrierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One outstanding report owed to a [`CompletionBarrier`].
///
/// Dropping a ticket without calling [`Ticket::complete`] (a panicking or
/// cancelled task) reports a failure, so the barrier can still fire.
pub struct Ticket {
    barrier: Arc<CompletionBarrier>,
    key: String,
    reported: bool,
}

impl Ticket {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn complete(mut self, outcome: Result<(), StoreError>) {
        self.reported = true;
        self.barrier.signal(&self.key, outcome);
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        if !self.reported {
            self.barrier.signal(
                &self.key,
                Err(StoreError::Backend("request ended without reporting".to_string())),
            );
        }
    }
}
