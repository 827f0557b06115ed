//! Out-of-band failure routing
//!
//! Assertion machinery that runs outside the loop's own call stack (helper
//! threads, panic hooks, callbacks) posts failures here. The running example
//! drains them before it settles on a final state; with nothing running they
//! are dropped.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::models::FailureData;

#[derive(Debug, Default)]
struct RouterState {
    armed: bool,
    queued: Vec<FailureData>,
}

/// Cloneable handle for posting failures to the running example
#[derive(Clone, Debug, Default)]
pub struct FailureRouter {
    state: Arc<Mutex<RouterState>>,
}

impl FailureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a failure for the running example
    pub fn signal(&self, failure: FailureData) {
        let mut state = self.lock();
        if state.armed {
            state.queued.push(failure);
        } else {
            debug!("Dropping failure with no running example: {}", failure);
        }
    }

    /// Whether an example is currently running
    pub fn is_armed(&self) -> bool {
        self.lock().armed
    }

    /// Take the failures queued so far, leaving the router armed
    pub fn drain(&self) -> Vec<FailureData> {
        std::mem::take(&mut self.lock().queued)
    }

    pub(crate) fn arm(&self) {
        let mut state = self.lock();
        state.armed = true;
        state.queued.clear();
    }

    /// Stop accepting signals and hand back what was queued
    pub(crate) fn disarm(&self) -> Vec<FailureData> {
        let mut state = self.lock();
        state.armed = false;
        std::mem::take(&mut state.queued)
    }

    // A panic while holding the lock only poisons a queue of plain data
    fn lock(&self) -> MutexGuard<'_, RouterState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
