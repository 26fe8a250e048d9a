//! Phase barrier
//!
//! A reusable all-to-all rendezvous for a fixed number of tasks. Each call
//! to [`PhaseBarrier::wait`] blocks until every task has arrived, then
//! releases them together and starts the next generation.
//!
//! Unlike `std::sync::Barrier` it can be aborted: a task that fails to
//! launch, or one that unwinds, must not leave the others blocked forever.

use crate::error::{ContourError, ContourResult};
use std::sync::{Condvar, Mutex, MutexGuard};
use tracing::warn;

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    generation: u64,
    aborted: bool,
}

/// Reusable rendezvous sized to the task count.
#[derive(Debug)]
pub struct PhaseBarrier {
    parties: usize,
    state: Mutex<BarrierState>,
    cvar: Condvar,
}

impl PhaseBarrier {
    /// Create a barrier for `parties` tasks.
    ///
    /// # Panics
    ///
    /// Panics if `parties == 0`.
    pub fn new(parties: usize) -> Self {
        assert!(parties > 0, "barrier needs at least one party");
        Self {
            parties,
            state: Mutex::new(BarrierState::default()),
            cvar: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BarrierState> {
        // no state update spans a panic point, so poisoning is ignored
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Block until all parties have called `wait` for the current generation.
    ///
    /// Returns `Ok(true)` on exactly one task per generation (the last to
    /// arrive), `Ok(false)` on the others.
    ///
    /// # Errors
    ///
    /// Returns [`ContourError::BarrierAborted`] if the barrier was aborted
    /// before or while waiting.
    pub fn wait(&self) -> ContourResult<bool> {
        let mut state = self.lock();
        if state.aborted {
            return Err(ContourError::BarrierAborted);
        }
        state.arrived += 1;
        if state.arrived == self.parties {
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.cvar.notify_all();
            return Ok(true);
        }
        let generation = state.generation;
        while state.generation == generation && !state.aborted {
            state = self
                .cvar
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        if state.generation == generation {
            return Err(ContourError::BarrierAborted);
        }
        Ok(false)
    }

    /// Release every current and future waiter with an error.
    pub fn abort(&self) {
        let mut state = self.lock();
        if !state.aborted {
            warn!(parties = self.parties, arrived = state.arrived, "phase barrier aborted");
            state.aborted = true;
        }
        self.cvar.notify_all();
    }

    /// Whether [`abort`](Self::abort) has been called.
    pub fn is_aborted(&self) -> bool {
        self.lock().aborted
    }
}

/// Aborts the barrier if dropped while its thread is panicking.
pub(crate) struct AbortOnUnwind<'a>(pub(crate) &'a PhaseBarrier);

impl Drop for AbortOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.abort();
        }
    }
}
