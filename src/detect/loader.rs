use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::error::{Error, Result};

enum LoadState<D> {
    Uninitialized,
    Loading,
    Ready(Arc<D>),
    Failed(String),
}

/// One-shot initialization handle for a detector backend.
///
/// States move `Uninitialized -> Loading -> Ready | Failed`. Only the first
/// caller of [`get_or_init`](Self::get_or_init) runs the initializer; callers
/// arriving while it runs block until it settles and then share its outcome.
pub struct DetectorLoader<D> {
    state: Mutex<LoadState<D>>,
    settled: Condvar,
}

impl<D> Default for DetectorLoader<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> DetectorLoader<D> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LoadState::Uninitialized),
            settled: Condvar::new(),
        }
    }

    /// Return the loaded detector, running `init` if nothing has been loaded yet.
    ///
    /// A failed load is sticky: later calls get [`Error::DetectorFailed`]
    /// until [`reset`](Self::reset) is called.
    pub fn get_or_init<F>(&self, init: F) -> Result<Arc<D>>
    where
        F: FnOnce() -> Result<D>,
    {
        let mut state = self.state.lock();
        loop {
            match &*state {
                LoadState::Ready(detector) => return Ok(Arc::clone(detector)),
                LoadState::Failed(reason) => return Err(Error::DetectorFailed(reason.clone())),
                LoadState::Uninitialized => break,
                LoadState::Loading => {}
            }
            self.settled.wait(&mut state);
        }
        *state = LoadState::Loading;
        drop(state);

        tracing::debug!("Initializing detector");
        let mut guard = LoadingGuard {
            loader: self,
            armed: true,
        };
        let result = init();
        guard.armed = false;

        let mut state = self.state.lock();
        let outcome = match result {
            Ok(detector) => {
                let detector = Arc::new(detector);
                *state = LoadState::Ready(Arc::clone(&detector));
                tracing::debug!("Detector ready");
                Ok(detector)
            }
            Err(err) => {
                tracing::warn!("Detector failed to initialize: {}", err);
                *state = LoadState::Failed(err.to_string());
                Err(err)
            }
        };
        self.settled.notify_all();
        outcome
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.lock(), LoadState::Ready(_))
    }

    /// Clear a failed load so the next call retries. Other states are left alone.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        if matches!(*state, LoadState::Failed(_)) {
            *state = LoadState::Uninitialized;
        }
    }
}

/// Marks the load as failed if the initializer unwinds, so waiters wake up.
struct LoadingGuard<'a, D> {
    loader: &'a DetectorLoader<D>,
    armed: bool,
}

impl<D> Drop for LoadingGuard<'_, D> {
    fn drop(&mut self) {
        if self.armed {
            *self.loader.state.lock() = LoadState::Failed("initializer panicked".to_string());
            self.loader.settled.notify_all();
        }
    }
}
