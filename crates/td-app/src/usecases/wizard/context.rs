use tokio::sync::{Mutex, MutexGuard};

use td_core::wizard::{WizardState, WizardStep};

/// Shared wizard context: the machine state and the dispatch lock.
///
/// ## Lock ordering
/// Acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock` serializes dispatches so a transition, its actions and
///   the state update run as one unit. Step loads wait for it, submissions
///   only try it.
/// - `state` is also read outside dispatches.
pub struct WizardContext {
    state: Mutex<WizardState>,
    dispatch_lock: Mutex<()>,
}

impl WizardContext {
    pub fn new(initial_state: WizardState) -> Self {
        Self {
            state: Mutex::new(initial_state),
            dispatch_lock: Mutex::new(()),
        }
    }

    pub fn starting_at(step: WizardStep) -> Self {
        Self::new(WizardState::idle(step))
    }

    pub async fn get_state(&self) -> WizardState {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// `None` while another dispatch holds the lock.
    pub fn try_acquire_dispatch_lock(&self) -> Option<MutexGuard<'_, ()>> {
        self.dispatch_lock.try_lock().ok()
    }

    /// Only call while holding the dispatch lock.
    pub async fn set_state(&self, state: WizardState) {
        *self.state.lock().await = state;
    }
}

impl Default for WizardContext {
    fn default() -> Self {
        Self::starting_at(WizardStep::FIRST)
    }
}
