//! Async driver that owns a [`StepTransition`] on a tokio task.
//!
//! The controller itself only knows deadlines. [`TransitionHandle`] gives it
//! a real timer: a background task sleeps until the next deadline, fires it,
//! and publishes the resulting [`Visual`] on a watch channel.
//!
//! # Example
//!
//! ```rust,ignore
//! let handle = TransitionHandle::spawn(1, TransitionTiming::default());
//! let mut visuals = handle.subscribe();
//!
//! handle.update(2);
//! while visuals.changed().await.is_ok() {
//!     let visual = *visuals.borrow_and_update();
//!     render(visual);
//! }
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Notify, watch};
use tokio::time::Instant;

use super::controller::StepTransition;
use super::state::{StepKey, TransitionPhase, Visual};
use super::timing::TransitionTiming;

/// State shared between the handle and its timer task.
///
/// Every mutation of the controller happens under `controller`, and the
/// matching publish happens before the lock is released, so subscribers see
/// changes in the order they were made.
struct Shared {
    controller: Mutex<StepTransition>,
    publisher: watch::Sender<Visual>,
    wake: Notify,
}

impl Shared {
    fn publish(&self, controller: &StepTransition) {
        let next = controller.current_visual();
        self.publisher.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

/// Owner-side handle to a controller running on a tokio task.
///
/// `update` and `dispose` apply to the controller before they return; only
/// timer fires happen on the background task. Dropping the handle disposes
/// the controller and ends the task.
pub struct TransitionHandle {
    shared: Arc<Shared>,
    visual: watch::Receiver<Visual>,
}

impl TransitionHandle {
    /// Mounts a controller on `initial` and spawns its timer task.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn spawn(initial: StepKey, timing: TransitionTiming) -> Self {
        let controller = StepTransition::new_at(initial, timing, Instant::now().into_std());
        let (publisher, visual) = watch::channel(controller.current_visual());
        let shared = Arc::new(Shared {
            controller: Mutex::new(controller),
            publisher,
            wake: Notify::new(),
        });

        tokio::spawn(run_timer(Arc::clone(&shared)));

        Self { shared, visual }
    }

    /// Requests that `key` be displayed. No-op after [`dispose`](Self::dispose).
    pub fn update(&self, key: StepKey) {
        {
            let mut controller = self.shared.controller.lock();
            if controller.is_disposed() {
                tracing::trace!(key, "update ignored: handle disposed");
                return;
            }
            controller.update_at(key, Instant::now().into_std());
            self.shared.publish(&controller);
        }
        // Deadline moved; let the task re-arm its sleep.
        self.shared.wake.notify_one();
    }

    /// Latest published visual.
    pub fn current_visual(&self) -> Visual {
        *self.visual.borrow()
    }

    /// Receiver that yields every visual change.
    pub fn subscribe(&self) -> watch::Receiver<Visual> {
        self.shared.publisher.subscribe()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.shared.controller.lock().phase()
    }

    /// Returns `true` once the requested step is visible and nothing is pending.
    pub fn is_settled(&self) -> bool {
        self.shared.controller.lock().is_settled()
    }

    /// Cancels the pending timer and stops the task. Idempotent.
    pub fn dispose(&self) {
        {
            let mut controller = self.shared.controller.lock();
            if controller.is_disposed() {
                return;
            }
            controller.dispose();
        }
        self.shared.wake.notify_one();
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.controller.lock().is_disposed()
    }
}

impl Drop for TransitionHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for TransitionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionHandle")
            .field("visual", &self.current_visual())
            .field("phase", &self.phase())
            .finish()
    }
}

async fn run_timer(shared: Arc<Shared>) {
    loop {
        let deadline = {
            let controller = shared.controller.lock();
            if controller.is_disposed() {
                break;
            }
            controller.next_deadline()
        };

        match deadline {
            Some(due) => {
                tokio::select! {
                    _ = tokio::time::sleep_until(Instant::from_std(due)) => {
                        let mut controller = shared.controller.lock();
                        if controller.tick(Instant::now().into_std()) {
                            shared.publish(&controller);
                        }
                    }
                    _ = shared.wake.notified() => {}
                }
            }
            None => shared.wake.notified().await,
        }
    }
    tracing::trace!("transition timer task finished");
}
