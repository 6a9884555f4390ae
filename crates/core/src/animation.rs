//! The [`Animation`] trait and the [`FrameLoop`] that drives it.
//!
//! An animation owns its state and its drawing surface; the loop owns the
//! scheduling. Each frame runs to completion, then requests exactly one
//! successor frame unless the animation reports it has finished.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::schedule::{FrameToken, Scheduler};

/// What the loop should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame.
    Continue,
    /// Stop; the run reached its natural end.
    Finished,
}

/// A frame-stepped visualization.
///
/// This trait is **object-safe**, so registries can hold `Box<dyn Animation>`.
pub trait Animation {
    /// Prepares a fresh run. Called by [`FrameLoop::start`] before the first frame.
    fn begin(&mut self) {}

    /// Advances the state by one frame and redraws.
    fn frame(&mut self) -> FrameOutcome;

    /// Returns to the initial state and redraws it.
    fn reset(&mut self);

    /// Redraws the current state without advancing it.
    fn render(&mut self);

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing every parameter: type, default, range and description.
    fn param_schema(&self) -> Value;
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn begin(&mut self) {
        (**self).begin();
    }

    fn frame(&mut self) -> FrameOutcome {
        (**self).frame()
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn render(&mut self) {
        (**self).render();
    }

    fn params(&self) -> Value {
        (**self).params()
    }

    fn param_schema(&self) -> Value {
        (**self).param_schema()
    }
}

struct LoopState<A> {
    animation: A,
    pending: Option<FrameToken>,
    generation: u64,
}

/// Drives an [`Animation`] through a [`Scheduler`].
///
/// At most one frame is ever outstanding: `start` and `reset` cancel the
/// pending frame before doing anything else. Every run carries a generation
/// number, and a callback from an earlier generation returns without drawing
/// even if the host fires it after cancellation. Scheduled callbacks hold
/// only a weak reference, so dropping every clone of the loop stops it.
pub struct FrameLoop<A, S> {
    state: Rc<RefCell<LoopState<A>>>,
    scheduler: S,
}

impl<A, S: Clone> Clone for FrameLoop<A, S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<A, S> FrameLoop<A, S>
where
    A: Animation + 'static,
    S: Scheduler + Clone + 'static,
{
    pub fn new(animation: A, scheduler: S) -> Self {
        Self {
            state: Rc::new(RefCell::new(LoopState {
                animation,
                pending: None,
                generation: 0,
            })),
            scheduler,
        }
    }

    /// Starts a new run: cancels any pending frame, calls [`Animation::begin`],
    /// then runs the first frame immediately.
    pub fn start(&self) {
        let generation = {
            let mut st = self.state.borrow_mut();
            self.cancel_pending(&mut st);
            st.generation += 1;
            st.animation.begin();
            st.generation
        };
        debug!(generation, "frame loop started");
        Self::run_frame(&self.state, &self.scheduler, generation);
    }

    /// Cancels any pending frame and returns the animation to its initial state.
    pub fn reset(&self) {
        let mut st = self.state.borrow_mut();
        self.cancel_pending(&mut st);
        st.generation += 1;
        st.animation.reset();
        debug!(generation = st.generation, "frame loop reset");
    }

    /// Cancels any pending frame, leaving the animation where it is.
    pub fn stop(&self) {
        let mut st = self.state.borrow_mut();
        self.cancel_pending(&mut st);
        st.generation += 1;
    }

    /// Whether a frame is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    /// Runs `f` with shared access to the animation.
    pub fn with_animation<R>(&self, f: impl FnOnce(&A) -> R) -> R {
        f(&self.state.borrow().animation)
    }

    /// Runs `f` with exclusive access to the animation.
    ///
    /// Must not be called from inside a frame of the same loop.
    pub fn with_animation_mut<R>(&self, f: impl FnOnce(&mut A) -> R) -> R {
        f(&mut self.state.borrow_mut().animation)
    }

    fn cancel_pending(&self, st: &mut LoopState<A>) {
        if let Some(token) = st.pending.take() {
            self.scheduler.cancel(token);
        }
    }

    fn run_frame(state: &Rc<RefCell<LoopState<A>>>, scheduler: &S, generation: u64) {
        let outcome = {
            let mut st = state.borrow_mut();
            if st.generation != generation {
                return;
            }
            st.pending = None;
            st.animation.frame()
        };

        match outcome {
            FrameOutcome::Continue => {
                let weak = Rc::downgrade(state);
                let next_scheduler = scheduler.clone();
                let token = scheduler.schedule_next(Box::new(move || {
                    if let Some(state) = weak.upgrade() {
                        Self::run_frame(&state, &next_scheduler, generation);
                    }
                }));
                if token.is_none() {
                    warn!(generation, "next frame could not be scheduled");
                }
                state.borrow_mut().pending = token;
            }
            FrameOutcome::Finished => debug!(generation, "frame loop finished"),
        }
    }
}
