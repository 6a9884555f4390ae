//! Frame scheduling abstraction.
//!
//! A [`Scheduler`] runs a callback on the host's next animation frame and
//! hands back a [`FrameToken`] that can cancel it. In the browser this is
//! `requestAnimationFrame`; in tests [`ManualScheduler`] queues callbacks
//! until the test fires a frame explicitly.

use std::cell::RefCell;
use std::rc::Rc;

/// Opaque handle identifying one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Callback run once on a future frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Schedules callbacks onto future animation frames.
///
/// Methods take `&self`: callbacks routinely schedule their successor while
/// the scheduler is being driven, so implementations use interior mutability.
pub trait Scheduler {
    /// Queues `callback` for the next frame and returns a token that cancels it.
    ///
    /// Returns `None` if the host refused the request; the callback is dropped.
    fn schedule_next(&self, callback: FrameCallback) -> Option<FrameToken>;

    /// Cancels a pending callback. Unknown or already-fired tokens are ignored.
    fn cancel(&self, token: FrameToken);
}

impl<T: Scheduler + ?Sized> Scheduler for Rc<T> {
    fn schedule_next(&self, callback: FrameCallback) -> Option<FrameToken> {
        (**self).schedule_next(callback)
    }

    fn cancel(&self, token: FrameToken) {
        (**self).cancel(token);
    }
}

#[derive(Default)]
struct ManualQueue {
    next_id: u64,
    pending: Vec<(FrameToken, FrameCallback)>,
}

/// Deterministic scheduler that only fires frames when asked.
///
/// Clones share one queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Fires one frame: runs every callback queued before this call.
    ///
    /// Callbacks scheduled while the frame runs wait for the following frame.
    /// Returns how many callbacks ran.
    pub fn run_frame(&self) -> usize {
        let batch = std::mem::take(&mut self.queue.borrow_mut().pending);
        let ran = batch.len();
        for (_, callback) in batch {
            callback();
        }
        ran
    }

    /// Fires up to `max_frames` frames, stopping early once nothing is pending.
    ///
    /// Returns the number of frames that ran at least one callback.
    pub fn run_frames(&self, max_frames: usize) -> usize {
        let mut fired = 0;
        while fired < max_frames && self.run_frame() > 0 {
            fired += 1;
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_next(&self, callback: FrameCallback) -> Option<FrameToken> {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let token = FrameToken(queue.next_id);
        queue.pending.push((token, callback));
        Some(token)
    }

    fn cancel(&self, token: FrameToken) {
        self.queue.borrow_mut().pending.retain(|(t, _)| *t != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn scheduled_callback_runs_on_next_frame_only() {
        let sched = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        sched.schedule_next(Box::new(move || h.set(h.get() + 1)));
        assert_eq!(hits.get(), 0);
        assert_eq!(sched.run_frame(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(sched.run_frame(), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn cancelled_callback_never_runs() {
        let sched = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let token = sched.schedule_next(Box::new(move || h.set(h.get() + 1))).unwrap();
        sched.cancel(token);
        assert_eq!(sched.pending(), 0);
        sched.run_frame();
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn cancelling_unknown_token_is_ignored() {
        let sched = ManualScheduler::new();
        sched.schedule_next(Box::new(|| {}));
        sched.cancel(FrameToken::new(999));
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn tokens_are_unique() {
        let sched = ManualScheduler::new();
        let a = sched.schedule_next(Box::new(|| {}));
        let b = sched.schedule_next(Box::new(|| {}));
        assert_ne!(a, b);
    }

    #[test]
    fn callback_scheduled_during_frame_waits_for_the_next_one() {
        let sched = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let (s, h) = (sched.clone(), hits.clone());
        sched.schedule_next(Box::new(move || {
            h.set(h.get() + 1);
            let h2 = h.clone();
            s.schedule_next(Box::new(move || h2.set(h2.get() + 1)));
        }));
        assert_eq!(sched.run_frame(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(sched.pending(), 1);
        assert_eq!(sched.run_frame(), 1);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn run_frames_stops_when_queue_drains() {
        let sched = ManualScheduler::new();
        sched.schedule_next(Box::new(|| {}));
        assert_eq!(sched.run_frames(10), 1);
    }

    #[test]
    fn rc_scheduler_delegates() {
        let sched = Rc::new(ManualScheduler::new());
        let token = sched.schedule_next(Box::new(|| {})).unwrap();
        assert_eq!(sched.pending(), 1);
        Scheduler::cancel(&sched, token);
        assert_eq!(sched.pending(), 0);
    }
}
