use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use scroll_pager::TimingFunction;

use crate::{FrameScheduler, SubscriptionId};

/// A one-shot completion callback. Receives `true` on natural completion, `false` on
/// cancellation.
pub type Completion = Box<dyn FnOnce(bool)>;

struct AnimatorState {
    running: bool,
    first_frame_ms: Option<u64>,
    subscription: Option<SubscriptionId>,
    on_complete: Option<Completion>,
}

struct Shared {
    scheduler: FrameScheduler,
    duration_ms: u64,
    timing: TimingFunction,
    state: RefCell<AnimatorState>,
    // Returns `false` once the animated target is gone.
    on_frame: RefCell<Box<dyn FnMut(f64) -> bool>>,
}

impl Shared {
    fn on_tick(&self, now_ms: u64) {
        let raw = {
            let mut state = self.state.borrow_mut();
            if !state.running {
                return;
            }
            let first = *state.first_frame_ms.get_or_insert(now_ms);
            progress(now_ms.saturating_sub(first), self.duration_ms)
        };

        let eased = self.timing.sample(raw.min(1.0));
        let alive = match self.on_frame.try_borrow_mut() {
            Ok(mut on_frame) => (&mut *on_frame)(eased),
            Err(_) => true,
        };

        if !alive {
            adebug!("FrameAnimator: target released, cancelling");
            self.finish(false);
        } else if raw >= 1.0 {
            self.finish(true);
        }
    }

    fn finish(&self, success: bool) {
        let (subscription, on_complete) = {
            let mut state = self.state.borrow_mut();
            if !state.running {
                return;
            }
            state.running = false;
            (state.subscription.take(), state.on_complete.take())
        };
        if let Some(id) = subscription {
            self.scheduler.unsubscribe(id);
        }
        atrace!(success, "FrameAnimator: finished");
        if let Some(on_complete) = on_complete {
            on_complete(success);
        }
    }
}

/// A cancellable, frame-synchronized value animator.
///
/// On every frame delivered by the [`FrameScheduler`] it reports
/// `timing(elapsed / duration)` to `on_frame`, measuring elapsed time from its first frame.
/// Progress is clamped to `[0, 1]`; a zero duration completes on the first frame.
///
/// `on_complete` is invoked exactly once: with `true` after the frame that reaches full progress,
/// or with `false` on [`FrameAnimator::cancel`], on drop while running, or when the animated
/// target is released. After that the scheduler subscription is gone and no more frames are
/// reported.
pub struct FrameAnimator {
    shared: Rc<Shared>,
}

impl FrameAnimator {
    pub fn run(
        scheduler: &FrameScheduler,
        duration_ms: u64,
        timing: TimingFunction,
        mut on_frame: impl FnMut(f64) + 'static,
        on_complete: impl FnOnce(bool) + 'static,
    ) -> Self {
        Self::start(
            scheduler,
            duration_ms,
            timing,
            Box::new(move |progress| {
                on_frame(progress);
                true
            }),
            Box::new(on_complete),
        )
    }

    /// Like [`FrameAnimator::run`], but animates a weakly held target.
    ///
    /// The animator never keeps `target` alive. If it has been dropped when a frame arrives, the
    /// animation is cancelled.
    pub fn run_with_target<T: ?Sized + 'static>(
        scheduler: &FrameScheduler,
        target: Weak<T>,
        duration_ms: u64,
        timing: TimingFunction,
        mut on_frame: impl FnMut(&T, f64) + 'static,
        on_complete: impl FnOnce(bool) + 'static,
    ) -> Self {
        Self::start(
            scheduler,
            duration_ms,
            timing,
            Box::new(move |progress| match target.upgrade() {
                Some(target) => {
                    on_frame(&*target, progress);
                    true
                }
                None => false,
            }),
            Box::new(on_complete),
        )
    }

    fn start(
        scheduler: &FrameScheduler,
        duration_ms: u64,
        timing: TimingFunction,
        on_frame: Box<dyn FnMut(f64) -> bool>,
        on_complete: Completion,
    ) -> Self {
        let shared = Rc::new(Shared {
            scheduler: scheduler.clone(),
            duration_ms,
            timing,
            state: RefCell::new(AnimatorState {
                running: true,
                first_frame_ms: None,
                subscription: None,
                on_complete: Some(on_complete),
            }),
            on_frame: RefCell::new(on_frame),
        });

        let weak = Rc::downgrade(&shared);
        let id = scheduler.subscribe(move |now_ms| {
            if let Some(shared) = weak.upgrade() {
                shared.on_tick(now_ms);
            }
        });
        shared.state.borrow_mut().subscription = Some(id);
        atrace!(duration_ms, "FrameAnimator: started");

        Self { shared }
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.borrow().running
    }

    pub fn duration_ms(&self) -> u64 {
        self.shared.duration_ms
    }

    /// Stops the animation and reports `false` to `on_complete`. No-op when not running.
    pub fn cancel(&self) {
        self.shared.finish(false);
    }
}

impl Drop for FrameAnimator {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for FrameAnimator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameAnimator")
            .field("duration_ms", &self.shared.duration_ms)
            .field("timing", &self.shared.timing)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

fn progress(elapsed_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 1.0;
    }
    elapsed_ms as f64 / duration_ms as f64
}
