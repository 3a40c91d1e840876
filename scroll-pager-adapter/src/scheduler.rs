use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

type FrameCallback = Rc<RefCell<dyn FnMut(u64)>>;
type Task = Box<dyn FnOnce()>;

/// Identifies a frame subscription on a [`FrameScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct SchedulerState {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, FrameCallback)>,
    deferred: VecDeque<Task>,
    frame_interval_ms: u64,
    next_frame_ms: Option<u64>,
}

/// A host-driven, single-threaded frame clock.
///
/// The host calls [`FrameScheduler::tick`] from its display refresh callback (or a timer). Each
/// tick first runs tasks deferred with [`FrameScheduler::defer`], then, if a frame is due,
/// invokes every frame subscriber.
///
/// Frames are due on a fixed phase of `1000 / fps` ms, with half an interval of tolerance, so a
/// host ticking faster than the preferred rate gets close to that rate on average (a 60 Hz host
/// with a 45 Hz preference delivers three frames out of four). A host that stalls for more than
/// an interval restarts the phase at its next tick.
///
/// Cloning yields another handle to the same scheduler.
#[derive(Clone)]
pub struct FrameScheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    /// Creates a scheduler delivering frames at up to 60 Hz.
    pub fn new() -> Self {
        Self::with_frame_rate(60)
    }

    /// Creates a scheduler delivering frames at up to `fps` (clamped to `1..=60`).
    pub fn with_frame_rate(fps: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(SchedulerState {
                next_id: 0,
                subscribers: Vec::new(),
                deferred: VecDeque::new(),
                frame_interval_ms: frame_interval_ms(fps),
                next_frame_ms: None,
            })),
        }
    }

    pub fn set_frame_rate(&self, fps: u32) {
        self.state.borrow_mut().frame_interval_ms = frame_interval_ms(fps);
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.state.borrow().frame_interval_ms
    }

    /// Registers a per-frame callback. It receives the tick timestamp in milliseconds.
    pub fn subscribe(&self, on_frame: impl FnMut(u64) + 'static) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        let id = SubscriptionId(state.next_id);
        state.next_id = state.next_id.wrapping_add(1);
        let on_frame: FrameCallback = Rc::new(RefCell::new(on_frame));
        state.subscribers.push((id, on_frame));
        atrace!(id = id.0, "FrameScheduler::subscribe");
        id
    }

    /// Removes a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.subscribers.len();
        state.subscribers.retain(|(sub, _)| *sub != id);
        state.subscribers.len() != before
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.state
            .borrow()
            .subscribers
            .iter()
            .any(|(sub, _)| *sub == id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }

    /// Queues `task` for the next scheduling turn.
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.state.borrow_mut().deferred.push_back(Box::new(task));
    }

    pub fn deferred_count(&self) -> usize {
        self.state.borrow().deferred.len()
    }

    /// Whether anything is waiting for a tick.
    pub fn has_pending_work(&self) -> bool {
        let state = self.state.borrow();
        !state.subscribers.is_empty() || !state.deferred.is_empty()
    }

    /// Runs the tasks that were queued before this call.
    ///
    /// Tasks queued while running wait for the following turn. Returns the number of tasks run.
    pub fn run_deferred(&self) -> usize {
        let batch = core::mem::take(&mut self.state.borrow_mut().deferred);
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }

    /// Advances the scheduler to `now_ms`.
    pub fn tick(&self, now_ms: u64) {
        self.run_deferred();

        let subscribers = {
            let mut state = self.state.borrow_mut();
            let interval = state.frame_interval_ms;
            let next = match state.next_frame_ms {
                Some(due) if now_ms + interval / 2 < due => return,
                Some(due) if now_ms < due + interval => due + interval,
                _ => now_ms + interval,
            };
            state.next_frame_ms = Some(next);
            state.subscribers.clone()
        };

        for (id, on_frame) in subscribers {
            // A callback earlier in this frame may have cancelled a later one.
            if !self.is_subscribed(id) {
                continue;
            }
            if let Ok(mut on_frame) = on_frame.try_borrow_mut() {
                (&mut *on_frame)(now_ms);
            }
        }
    }
}

impl core::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FrameScheduler")
            .field("subscribers", &state.subscribers.len())
            .field("deferred", &state.deferred.len())
            .field("frame_interval_ms", &state.frame_interval_ms)
            .field("next_frame_ms", &state.next_frame_ms)
            .finish()
    }
}

fn frame_interval_ms(fps: u32) -> u64 {
    1000 / u64::from(fps.clamp(1, 60))
}
