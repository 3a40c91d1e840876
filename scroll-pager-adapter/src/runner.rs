use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use scroll_pager::{AnimationPlan, AnimationStep, lerp};

use crate::{Completion, FrameAnimator, FrameScheduler, ScrollSurface};

struct PlanState {
    steps: Vec<AnimationStep>,
    next_step: usize,
    animator: Option<FrameAnimator>,
    on_complete: Option<Completion>,
}

/// An [`AnimationPlan`] being executed against a scroll surface.
///
/// Steps run strictly in order, each one through its own [`FrameAnimator`] and each one
/// interpolating from the offset the surface has when the step starts. The surface is held
/// weakly.
///
/// `on_complete` fires exactly once: `true` after the last step, `false` if a step is cancelled,
/// the surface is released, or the plan is cancelled or dropped.
pub struct RunningPlan {
    state: Rc<RefCell<PlanState>>,
}

impl RunningPlan {
    pub fn start<S: ScrollSurface + 'static>(
        plan: AnimationPlan,
        surface: Weak<RefCell<S>>,
        scheduler: &FrameScheduler,
        on_complete: impl FnOnce(bool) + 'static,
    ) -> Self {
        adebug!(
            steps = plan.len(),
            target = plan.final_offset(),
            "RunningPlan::start"
        );
        let state = Rc::new(RefCell::new(PlanState {
            steps: plan.into_steps(),
            next_step: 0,
            animator: None,
            on_complete: Some(Box::new(on_complete)),
        }));
        advance(&state, &surface, scheduler);
        Self { state }
    }

    /// Whether the plan has not yet reported completion.
    pub fn is_running(&self) -> bool {
        self.state.borrow().on_complete.is_some()
    }

    /// Index of the step currently animating.
    pub fn current_step(&self) -> Option<usize> {
        let state = self.state.borrow();
        if state.on_complete.is_none() {
            return None;
        }
        state.next_step.checked_sub(1)
    }

    /// Stops the plan and reports `false`. No-op once the plan has completed.
    pub fn cancel(&self) {
        let animator = self.state.borrow_mut().animator.take();
        if let Some(animator) = animator {
            animator.cancel();
        }
        finish(&self.state, false);
    }
}

impl Drop for RunningPlan {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for RunningPlan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("RunningPlan")
            .field("steps", &state.steps)
            .field("next_step", &state.next_step)
            .field("running", &state.on_complete.is_some())
            .finish()
    }
}

fn advance<S: ScrollSurface + 'static>(
    state: &Rc<RefCell<PlanState>>,
    surface: &Weak<RefCell<S>>,
    scheduler: &FrameScheduler,
) {
    let step = {
        let mut st = state.borrow_mut();
        let step = st.steps.get(st.next_step).cloned();
        if step.is_some() {
            st.next_step += 1;
        }
        step
    };
    let Some(step) = step else {
        finish(state, true);
        return;
    };

    let Some(live) = surface.upgrade() else {
        adebug!("RunningPlan: surface released before step");
        finish(state, false);
        return;
    };
    let from = live.borrow().offset();
    drop(live);
    let to = step.target_offset;
    atrace!(from, to, duration_ms = step.duration_ms, "RunningPlan: step");

    let weak_state = Rc::downgrade(state);
    let next_surface = surface.clone();
    let next_scheduler = scheduler.clone();

    let animator = FrameAnimator::run_with_target(
        scheduler,
        surface.clone(),
        step.duration_ms,
        step.timing,
        move |surface: &RefCell<S>, progress| {
            if let Ok(mut surface) = surface.try_borrow_mut() {
                surface.set_offset(lerp(from, to, progress));
            }
        },
        move |success| {
            let Some(state) = weak_state.upgrade() else {
                return;
            };
            if success {
                advance(&state, &next_surface, &next_scheduler);
            } else {
                finish(&state, false);
            }
        },
    );
    state.borrow_mut().animator = Some(animator);
}

fn finish(state: &RefCell<PlanState>, success: bool) {
    let on_complete = state.borrow_mut().on_complete.take();
    if let Some(on_complete) = on_complete {
        adebug!(success, "RunningPlan: finished");
        on_complete(success);
    }
}
