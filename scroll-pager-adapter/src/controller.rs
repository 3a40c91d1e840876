use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use scroll_pager::{
    AbsoluteControlPoint, AnimationPlan, ControlPointSet, InsetMode, Interaction, PagerError,
    PagerOptions, RelativeControlPoint, Release, Resolution, TargetDecision, edge_insets,
    resolve_release,
};

use crate::{FrameScheduler, RunningPlan, ScrollSurface};

struct Inner<S> {
    surface: Weak<RefCell<S>>,
    points: ControlPointSet,
    anchored: Option<usize>,
    options: PagerOptions,
    interaction: Interaction,
    plan: Option<RunningPlan>,
    plan_generation: u64,
}

/// A framework-neutral controller that makes a scroll surface rest on declared control points.
///
/// This type does not hold any UI objects beyond a weak reference to the surface. Adapters drive
/// it by calling:
/// - `on_resize` when the surface height changes
/// - `on_drag_begin` / `on_drag_end` around user drags
/// - `should_scroll_to_top` when the platform asks whether to jump to the top
/// - `scheduler().tick(now_ms)` each frame, which runs settle animations
///
/// Every request that takes a completion callback invokes it exactly once: `true` when the
/// surface came to rest on the requested point, `false` when the request was rejected or
/// superseded. New intent always preempts old intent: a drag, a new anchor request or a
/// resize-triggered snap cancels the running animation first.
pub struct PagingController<S> {
    inner: Rc<RefCell<Inner<S>>>,
    scheduler: FrameScheduler,
}

impl<S: ScrollSurface + 'static> PagingController<S> {
    /// Creates a controller with its own frame scheduler.
    pub fn new(surface: &Rc<RefCell<S>>, options: PagerOptions) -> Self {
        let scheduler = FrameScheduler::with_frame_rate(options.frame_rate());
        Self::with_scheduler(surface, scheduler, options)
    }

    /// Creates a controller that animates on an existing scheduler.
    ///
    /// The scheduler's frame rate is set from `options`.
    pub fn with_scheduler(
        surface: &Rc<RefCell<S>>,
        scheduler: FrameScheduler,
        options: PagerOptions,
    ) -> Self {
        scheduler.set_frame_rate(options.frame_rate());
        Self {
            inner: Rc::new(RefCell::new(Inner {
                surface: Rc::downgrade(surface),
                points: ControlPointSet::new(),
                anchored: None,
                options,
                interaction: Interaction::Idle,
                plan: None,
                plan_generation: 0,
            })),
            scheduler,
        }
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn options(&self) -> PagerOptions {
        self.inner.borrow().options
    }

    pub fn set_options(&self, options: PagerOptions) {
        self.scheduler.set_frame_rate(options.frame_rate());
        self.inner.borrow_mut().options = options;
    }

    pub fn allow_bottommost_gesture_anchor(&self) -> bool {
        self.inner.borrow().options.allow_bottommost_gesture_anchor
    }

    pub fn set_allow_bottommost_gesture_anchor(&self, allow: bool) {
        self.inner.borrow_mut().options.allow_bottommost_gesture_anchor = allow;
    }

    /// Original index of the control point the surface rests on, or `None` in free scroll.
    pub fn current_anchor_index(&self) -> Option<usize> {
        self.inner.borrow().anchored
    }

    /// Position of the anchored point within [`Self::absolute_control_points`].
    pub fn absolute_anchor_position(&self) -> Option<usize> {
        let inner = self.inner.borrow();
        inner.anchored.and_then(|i| inner.points.position_of(i))
    }

    pub fn relative_control_points(&self) -> Vec<RelativeControlPoint> {
        self.inner.borrow().points.relative().to_vec()
    }

    /// Control points resolved for the current height, sorted ascending by offset.
    pub fn absolute_control_points(&self) -> Vec<AbsoluteControlPoint> {
        self.inner.borrow().points.absolute().to_vec()
    }

    pub fn interaction(&self) -> Interaction {
        self.inner.borrow().interaction
    }

    pub fn is_animating(&self) -> bool {
        self.inner
            .borrow()
            .plan
            .as_ref()
            .is_some_and(RunningPlan::is_running)
    }

    /// Cancels the running settle animation, if any. Its completion reports `false`.
    pub fn cancel_animation(&self) {
        let plan = {
            let mut inner = self.inner.borrow_mut();
            if inner.interaction == Interaction::Settling {
                inner.interaction = Interaction::Idle;
            }
            inner.plan.take()
        };
        if let Some(plan) = plan {
            adebug!("PagingController: cancelling settle");
            plan.cancel();
        }
    }

    /// Replaces the control points and anchors to `anchor_index`.
    pub fn configure(
        &self,
        points: Vec<RelativeControlPoint>,
        anchor_index: usize,
        animated: bool,
    ) -> Result<(), PagerError> {
        self.configure_with(points, anchor_index, animated, |_| {})
    }

    /// Replaces the control points and anchors to `anchor_index`, reporting to `on_complete`.
    ///
    /// Fewer than 2 points are rejected without any change. Otherwise the previous anchor is
    /// cleared before anchoring into the new set.
    pub fn configure_with(
        &self,
        points: Vec<RelativeControlPoint>,
        anchor_index: usize,
        animated: bool,
        on_complete: impl FnOnce(bool) + 'static,
    ) -> Result<(), PagerError> {
        let configured = self.inner.borrow_mut().points.configure(points);
        if let Err(err) = configured {
            on_complete(false);
            return Err(err);
        }

        self.cancel_animation();
        self.inner.borrow_mut().anchored = None;
        self.anchor_with(anchor_index, animated, on_complete)
    }

    /// Anchors the surface to the control point declared at `index`.
    pub fn anchor(&self, index: usize, animated: bool) -> Result<(), PagerError> {
        self.anchor_with(index, animated, |_| {})
    }

    /// Anchors the surface to the control point declared at `index`, reporting to `on_complete`.
    ///
    /// Without animation the offset is applied immediately and `on_complete(true)` is delivered on
    /// the next scheduler turn, after completions that were already queued. With animation the
    /// surface flashes its scroll indicators and eases to the point without overshoot.
    ///
    /// An unknown index is rejected without any change.
    pub fn anchor_with(
        &self,
        index: usize,
        animated: bool,
        on_complete: impl FnOnce(bool) + 'static,
    ) -> Result<(), PagerError> {
        let target = {
            let inner = self.inner.borrow();
            if inner.points.is_configured() {
                inner
                    .points
                    .value_of(index)
                    .ok_or(PagerError::UnknownControlPoint { index })
            } else {
                Err(PagerError::NotConfigured)
            }
        };
        let target = match target {
            Ok(target) => target,
            Err(err) => {
                awarn!(index, "PagingController::anchor: {}", err);
                on_complete(false);
                return Err(err);
            }
        };
        let Some(surface) = self.surface() else {
            on_complete(false);
            return Err(PagerError::SurfaceReleased);
        };

        self.cancel_animation();
        adebug!(index, target, animated, "PagingController::anchor");

        if animated {
            surface.borrow_mut().flash_scroll_indicators();
            let current = surface.borrow().offset();
            let plan = {
                let inner = self.inner.borrow();
                AnimationPlan::new(current, target, None, false, &inner.options.animation)
            };
            self.start_plan(plan, index, on_complete);
        } else {
            {
                let mut inner = self.inner.borrow_mut();
                inner.anchored = Some(index);
                inner.interaction = Interaction::Idle;
            }
            apply_insets(&self.inner, InsetMode::Rest);
            surface.borrow_mut().set_offset(target);
            self.scheduler.defer(move || on_complete(true));
        }
        Ok(())
    }

    /// Reports a new surface height.
    ///
    /// Control points are recomputed and an anchored surface is moved to the anchored point's new
    /// offset without animation. This includes the first layout: an anchor set before any height
    /// was known was resolved against a zero height.
    pub fn on_resize(&self, height: f64) {
        let snap = {
            let mut inner = self.inner.borrow_mut();
            if !inner.points.recompute(height) {
                return;
            }
            inner.anchored.and_then(|i| inner.points.value_of(i))
        };
        atrace!(height, "PagingController::on_resize");

        if let Some(offset) = snap {
            self.cancel_animation();
            if let Some(surface) = self.surface() {
                surface.borrow_mut().set_offset(offset);
            }
        }

        let mode = match self.interaction() {
            Interaction::Idle => InsetMode::Rest,
            Interaction::Dragging | Interaction::Settling => InsetMode::Motion,
        };
        apply_insets(&self.inner, mode);
    }

    /// Reports that the user started dragging the surface.
    pub fn on_drag_begin(&self) {
        if self.surface().is_none() {
            return;
        }
        self.cancel_animation();
        self.inner.borrow_mut().interaction = Interaction::Dragging;
        apply_insets(&self.inner, InsetMode::Motion);
    }

    /// Reports that the user released a drag.
    ///
    /// `velocity` is signed (positive toward increasing offset); zero counts as moving backward.
    /// `proposed_target` is where the host's native deceleration would stop.
    ///
    /// Returns [`TargetDecision::Override`] with the current offset when the controller takes over
    /// and settles on a control point, or [`TargetDecision::Accept`] when the host's deceleration
    /// should run as proposed: either free scroll (the anchor is cleared) or a release toward the
    /// bottommost point that gestures may not anchor.
    pub fn on_drag_end(&self, velocity: f64, proposed_target: f64) -> TargetDecision {
        let Some(surface) = self.surface() else {
            return TargetDecision::Accept;
        };
        let current_offset = surface.borrow().offset();
        let release = Release {
            current_offset,
            proposed_target,
            velocity,
        };

        let resolution = {
            let mut inner = self.inner.borrow_mut();
            inner.interaction = Interaction::Idle;
            resolve_release(
                &inner.points,
                &release,
                inner.options.allow_bottommost_gesture_anchor,
            )
        };
        adebug!(
            current_offset,
            proposed_target,
            velocity,
            resolution = ?resolution,
            "PagingController::on_drag_end"
        );

        match resolution {
            Resolution::FreeScroll => {
                self.inner.borrow_mut().anchored = None;
                apply_insets(&self.inner, InsetMode::Rest);
                TargetDecision::Accept
            }
            Resolution::Native => {
                apply_insets(&self.inner, InsetMode::Rest);
                TargetDecision::Accept
            }
            Resolution::Settle { point, bounce } => {
                let plan = {
                    let inner = self.inner.borrow();
                    AnimationPlan::new(
                        current_offset,
                        point.value,
                        Some(velocity),
                        bounce,
                        &inner.options.animation,
                    )
                };
                self.start_plan(plan, point.original_index, |_| {});
                TargetDecision::Override(current_offset)
            }
        }
    }

    /// Answers the platform's scroll-to-top request.
    ///
    /// Always declines the native jump once control points are configured. Unless the surface is
    /// already anchored to the topmost point, it stops native motion and animates there instead.
    pub fn should_scroll_to_top(&self) -> bool {
        let topmost = self.inner.borrow().points.topmost();
        let Some(topmost) = topmost else {
            return true;
        };
        if self.current_anchor_index() == Some(topmost.original_index) {
            return false;
        }
        let Some(surface) = self.surface() else {
            return false;
        };

        self.cancel_animation();
        surface.borrow_mut().stop_scrolling();
        if let Err(err) = self.anchor(topmost.original_index, true) {
            awarn!(
                index = topmost.original_index,
                "PagingController::should_scroll_to_top: {}",
                err
            );
            debug_assert!(false, "topmost control point did not resolve: {err}");
        }
        false
    }

    fn surface(&self) -> Option<Rc<RefCell<S>>> {
        let surface = self.inner.borrow().surface.upgrade();
        if surface.is_none() {
            awarn!("PagingController: driven after its scroll surface was released");
        }
        debug_assert!(
            surface.is_some(),
            "PagingController: driven after its scroll surface was released"
        );
        surface
    }

    fn start_plan(
        &self,
        plan: AnimationPlan,
        settle_index: usize,
        on_complete: impl FnOnce(bool) + 'static,
    ) {
        self.cancel_animation();
        let (surface, generation) = {
            let mut inner = self.inner.borrow_mut();
            inner.plan_generation = inner.plan_generation.wrapping_add(1);
            inner.interaction = Interaction::Settling;
            (inner.surface.clone(), inner.plan_generation)
        };
        apply_insets(&self.inner, InsetMode::Motion);

        let weak = Rc::downgrade(&self.inner);
        let running = RunningPlan::start(plan, surface, &self.scheduler, move |success| {
            if let Some(inner) = weak.upgrade() {
                if success {
                    settled(&inner, generation, settle_index);
                } else {
                    interrupted(&inner, generation);
                }
            }
            on_complete(success);
        });

        // A plan can finish during `start` when the surface is already gone.
        let leftover = {
            let mut inner = self.inner.borrow_mut();
            if inner.plan_generation != generation {
                Some(running)
            } else if running.is_running() {
                inner.plan.replace(running)
            } else {
                inner.interaction = Interaction::Idle;
                Some(running)
            }
        };
        drop(leftover);
    }
}

impl<S> core::fmt::Debug for PagingController<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("PagingController")
            .field("points", &inner.points)
            .field("anchored", &inner.anchored)
            .field("options", &inner.options)
            .field("interaction", &inner.interaction)
            .field("plan", &inner.plan)
            .finish_non_exhaustive()
    }
}

fn settled<S: ScrollSurface>(inner: &RefCell<Inner<S>>, generation: u64, index: usize) {
    let plan = {
        let mut inner = inner.borrow_mut();
        if inner.plan_generation != generation {
            return;
        }
        inner.anchored = Some(index);
        inner.interaction = Interaction::Idle;
        inner.plan.take()
    };
    // Already complete, so dropping it reports nothing.
    drop(plan);
    adebug!(index, "PagingController: settled");
    apply_insets(inner, InsetMode::Rest);
}

// Reached when a plan fails on its own, e.g. after the surface is released.
fn interrupted<S>(inner: &RefCell<Inner<S>>, generation: u64) {
    let Ok(mut inner) = inner.try_borrow_mut() else {
        return;
    };
    if inner.plan_generation == generation && inner.interaction == Interaction::Settling {
        inner.interaction = Interaction::Idle;
    }
}

fn apply_insets<S: ScrollSurface>(inner: &RefCell<Inner<S>>, mode: InsetMode) {
    let inner = inner.borrow();
    let Some(surface) = inner.surface.upgrade() else {
        return;
    };
    let content_height = surface.borrow().content_height();
    let insets = edge_insets(
        mode,
        inner.points.surface_height().unwrap_or(0.0),
        content_height,
        &inner.points,
        inner.options.allow_bottommost_gesture_anchor,
    );
    surface.borrow_mut().set_insets(insets);
}
