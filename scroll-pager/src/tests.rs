use crate::*;

use alloc::vec;
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

const HEIGHT: f64 = 800.0;

/// bottom 0 (collapsed), bottom 200 (peeking), top 104 (expanded).
fn sheet_points() -> Vec<RelativeControlPoint> {
    vec![
        RelativeControlPoint::bottom(0.0).with_bounce(BounceDirection::None),
        RelativeControlPoint::bottom(200.0),
        RelativeControlPoint::top(104.0),
    ]
}

fn sheet_set(height: f64) -> ControlPointSet {
    let mut set = ControlPointSet::new();
    set.configure(sheet_points()).unwrap();
    set.recompute(height);
    set
}

fn values(set: &ControlPointSet) -> Vec<(usize, f64)> {
    set.absolute()
        .iter()
        .map(|p| (p.original_index, p.value))
        .collect()
}

fn release(current_offset: f64, proposed_target: f64, velocity: f64) -> Release {
    Release {
        current_offset,
        proposed_target,
        velocity,
    }
}

fn settled_index(resolution: Resolution) -> Option<usize> {
    match resolution {
        Resolution::Settle { point, .. } => Some(point.original_index),
        _ => None,
    }
}

#[test]
fn absolute_points_follow_edge_and_height() {
    let set = sheet_set(HEIGHT);
    assert_eq!(values(&set), vec![(0, -800.0), (1, -600.0), (2, -104.0)]);

    assert_eq!(set.bottommost().unwrap().original_index, 0);
    assert_eq!(set.second_from_bottom().unwrap().original_index, 1);
    assert_eq!(set.topmost().unwrap().original_index, 2);
    assert_eq!(set.bottom_page_length(), Some(200.0));
    assert_eq!(set.position_of(2), Some(2));
    assert_eq!(set.value_of(1), Some(-600.0));
    assert_eq!(set.value_of(3), None);
}

#[test]
fn resize_shifts_bottom_anchored_points_only() {
    let mut set = sheet_set(HEIGHT);
    assert!(set.recompute(500.0));
    assert_eq!(values(&set), vec![(0, -500.0), (1, -300.0), (2, -104.0)]);

    // A short surface can reorder points; declaration indexes follow the values.
    assert!(set.recompute(250.0));
    assert_eq!(values(&set), vec![(0, -250.0), (2, -104.0), (1, -50.0)]);
}

#[test]
fn recompute_with_same_height_is_a_no_op() {
    let mut set = sheet_set(HEIGHT);
    let before = set.clone();
    assert!(!set.recompute(HEIGHT));
    assert_eq!(set, before);
}

#[test]
fn configure_rejects_fewer_than_two_points() {
    let mut set = sheet_set(HEIGHT);
    let before = set.clone();

    assert_eq!(
        set.configure(vec![RelativeControlPoint::top(0.0)]),
        Err(PagerError::TooFewControlPoints { count: 1 })
    );
    assert_eq!(
        set.configure(Vec::new()),
        Err(PagerError::TooFewControlPoints { count: 0 })
    );
    assert_eq!(set, before);
}

#[test]
fn configure_recomputes_against_known_height() {
    let mut set = sheet_set(HEIGHT);
    set.configure(vec![
        RelativeControlPoint::top(10.0),
        RelativeControlPoint::bottom(10.0),
    ])
    .unwrap();
    assert_eq!(values(&set), vec![(1, -790.0), (0, -10.0)]);
}

#[test]
fn equal_values_keep_declaration_order() {
    let mut set = ControlPointSet::new();
    set.configure(vec![
        RelativeControlPoint::top(100.0),
        RelativeControlPoint::bottom(300.0),
        RelativeControlPoint::top(100.0),
    ])
    .unwrap();
    set.recompute(400.0);
    assert_eq!(values(&set), vec![(0, -100.0), (1, -100.0), (2, -100.0)]);
}

#[test]
fn absolute_points_are_sorted_permutations_randomized() {
    let mut rng = Lcg::new(0x5eed_cafe);
    for _ in 0..200 {
        let n = rng.gen_range_usize(2, 9);
        let points: Vec<RelativeControlPoint> = (0..n)
            .map(|_| {
                let value = rng.gen_range_u64(0, 1000) as f64;
                if rng.gen_bool() {
                    RelativeControlPoint::top(value)
                } else {
                    RelativeControlPoint::bottom(value)
                }
            })
            .collect();
        let height = rng.gen_range_u64(0, 2000) as f64;

        let mut set = ControlPointSet::new();
        set.configure(points.clone()).unwrap();
        set.recompute(height);

        let abs = set.absolute();
        assert_eq!(abs.len(), n);
        assert!(abs.windows(2).all(|w| w[0].value <= w[1].value));

        let mut seen: Vec<usize> = abs.iter().map(|p| p.original_index).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..n).collect::<Vec<_>>());

        for p in abs {
            assert_eq!(p.value, points[p.original_index].resolve(height));
        }

        let snapshot = set.clone();
        assert!(!set.recompute(height));
        assert_eq!(set, snapshot);
    }
}

#[test]
fn release_settles_on_crossed_point_over_nearer_one() {
    let set = sheet_set(HEIGHT);

    // Moving up from below -600 toward -200: -104 is nearer the proposed stop, but -600 was
    // crossed on the way.
    let r = resolve_release(&set, &release(-750.0, -200.0, 1.5), true);
    assert_eq!(settled_index(r), Some(1));

    // Moving down from -150 past -600.
    let r = resolve_release(&set, &release(-150.0, -700.0, -1.5), true);
    assert_eq!(settled_index(r), Some(1));
}

#[test]
fn release_scans_crossed_points_in_travel_direction() {
    let set = sheet_set(HEIGHT);

    // Both -600 and -104 lie between; the first one met wins.
    let r = resolve_release(&set, &release(-790.0, -50.0, 3.0), true);
    assert_eq!(settled_index(r), Some(1));

    let r = resolve_release(&set, &release(-50.0, -790.0, -3.0), true);
    assert_eq!(settled_index(r), Some(2));
}

#[test]
fn zero_velocity_release_picks_nearest_point() {
    let set = sheet_set(HEIGHT);

    let r = resolve_release(&set, &release(-600.0, -360.0, 0.0), true);
    assert_eq!(settled_index(r), Some(1));

    let r = resolve_release(&set, &release(-600.0, -340.0, 0.0), true);
    assert_eq!(settled_index(r), Some(2));
}

#[test]
fn nearest_tie_prefers_lower_declaration_index() {
    let mut set = ControlPointSet::new();
    set.configure(vec![
        RelativeControlPoint::top(100.0),
        RelativeControlPoint::top(300.0),
        RelativeControlPoint::bottom(0.0),
    ])
    .unwrap();
    set.recompute(HEIGHT);
    assert_eq!(values(&set), vec![(2, -800.0), (1, -300.0), (0, -100.0)]);

    let r = resolve_release(&set, &release(-200.0, -200.0, 0.0), true);
    assert_eq!(settled_index(r), Some(0));
}

#[test]
fn release_beyond_outermost_points_scrolls_freely() {
    let set = sheet_set(HEIGHT);

    let r = resolve_release(&set, &release(-90.0, -20.0, 0.5), true);
    assert_eq!(r, Resolution::FreeScroll);

    let r = resolve_release(&set, &release(-820.0, -900.0, -1.0), true);
    assert_eq!(r, Resolution::FreeScroll);

    // Landing exactly on the topmost point is not "beyond" it.
    let r = resolve_release(&set, &release(-90.0, -104.0, -0.2), true);
    assert_eq!(settled_index(r), Some(2));
}

#[test]
fn release_crossing_outermost_point_still_settles() {
    let set = sheet_set(HEIGHT);
    let r = resolve_release(&set, &release(-120.0, -20.0, 2.0), true);
    assert_eq!(settled_index(r), Some(2));
}

#[test]
fn disabled_bottommost_gesture_anchor_leaves_release_native() {
    let set = sheet_set(HEIGHT);

    let r = resolve_release(&set, &release(-700.0, -790.0, -0.5), false);
    assert_eq!(r, Resolution::Native);

    // Same release with the policy enabled settles on the bottommost point.
    let r = resolve_release(&set, &release(-700.0, -790.0, -0.5), true);
    assert_eq!(settled_index(r), Some(0));

    // At the second point from the bottom the gesture may anchor the bottommost one.
    let r = resolve_release(&set, &release(-600.0, -790.0, -0.5), false);
    assert_eq!(settled_index(r), Some(0));

    // Other targets are unaffected by the policy.
    let r = resolve_release(&set, &release(-750.0, -200.0, 1.5), false);
    assert_eq!(settled_index(r), Some(1));
}

#[test]
fn bounce_follows_declared_direction() {
    let set = sheet_set(HEIGHT);

    // Index 0 declares no bounce.
    let r = resolve_release(&set, &release(-600.0, -790.0, -0.5), true);
    assert_eq!(
        r,
        Resolution::Settle {
            point: AbsoluteControlPoint {
                original_index: 0,
                value: -800.0,
            },
            bounce: false,
        }
    );

    let r = resolve_release(&set, &release(-750.0, -200.0, 1.5), true);
    assert!(matches!(r, Resolution::Settle { bounce: true, .. }));

    assert!(allows_bounce(BounceDirection::Up, -700.0, -600.0));
    assert!(!allows_bounce(BounceDirection::Down, -700.0, -600.0));
    assert!(allows_bounce(BounceDirection::Down, -500.0, -600.0));
    assert!(!allows_bounce(BounceDirection::Up, -500.0, -600.0));
    assert!(!allows_bounce(BounceDirection::Up, -600.0, -600.0));
    assert!(!allows_bounce(BounceDirection::None, -700.0, -600.0));
    assert!(allows_bounce(BounceDirection::Any, -600.0, -600.0));
}

#[test]
fn zero_velocity_counts_as_backward() {
    assert_eq!(ScrollDirection::from_velocity(0.0), ScrollDirection::Backward);
    assert_eq!(ScrollDirection::from_velocity(-0.1), ScrollDirection::Backward);
    assert_eq!(ScrollDirection::from_velocity(0.1), ScrollDirection::Forward);
}

#[test]
fn plan_without_velocity_uses_max_duration() {
    let options = AnimationOptions::default();
    let plan = AnimationPlan::new(-800.0, -104.0, None, true, &options);
    assert_eq!(plan.len(), 1);
    assert!(!plan.bounces());
    let step = &plan.steps()[0];
    assert_eq!(step.target_offset, -104.0);
    assert_eq!(step.duration_ms, 300);
    assert_eq!(step.timing, TimingFunction::EaseOut);
}

#[test]
fn plan_duration_scales_with_release_speed() {
    let options = AnimationOptions::default();

    // 100 / (2 * 700) s = 71.4ms
    let plan = AnimationPlan::new(-700.0, -600.0, Some(2.0), false, &options);
    assert_eq!(plan.steps()[0].duration_ms, 71);

    let plan = AnimationPlan::new(-700.0, -600.0, Some(-2.0), false, &options);
    assert_eq!(plan.steps()[0].duration_ms, 71);

    // A slow release is capped.
    let plan = AnimationPlan::new(-800.0, -104.0, Some(0.01), false, &options);
    assert_eq!(plan.steps()[0].duration_ms, 300);

    let plan = AnimationPlan::new(-600.0, -600.0, Some(1.0), false, &options);
    assert_eq!(plan.steps()[0].duration_ms, 0);
}

#[test]
fn bouncing_plan_overshoots_then_settles() {
    let options = AnimationOptions::default();
    let plan = AnimationPlan::new(-700.0, -600.0, Some(2.0), true, &options);

    assert!(plan.bounces());
    let steps = plan.steps();
    assert_eq!(steps[0].target_offset, -600.0 + 2.0 * 14.0);
    assert_eq!(steps[0].duration_ms, 71);
    assert_eq!(steps[1].target_offset, -600.0);
    assert_eq!(steps[1].duration_ms, 300);
    assert_eq!(plan.final_offset(), -600.0);
    assert_eq!(plan.total_duration_ms(), 371);

    let plan = AnimationPlan::new(-700.0, -600.0, Some(0.0), true, &options);
    assert_eq!(plan.len(), 1);
}

#[test]
fn custom_animation_options_apply() {
    let options = AnimationOptions::default()
        .with_max_duration_ms(120)
        .with_bounce_radius(5.0)
        .with_bounce_settle_ms(90)
        .with_speed_scale(100.0);
    let plan = AnimationPlan::new(-700.0, -600.0, Some(-4.0), true, &options);
    let steps = plan.steps();
    assert_eq!(steps[0].target_offset, -620.0);
    assert_eq!(steps[0].duration_ms, 120);
    assert_eq!(steps[1].duration_ms, 90);
}

#[test]
fn timing_functions_map_progress() {
    assert_eq!(TimingFunction::Linear.sample(0.25), 0.25);
    assert_eq!(TimingFunction::EaseIn.sample(0.5), 0.25);
    assert_eq!(TimingFunction::EaseOut.sample(0.5), 0.75);
    for f in [
        TimingFunction::Linear,
        TimingFunction::EaseIn,
        TimingFunction::EaseOut,
    ] {
        assert_eq!(f.sample(0.0), 0.0);
        assert_eq!(f.sample(1.0), 1.0);
    }

    let step = TimingFunction::custom(|p| if p < 0.5 { 0.0 } else { 1.0 });
    assert_eq!(step.sample(0.4), 0.0);
    assert_eq!(step.sample(0.6), 1.0);
    assert_eq!(step, step.clone());
    assert_ne!(step, TimingFunction::custom(|p| p));

    assert_eq!(lerp(-800.0, -600.0, 0.5), -700.0);
}

#[test]
fn insets_open_up_during_motion() {
    let set = sheet_set(HEIGHT);

    let insets = edge_insets(InsetMode::Motion, HEIGHT, 2000.0, &set, false);
    assert_eq!(
        insets,
        EdgeInsets {
            top: 800.0,
            bottom: 0.0
        }
    );

    let insets = edge_insets(InsetMode::Rest, HEIGHT, 2000.0, &set, true);
    assert_eq!(insets.top, 800.0);
}

#[test]
fn rest_insets_narrow_when_bottommost_gesture_anchor_is_disabled() {
    let set = sheet_set(HEIGHT);
    let insets = edge_insets(InsetMode::Rest, HEIGHT, 300.0, &set, false);
    assert_eq!(
        insets,
        EdgeInsets {
            top: 600.0,
            bottom: 500.0
        }
    );
}

#[test]
fn target_decision_applies_to_proposed_offset() {
    assert_eq!(TargetDecision::Accept.apply(-42.0), -42.0);
    assert_eq!(TargetDecision::Override(-600.0).apply(-42.0), -600.0);
    assert!(TargetDecision::Override(0.0).is_override());
    assert!(!TargetDecision::Accept.is_override());
}

#[test]
fn pager_options_builder_and_clamp() {
    let options = PagerOptions::new()
        .with_allow_bottommost_gesture_anchor(false)
        .with_preferred_frame_rate(120)
        .with_animation(AnimationOptions::default().with_max_duration_ms(250));
    assert!(!options.allow_bottommost_gesture_anchor);
    assert_eq!(options.frame_rate(), 60);
    assert_eq!(options.animation.max_duration_ms, 250);
    assert_eq!(PagerOptions::default().frame_rate(), 45);
    assert_eq!(
        PagerOptions::default()
            .with_preferred_frame_rate(0)
            .frame_rate(),
        1
    );
}
