// Example: resolving released drags and building settle plans without any UI.
use scroll_pager::{
    AnimationOptions, AnimationPlan, BounceDirection, ControlPointSet, InsetMode, Release,
    RelativeControlPoint, Resolution, edge_insets, resolve_release,
};

fn main() {
    let mut points = ControlPointSet::new();
    points
        .configure(vec![
            RelativeControlPoint::bottom(0.0).with_bounce(BounceDirection::None),
            RelativeControlPoint::bottom(200.0),
            RelativeControlPoint::top(104.0),
        ])
        .expect("at least two points");
    points.recompute(800.0);
    println!("absolute={:?}", points.absolute());

    let options = AnimationOptions::default();
    let releases = [
        Release {
            current_offset: -750.0,
            proposed_target: -200.0,
            velocity: 1.5,
        },
        Release {
            current_offset: -380.0,
            proposed_target: -380.0,
            velocity: 0.0,
        },
        Release {
            current_offset: -90.0,
            proposed_target: -20.0,
            velocity: 0.5,
        },
        Release {
            current_offset: -700.0,
            proposed_target: -790.0,
            velocity: -0.5,
        },
    ];

    for allow_bottommost in [true, false] {
        println!("allow_bottommost={allow_bottommost}");
        for release in &releases {
            let resolution = resolve_release(&points, release, allow_bottommost);
            match resolution {
                Resolution::Settle { point, bounce } => {
                    let plan = AnimationPlan::new(
                        release.current_offset,
                        point.value,
                        Some(release.velocity),
                        bounce,
                        &options,
                    );
                    println!(
                        "  {release:?} -> settle on #{} steps={:?} total_ms={}",
                        point.original_index,
                        plan.steps()
                            .iter()
                            .map(|s| (s.target_offset, s.duration_ms))
                            .collect::<Vec<_>>(),
                        plan.total_duration_ms()
                    );
                }
                other => println!("  {release:?} -> {other:?}"),
            }
        }

        let insets = edge_insets(InsetMode::Rest, 800.0, 1_600.0, &points, allow_bottommost);
        println!("  resting insets={insets:?}");
    }
}
