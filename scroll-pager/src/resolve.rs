use crate::{AbsoluteControlPoint, BounceDirection, ControlPointSet, ScrollDirection};

/// Geometry of a released drag.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Release {
    /// Offset of the surface at the moment of release.
    pub current_offset: f64,
    /// Where the host's native deceleration would come to rest.
    pub proposed_target: f64,
    /// Signed release velocity, offset units per millisecond.
    pub velocity: f64,
}

impl Release {
    pub fn direction(&self) -> ScrollDirection {
        ScrollDirection::from_velocity(self.velocity)
    }
}

/// Outcome of resolving a released drag against a control point set.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    /// No control point applies; the surface coasts and the anchor is cleared.
    FreeScroll,
    /// The controller stays out of the way and leaves native deceleration untouched.
    Native,
    /// Settle on `point`, optionally overshooting first.
    Settle {
        point: AbsoluteControlPoint,
        bounce: bool,
    },
}

/// Resolves which control point a released drag settles on.
///
/// `allow_bottommost` controls whether a gesture may settle on the bottommost point while the
/// surface is still below the point above it.
pub fn resolve_release(
    points: &ControlPointSet,
    release: &Release,
    allow_bottommost: bool,
) -> Resolution {
    let Some(point) = find_target(points, release) else {
        return Resolution::FreeScroll;
    };

    if !allow_bottommost && is_bottommost(points, point) {
        let reached = points
            .second_from_bottom()
            .is_some_and(|p| release.current_offset >= p.value);
        if !reached {
            return Resolution::Native;
        }
    }

    let bounce = points.relative_point(point.original_index).is_some_and(|relative| {
        allows_bounce(relative.bounce, release.current_offset, point.value)
    });

    Resolution::Settle { point, bounce }
}

/// Whether a settle from `current_offset` toward `target` may overshoot.
pub fn allows_bounce(direction: BounceDirection, current_offset: f64, target: f64) -> bool {
    if direction == BounceDirection::None {
        return false;
    }
    if !direction.allows_up() && current_offset <= target {
        return false;
    }
    if !direction.allows_down() && current_offset >= target {
        return false;
    }
    true
}

fn is_bottommost(points: &ControlPointSet, point: AbsoluteControlPoint) -> bool {
    points
        .bottommost()
        .is_some_and(|p| p.original_index == point.original_index)
}

fn find_target(points: &ControlPointSet, release: &Release) -> Option<AbsoluteControlPoint> {
    let absolute = points.absolute();
    let current = release.current_offset;
    let proposed = release.proposed_target;

    // A point crossed on the way to the proposed target wins even if it is not the nearest.
    let passed = match release.direction() {
        ScrollDirection::Forward => absolute
            .iter()
            .find(|p| current < p.value && p.value < proposed),
        ScrollDirection::Backward => absolute
            .iter()
            .rev()
            .find(|p| current > p.value && p.value > proposed),
    };
    if let Some(point) = passed {
        return Some(*point);
    }

    let (position, nearest) = absolute.iter().enumerate().min_by(|(_, a), (_, b)| {
        distance(a.value, proposed)
            .total_cmp(&distance(b.value, proposed))
            .then(a.original_index.cmp(&b.original_index))
    })?;

    let last = absolute.len() - 1;
    if position == last && proposed > nearest.value {
        return None;
    }
    if position == 0 && proposed < nearest.value {
        return None;
    }

    Some(*nearest)
}

#[inline]
fn distance(a: f64, b: f64) -> f64 {
    if a > b { a - b } else { b - a }
}
