use alloc::vec;
use alloc::vec::Vec;

use crate::{AnimationOptions, TimingFunction};

/// One leg of an [`AnimationPlan`].
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationStep {
    pub target_offset: f64,
    pub duration_ms: u64,
    pub timing: TimingFunction,
}

/// An ordered, non-empty list of animation steps ending on the settle target.
///
/// A plan is either a single settle step, or an overshoot step followed by a step that settles
/// back onto the target.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationPlan {
    steps: Vec<AnimationStep>,
}

impl AnimationPlan {
    /// Builds a plan from `current_offset` to `target_offset`.
    ///
    /// `velocity` is the signed release velocity, if the plan follows a gesture. Overshoot is only
    /// added when `bounce` is set and the velocity is non-zero.
    pub fn new(
        current_offset: f64,
        target_offset: f64,
        velocity: Option<f64>,
        bounce: bool,
        options: &AnimationOptions,
    ) -> Self {
        let duration_ms = main_step_duration(current_offset, target_offset, velocity, options);

        let steps = match velocity {
            Some(v) if bounce && v != 0.0 => vec![
                AnimationStep {
                    target_offset: target_offset + v * options.bounce_radius,
                    duration_ms,
                    timing: TimingFunction::EaseOut,
                },
                AnimationStep {
                    target_offset,
                    duration_ms: options.bounce_settle_ms,
                    timing: TimingFunction::EaseOut,
                },
            ],
            _ => vec![AnimationStep {
                target_offset,
                duration_ms,
                timing: TimingFunction::EaseOut,
            }],
        };

        Self { steps }
    }

    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<AnimationStep> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn bounces(&self) -> bool {
        self.steps.len() > 1
    }

    /// The offset the plan comes to rest on.
    pub fn final_offset(&self) -> f64 {
        self.steps.last().map_or(0.0, |s| s.target_offset)
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.duration_ms))
    }
}

fn main_step_duration(
    current_offset: f64,
    target_offset: f64,
    velocity: Option<f64>,
    options: &AnimationOptions,
) -> u64 {
    let max = options.max_duration_ms;
    let Some(v) = velocity else {
        return max;
    };
    let speed = abs(v) * options.speed_scale;
    if speed <= 0.0 {
        return max;
    }
    let path = abs(target_offset - current_offset);
    let ms = path / speed * 1000.0;
    if ms < max as f64 {
        // Non-negative, so adding one half and truncating rounds to nearest.
        (ms + 0.5) as u64
    } else {
        max
    }
}

#[inline]
fn abs(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}
