/// Timing constants used when building an [`crate::AnimationPlan`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationOptions {
    /// Upper bound for the duration of the main settle step.
    pub max_duration_ms: u64,
    /// Scales release velocity into a settle speed: a faster release settles faster.
    pub speed_scale: f64,
    /// Overshoot distance per unit of release velocity.
    pub bounce_radius: f64,
    /// Duration of the step that settles back after an overshoot.
    pub bounce_settle_ms: u64,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            max_duration_ms: 300,
            speed_scale: 700.0,
            bounce_radius: 14.0,
            bounce_settle_ms: 300,
        }
    }
}

impl AnimationOptions {
    pub fn with_max_duration_ms(mut self, max_duration_ms: u64) -> Self {
        self.max_duration_ms = max_duration_ms;
        self
    }

    pub fn with_speed_scale(mut self, speed_scale: f64) -> Self {
        self.speed_scale = speed_scale;
        self
    }

    pub fn with_bounce_radius(mut self, bounce_radius: f64) -> Self {
        self.bounce_radius = bounce_radius;
        self
    }

    pub fn with_bounce_settle_ms(mut self, bounce_settle_ms: u64) -> Self {
        self.bounce_settle_ms = bounce_settle_ms;
        self
    }
}

/// Configuration for a paging controller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PagerOptions {
    pub animation: AnimationOptions,

    /// Whether a released drag may settle on the bottommost control point while the surface is
    /// still below the point above it.
    ///
    /// When disabled, such releases are left to native deceleration and the resting top inset is
    /// narrowed so that deceleration stops at the second point from the bottom.
    pub allow_bottommost_gesture_anchor: bool,

    /// Frame rate requested from the frame scheduler. Clamped to `1..=60`.
    pub preferred_frame_rate: u32,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            animation: AnimationOptions::default(),
            allow_bottommost_gesture_anchor: true,
            preferred_frame_rate: 45,
        }
    }
}

impl PagerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_animation(mut self, animation: AnimationOptions) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_allow_bottommost_gesture_anchor(mut self, allow: bool) -> Self {
        self.allow_bottommost_gesture_anchor = allow;
        self
    }

    pub fn with_preferred_frame_rate(mut self, fps: u32) -> Self {
        self.preferred_frame_rate = fps;
        self
    }

    pub fn frame_rate(&self) -> u32 {
        self.preferred_frame_rate.clamp(1, 60)
    }
}
