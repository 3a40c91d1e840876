use alloc::sync::Arc;

/// Maps normalized progress in `[0, 1]` to transformed progress.
#[derive(Clone, Default)]
pub enum TimingFunction {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    /// A user-supplied mapping. It should return `0` at `0` and `1` at `1`.
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl TimingFunction {
    pub fn custom(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn sample(&self, progress: f64) -> f64 {
        match self {
            Self::Linear => progress,
            Self::EaseIn => progress * progress,
            Self::EaseOut => progress * (2.0 - progress),
            Self::Custom(f) => f(progress),
        }
    }
}

impl core::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Linear => f.write_str("Linear"),
            Self::EaseIn => f.write_str("EaseIn"),
            Self::EaseOut => f.write_str("EaseOut"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for TimingFunction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Linear, Self::Linear)
            | (Self::EaseIn, Self::EaseIn)
            | (Self::EaseOut, Self::EaseOut) => true,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Linear interpolation between two offsets.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
