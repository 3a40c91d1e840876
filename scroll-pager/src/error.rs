use thiserror::Error;

/// Reasons a paging request is rejected.
///
/// Interruption of a running animation is not an error; it is reported as `false` to the
/// request's completion callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PagerError {
    #[error("at least 2 control points are required, got {count}")]
    TooFewControlPoints { count: usize },

    #[error("no control point with index {index}")]
    UnknownControlPoint { index: usize },

    #[error("control points have not been configured")]
    NotConfigured,

    #[error("the scroll surface has been released")]
    SurfaceReleased,
}
