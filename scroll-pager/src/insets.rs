use crate::{ControlPointSet, EdgeInsets, InsetMode};

/// Computes the content insets for a surface.
///
/// In [`InsetMode::Motion`] the top inset equals the surface height, so every control point is
/// reachable. At rest with `allow_bottommost` disabled, the top inset shrinks by the span between
/// the two bottommost control points, which keeps native deceleration from passing the second
/// point from the bottom. The bottom inset lets content shorter than the surface fill it.
pub fn edge_insets(
    mode: InsetMode,
    surface_height: f64,
    content_height: f64,
    points: &ControlPointSet,
    allow_bottommost: bool,
) -> EdgeInsets {
    let shortfall = surface_height - content_height;
    let bottom = if shortfall > 0.0 { shortfall } else { 0.0 };

    let top = match mode {
        InsetMode::Rest if !allow_bottommost => {
            surface_height - points.bottom_page_length().unwrap_or(0.0)
        }
        _ => surface_height,
    };

    EdgeInsets { top, bottom }
}
