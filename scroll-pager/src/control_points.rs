use alloc::vec::Vec;

use crate::{AbsoluteControlPoint, PagerError, RelativeControlPoint};

/// The declared control points plus their absolute offsets for the current surface height.
///
/// Absolute points are kept sorted ascending by value. Ties keep declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlPointSet {
    relative: Vec<RelativeControlPoint>,
    absolute: Vec<AbsoluteControlPoint>,
    surface_height: Option<f64>,
}

impl ControlPointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the declared points.
    ///
    /// Rejects fewer than 2 points without touching the current set. When a surface height is
    /// already known, absolute points are recomputed against it.
    pub fn configure(&mut self, points: Vec<RelativeControlPoint>) -> Result<(), PagerError> {
        if points.len() < 2 {
            pwarn!(count = points.len(), "ControlPointSet::configure: too few points");
            return Err(PagerError::TooFewControlPoints {
                count: points.len(),
            });
        }
        pdebug!(count = points.len(), "ControlPointSet::configure");
        self.relative = points;
        self.rebuild();
        Ok(())
    }

    /// Recomputes absolute points for a new surface height.
    ///
    /// Returns `false` (and does nothing) when the height is unchanged.
    pub fn recompute(&mut self, surface_height: f64) -> bool {
        if self.surface_height == Some(surface_height) {
            return false;
        }
        self.surface_height = Some(surface_height);
        self.rebuild();
        ptrace!(surface_height, "ControlPointSet::recompute");
        true
    }

    fn rebuild(&mut self) {
        let height = self.surface_height.unwrap_or(0.0);
        self.absolute = self
            .relative
            .iter()
            .enumerate()
            .map(|(original_index, point)| AbsoluteControlPoint {
                original_index,
                value: point.resolve(height),
            })
            .collect();
        // `sort_by` is stable, so equal values keep declaration order.
        self.absolute.sort_by(|a, b| a.value.total_cmp(&b.value));
    }

    pub fn is_configured(&self) -> bool {
        !self.relative.is_empty()
    }

    pub fn len(&self) -> usize {
        self.relative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relative.is_empty()
    }

    pub fn surface_height(&self) -> Option<f64> {
        self.surface_height
    }

    pub fn relative(&self) -> &[RelativeControlPoint] {
        &self.relative
    }

    pub fn absolute(&self) -> &[AbsoluteControlPoint] {
        &self.absolute
    }

    pub fn relative_point(&self, original_index: usize) -> Option<&RelativeControlPoint> {
        self.relative.get(original_index)
    }

    /// Position of a declared point within the sorted absolute list.
    pub fn position_of(&self, original_index: usize) -> Option<usize> {
        self.absolute
            .iter()
            .position(|p| p.original_index == original_index)
    }

    pub fn absolute_point(&self, original_index: usize) -> Option<AbsoluteControlPoint> {
        self.absolute
            .iter()
            .copied()
            .find(|p| p.original_index == original_index)
    }

    pub fn value_of(&self, original_index: usize) -> Option<f64> {
        self.absolute_point(original_index).map(|p| p.value)
    }

    /// The point with the largest offset.
    pub fn topmost(&self) -> Option<AbsoluteControlPoint> {
        self.absolute.last().copied()
    }

    /// The point with the smallest offset.
    pub fn bottommost(&self) -> Option<AbsoluteControlPoint> {
        self.absolute.first().copied()
    }

    pub fn second_from_bottom(&self) -> Option<AbsoluteControlPoint> {
        self.absolute.get(1).copied()
    }

    /// Distance between the two bottommost points.
    pub fn bottom_page_length(&self) -> Option<f64> {
        let first = self.bottommost()?;
        let second = self.second_from_bottom()?;
        Some(second.value - first.value)
    }
}
