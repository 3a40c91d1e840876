/// The edge of the visible surface a [`RelativeControlPoint`] is measured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    #[default]
    Top,
    Bottom,
}

/// Overshoot directions permitted when a control point is the resolved target of a release.
///
/// "Up" is toward increasing scroll offset, "down" toward decreasing offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BounceDirection {
    None,
    Up,
    Down,
    #[default]
    Any,
}

impl BounceDirection {
    pub fn allows_up(self) -> bool {
        matches!(self, Self::Up | Self::Any)
    }

    pub fn allows_down(self) -> bool {
        matches!(self, Self::Down | Self::Any)
    }
}

/// A user-declared control point, expressed relative to one edge of the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelativeControlPoint {
    pub edge: Edge,
    /// Non-negative distance from `edge`, in content units.
    pub value: f64,
    pub bounce: BounceDirection,
}

impl RelativeControlPoint {
    pub fn new(edge: Edge, value: f64, bounce: BounceDirection) -> Self {
        Self {
            edge,
            value,
            bounce,
        }
    }

    pub fn top(value: f64) -> Self {
        Self::new(Edge::Top, value, BounceDirection::Any)
    }

    pub fn bottom(value: f64) -> Self {
        Self::new(Edge::Bottom, value, BounceDirection::Any)
    }

    pub fn with_bounce(mut self, bounce: BounceDirection) -> Self {
        self.bounce = bounce;
        self
    }

    /// Resolves this point to a scroll offset for a surface of the given height.
    pub fn resolve(&self, surface_height: f64) -> f64 {
        match self.edge {
            Edge::Top => -self.value,
            Edge::Bottom => -(surface_height - self.value),
        }
    }
}

/// A control point resolved to an absolute scroll offset.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbsoluteControlPoint {
    /// Position of the originating point in the declared list.
    pub original_index: usize,
    pub value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// Direction of travel for a release velocity.
    ///
    /// A velocity of exactly zero counts as `Backward`.
    pub fn from_velocity(velocity: f64) -> Self {
        if velocity > 0.0 {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

/// Content insets the host should apply to its scroll surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeInsets {
    pub top: f64,
    pub bottom: f64,
}

/// Which inset policy to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsetMode {
    /// A drag or a controller animation is in progress: every control point must be reachable.
    Motion,
    /// Nothing is moving the surface on the controller's behalf.
    Rest,
}

/// The controller's answer to a released drag.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetDecision {
    /// Let the host's proposed deceleration target stand.
    Accept,
    /// Replace the proposed target with this offset; the controller animates from there.
    Override(f64),
}

impl TargetDecision {
    pub fn apply(self, proposed: f64) -> f64 {
        match self {
            Self::Accept => proposed,
            Self::Override(offset) => offset,
        }
    }

    pub fn is_override(self) -> bool {
        matches!(self, Self::Override(_))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interaction {
    #[default]
    Idle,
    Dragging,
    Settling,
}
