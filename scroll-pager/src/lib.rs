//! A headless control-point paging engine for one-dimensional scroll surfaces.
//!
//! For the frame-driven animator and the paging controller, see the `scroll-pager-adapter`
//! crate.
//!
//! A surface declares a small ordered set of control points (offsets measured from its top or
//! bottom edge). When a drag is released, the surface settles on one of those points instead of
//! stopping wherever momentum carries it. This crate holds the pure parts of that behavior:
//!
//! - resolving declared points to absolute scroll offsets for a surface height
//! - deciding which point a released drag settles on (or whether it scrolls freely)
//! - building the one- or two-step (overshoot, then settle) animation plan
//! - the edge-inset policy that keeps every point reachable
//!
//! It is UI-agnostic. A GUI layer is expected to provide:
//! - surface height and content height
//! - scroll offset
//! - drag begin/end events with release velocity
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod control_points;
mod error;
mod insets;
mod options;
mod plan;
mod resolve;
mod timing;
mod types;

#[cfg(test)]
mod tests;

pub use control_points::ControlPointSet;
pub use error::PagerError;
pub use insets::edge_insets;
pub use options::{AnimationOptions, PagerOptions};
pub use plan::{AnimationPlan, AnimationStep};
pub use resolve::{Release, Resolution, allows_bounce, resolve_release};
pub use timing::{TimingFunction, lerp};
pub use types::{
    AbsoluteControlPoint, BounceDirection, Edge, EdgeInsets, InsetMode, Interaction,
    RelativeControlPoint, ScrollDirection, TargetDecision,
};
