//! Frame-driven animation and paging control for the `scroll-pager` crate.
//!
//! The `scroll-pager` crate is UI-agnostic and focuses on the math: control point resolution,
//! release resolution and animation plans. This crate provides the single-threaded runtime that
//! executes them:
//!
//! - [`FrameScheduler`]: a host-driven frame clock with deferred "next turn" tasks
//! - [`FrameAnimator`]: a cancellable, frame-synchronized value animator
//! - [`RunningPlan`]: sequences an animation plan against a weakly held surface
//! - [`PagingController`]: reacts to resize, drag and scroll-to-top events
//!
//! This crate is intentionally framework-agnostic. The host implements [`ScrollSurface`] for its
//! scroll view and forwards events.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod animator;
mod controller;
mod runner;
mod scheduler;
mod surface;


pub use animator::{Completion, FrameAnimator};
pub use controller::PagingController;
pub use runner::RunningPlan;
pub use scheduler::{FrameScheduler, SubscriptionId};
pub use surface::ScrollSurface;
