#![forbid(unsafe_code)]

//! Frame-stepped animation primitives.
//!
//! Only the settle spring lives here; drawers need nothing else. The
//! [`Animation`] trait is the seam a host animator can implement to plug in
//! its own interpolation.

pub mod spring;

use std::time::Duration;

pub use spring::{Spring, SpringParams};

/// A value that advances with frame time and eventually completes.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has settled.
    fn is_complete(&self) -> bool;

    /// Current value normalized to `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}
