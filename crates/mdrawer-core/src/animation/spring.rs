#![forbid(unsafe_code)]

//! Damped harmonic oscillator used to settle drawers.
//!
//! Classical damped spring equation:
//!
//!   m·a = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): restoring force. Higher = faster settle.
//! - **damping** (c): velocity drag. Lower = more bounce.
//! - **mass** (m): inertia. Drawers always use 1.0.
//!
//! Drawer tuning maps the two user-facing knobs onto these:
//! `stiffness = 100 + 100 × speed`, `damping = 20 − 10 × bounciness`.
//!
//! # Integration
//!
//! Semi-implicit Euler. Large `dt` values are subdivided into 4ms steps so
//! stiff springs stay stable when a frame is dropped.
//!
//! # Invariants
//!
//! 1. `value()` is clamped to [0.0, 1.0]; `position()` is raw.
//! 2. A spring at rest stays at rest until `set_target()`, `impulse()` or
//!    `reset()`.
//! 3. Stiffness and mass are always positive; damping is never negative.
//! 4. On coming to rest the position snaps exactly onto the target.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Default position delta below which the spring is at rest.
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Default velocity below which (with the position threshold) the spring is at rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

const MIN_STIFFNESS: f64 = 0.1;
const MIN_MASS: f64 = 0.001;

/// Physical constants for a spring, detached from its motion state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringParams {
    /// Map drawer tuning knobs onto physical constants.
    ///
    /// Higher `speed` raises stiffness; higher `bounciness` lowers damping.
    /// Damping bottoms out at zero for bounciness above 2.
    #[must_use]
    pub fn from_tuning(speed: f64, bounciness: f64) -> Self {
        Self {
            stiffness: 100.0 + speed * 100.0,
            damping: (20.0 - bounciness * 10.0).max(0.0),
            mass: 1.0,
        }
    }

    /// Critical damping for these stiffness and mass values.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }
}

impl Default for SpringParams {
    /// Tuning for the default drawer (speed 0.5, bounciness 0.3).
    fn default() -> Self {
        Self::from_tuning(0.5, 0.3)
    }
}

/// A damped spring moving a scalar toward a target.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    mass: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target` with the
    /// default drawer tuning.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 0.0,
            damping: 0.0,
            mass: 1.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: false,
        }
        .with_params(SpringParams::default())
    }

    /// Apply all physical constants at once (builder pattern).
    #[must_use]
    pub fn with_params(self, params: SpringParams) -> Self {
        self.with_stiffness(params.stiffness)
            .with_damping(params.damping)
            .with_mass(params.mass)
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Set mass (builder pattern).
    #[must_use]
    pub fn with_mass(mut self, m: f64) -> Self {
        self.mass = m.max(MIN_MASS);
        self
    }

    /// Set rest threshold (builder pattern).
    #[must_use]
    pub fn with_rest_threshold(mut self, threshold: f64) -> Self {
        self.rest_threshold = threshold.abs();
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current physical constants.
    #[must_use]
    pub fn params(&self) -> SpringParams {
        SpringParams {
            stiffness: self.stiffness,
            damping: self.damping,
            mass: self.mass,
        }
    }

    /// Change the target, keeping position and velocity. Wakes the spring if
    /// the target moved.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Apply an impulse (add to velocity). Wakes the spring.
    pub fn impulse(&mut self, velocity_delta: f64) {
        self.velocity += velocity_delta;
        self.at_rest = false;
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let force = -self.stiffness * displacement - self.damping * self.velocity;
        let acceleration = force / self.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    fn settle_if_resting(&mut self) {
        let pos_delta = (self.position - self.target).abs();
        if pos_delta < self.rest_threshold && self.velocity.abs() < self.velocity_threshold {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        // A spring created on its target with no velocity rests immediately,
        // even for a zero-length frame.
        self.settle_if_resting();
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        self.settle_if_resting();
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}
