#![forbid(unsafe_code)]

//! Core: drawer geometry, progress math, and the settle spring.
//!
//! # Role in multidrawer
//! `mdrawer-core` is the pure layer. Nothing here holds drawer state; every
//! function maps inputs to outputs so the engine and any host renderer agree
//! on the same numbers.
//!
//! # Primary responsibilities
//! - **Edge / EdgeMap**: the four drawer positions and a fixed-size map over them.
//! - **Progress**: pointer translation → normalized openness, and openness →
//!   container transform.
//! - **Layout**: panel sizes and resting anchors for each layout mode.
//! - **Spring**: the damped oscillator behind settle animations.
//! - **Event**: the host-facing pointer/resize/measure vocabulary.
//!
//! # How it fits in the system
//! `mdrawer-engine` owns drawer state and calls into this crate for every
//! geometric decision. Renderers that run on their own thread can depend on
//! this crate alone to turn a progress value into a transform.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod progress;

pub use geometry::{Edge, EdgeMap, Point, Rect, Size, Transform, Translation};
pub use layout::{LayoutMode, OVERSIZED_EXTENT, StaticAnchor, VISIBLE_EXTENT};
