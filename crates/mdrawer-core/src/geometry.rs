#![forbid(unsafe_code)]

//! Geometric primitives and the edge vocabulary.
//!
//! All coordinates are logical units with the origin at the top-left corner
//! of the host surface. Values are `f64` because pointer translations and
//! spring-driven progress are continuous.

use std::fmt;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Screen edge a drawer is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// Every edge in canonical order.
    ///
    /// This order is also the hit-test tie-break order: when two hitboxes
    /// overlap (screen corners), the edge listed first wins.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    #[inline]
    const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Whether the drawer slides along the x axis.
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The edge across the screen.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Lowercase name, used in logs and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-size map keyed by [`Edge`].
///
/// Replaces four parallel named fields; every edge always has a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeMap<T> {
    slots: [T; 4],
}

impl<T> EdgeMap<T> {
    /// Build a map by evaluating `f` for every edge in canonical order.
    pub fn from_fn(mut f: impl FnMut(Edge) -> T) -> Self {
        Self {
            slots: Edge::ALL.map(&mut f),
        }
    }

    /// Iterate `(edge, &value)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, &T)> + '_ {
        Edge::ALL.into_iter().zip(self.slots.iter())
    }

    /// Iterate `(edge, &mut value)` in canonical order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Edge, &mut T)> + '_ {
        Edge::ALL.into_iter().zip(self.slots.iter_mut())
    }

    /// Map every slot into a new map.
    pub fn map<U>(self, mut f: impl FnMut(Edge, T) -> U) -> EdgeMap<U> {
        let [top, right, bottom, left] = self.slots;
        EdgeMap {
            slots: [
                f(Edge::Top, top),
                f(Edge::Right, right),
                f(Edge::Bottom, bottom),
                f(Edge::Left, left),
            ],
        }
    }
}

impl<T> Index<Edge> for EdgeMap<T> {
    type Output = T;

    #[inline]
    fn index(&self, edge: Edge) -> &T {
        &self.slots[edge.index()]
    }
}

impl<T> IndexMut<Edge> for EdgeMap<T> {
    #[inline]
    fn index_mut(&mut self, edge: Edge) -> &mut T {
        &mut self.slots[edge.index()]
    }
}

/// A pointer position in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Accumulated pointer translation since the gesture began.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation {
    pub dx: f64,
    pub dy: f64,
}

impl Translation {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Whether either component moved further than `epsilon`.
    #[inline]
    #[must_use]
    pub fn exceeds(self, epsilon: f64) -> bool {
        self.dx.abs() > epsilon || self.dy.abs() > epsilon
    }
}

impl From<(f64, f64)> for Translation {
    fn from((dx, dy): (f64, f64)) -> Self {
        Self { dx, dy }
    }
}

/// Width/height pair for screens and panels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A measured layout rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Two-axis translation applied to a drawer container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    #[must_use]
    pub const fn new(translate_x: f64, translate_y: f64) -> Self {
        Self {
            translate_x,
            translate_y,
        }
    }
}
