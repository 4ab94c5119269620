#![forbid(unsafe_code)]

//! Canonical host events.
//!
//! A host adapter (touch, mouse, or a test script) converts whatever its
//! platform reports into these types. Pointer events follow the capture
//! primitive contract: a down with coordinates, a stream of translations
//! measured from the down position, and an end carrying the final translation
//! and whether the recognizer considered the gesture successful.
//!
//! # Invariants
//!
//! 1. Every `Down` is followed by zero or more `Move` and exactly one `End`
//!    or `Cancel` before the next `Down`. Adapters tolerate violations: a
//!    second `Down` never steals a live primary drag.
//! 2. Translations are cumulative, never per-frame deltas.

use crate::geometry::{Edge, Point, Rect, Size, Translation};

/// Single-pointer capture event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer touched down at `position`.
    Down { position: Point },
    /// Pointer moved; `translation` is measured from the down position.
    Move { translation: Translation },
    /// Pointer released.
    ///
    /// `success == false` means the recognizer failed (ambiguous multi-touch,
    /// another gesture won) and the drag must not commit.
    End {
        translation: Translation,
        success: bool,
    },
    /// The platform cancelled the gesture.
    Cancel,
}

impl PointerEvent {
    #[must_use]
    pub fn down(x: f64, y: f64) -> Self {
        Self::Down {
            position: Point::new(x, y),
        }
    }

    #[must_use]
    pub fn moved(dx: f64, dy: f64) -> Self {
        Self::Move {
            translation: Translation::new(dx, dy),
        }
    }

    #[must_use]
    pub fn released(dx: f64, dy: f64) -> Self {
        Self::End {
            translation: Translation::new(dx, dy),
            success: true,
        }
    }

    #[must_use]
    pub fn failed(dx: f64, dy: f64) -> Self {
        Self::End {
            translation: Translation::new(dx, dy),
            success: false,
        }
    }
}

/// Everything a host can report to the drawer runtime besides commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Pointer(PointerEvent),
    /// Screen or window was resized.
    Resize(Size),
    /// The renderer measured a drawer panel.
    Measured { edge: Edge, bounds: Rect },
}

impl From<PointerEvent> for Event {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}
