#![forbid(unsafe_code)]

//! Pointer → progress math and progress → transform mapping.
//!
//! Progress is a normalized openness in `[0.0, 1.0]`: `0.0` fully hidden,
//! `1.0` revealing exactly [`VISIBLE_EXTENT`]. Every function here is pure.
//!
//! # Sign conventions
//!
//! | edge   | opens on    | closes on   |
//! |--------|-------------|-------------|
//! | left   | `+dx`       | `-dx`       |
//! | right  | `-dx`       | `+dx`       |
//! | top    | `+dy`       | `-dy`       |
//! | bottom | `-dy`       | `+dy`       |
//!
//! # Invariants
//!
//! 1. Both progress functions return values in `[0.0, 1.0]` for any finite
//!    input; NaN translations map to `0.0`.
//! 2. [`transform_for_progress`] depends on nothing but `edge` and progress.
//! 3. [`panel_rect`] is the resting panel moved by that same transform.

use crate::geometry::{Edge, Point, Rect, Size, Transform, Translation};
use crate::layout::{LayoutMode, OVERSIZED_EXTENT, VISIBLE_EXTENT, layout_dimensions, static_anchor};

/// Default hitbox thickness along a screen edge.
pub const DEFAULT_HITBOX: f64 = 50.0;

/// Translation components at or below this magnitude count as "no movement".
pub const MOVEMENT_EPSILON: f64 = 0.1;

const INV_VISIBLE_EXTENT: f64 = 1.0 / VISIBLE_EXTENT;

/// Whether `point` lies within `hitbox` units of `edge` on `screen`.
#[must_use]
pub fn hit_test(point: Point, edge: Edge, hitbox: f64, screen: Size) -> bool {
    match edge {
        Edge::Left => point.x <= hitbox,
        Edge::Right => point.x >= screen.width - hitbox,
        Edge::Top => point.y <= hitbox,
        Edge::Bottom => point.y >= screen.height - hitbox,
    }
}

/// Signed delta along `edge`'s opening direction.
#[inline]
fn opening_delta(translation: Translation, edge: Edge) -> f64 {
    match edge {
        Edge::Left => translation.dx,
        Edge::Right => -translation.dx,
        Edge::Top => translation.dy,
        Edge::Bottom => -translation.dy,
    }
}

#[inline]
fn normalize(delta: f64) -> f64 {
    // `max` discards NaN, so a NaN delta yields 0.
    (delta.max(0.0) * INV_VISIBLE_EXTENT).min(1.0)
}

/// Opening progress produced by dragging `translation` from `edge`.
#[must_use]
pub fn progress_from_translation(translation: Translation, edge: Edge) -> f64 {
    normalize(opening_delta(translation, edge))
}

/// Closing progress produced by dragging an open drawer by `translation`.
///
/// `0.0` means no closing movement; `1.0` means the full visible extent was
/// dragged back toward the edge.
#[must_use]
pub fn close_progress_from_translation(translation: Translation, edge: Edge) -> f64 {
    normalize(-opening_delta(translation, edge))
}

/// Container transform for a drawer at `progress`.
///
/// Translation magnitude is `−OVERSIZED + VISIBLE × progress`, pointing away
/// from the drawer's edge for left/top and toward it for right/bottom.
#[must_use]
pub fn transform_for_progress(edge: Edge, progress: f64) -> Transform {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let offset = -OVERSIZED_EXTENT + VISIBLE_EXTENT * progress;
    match edge {
        Edge::Left => Transform {
            translate_x: offset,
            translate_y: 0.0,
        },
        Edge::Right => Transform {
            translate_x: -offset,
            translate_y: 0.0,
        },
        Edge::Top => Transform {
            translate_x: 0.0,
            translate_y: offset,
        },
        Edge::Bottom => Transform {
            translate_x: 0.0,
            translate_y: -offset,
        },
    }
}

/// Screen rectangle covered by `edge`'s panel at `progress`.
///
/// Hosts that never report measured bounds still need to know where an open
/// panel sits; this derives it from the layout table and the transform. Part
/// of the rectangle lies off-screen.
#[must_use]
pub fn panel_rect(edge: Edge, mode: LayoutMode, screen: Size, progress: f64) -> Rect {
    let size = layout_dimensions(edge, mode, screen);
    let anchor = static_anchor(edge, mode, screen);
    let shift = transform_for_progress(edge, progress);
    let (x, y) = match edge {
        Edge::Left => (anchor.edge_offset, anchor.cross_offset),
        Edge::Right => (screen.width - anchor.edge_offset - size.width, anchor.cross_offset),
        Edge::Top => (anchor.cross_offset, anchor.edge_offset),
        Edge::Bottom => (anchor.cross_offset, screen.height - anchor.edge_offset - size.height),
    };
    Rect::new(
        x + shift.translate_x,
        y + shift.translate_y,
        size.width,
        size.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: Size = Size::new(375.0, 812.0);

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn progress_clamps_at_both_ends() {
        assert_eq!(progress_from_translation(Translation::new(500.0, 0.0), Edge::Left), 1.0);
        assert_eq!(progress_from_translation(Translation::new(-500.0, 0.0), Edge::Left), 0.0);
    }

    #[test]
    fn opposite_edges_mirror_each_other() {
        assert!(approx(
            progress_from_translation(Translation::new(120.0, 0.0), Edge::Left),
            0.5
        ));
        assert!(approx(
            progress_from_translation(Translation::new(-120.0, 0.0), Edge::Right),
            0.5
        ));
        assert!(approx(
            progress_from_translation(Translation::new(0.0, 120.0), Edge::Top),
            0.5
        ));
        assert!(approx(
            progress_from_translation(Translation::new(0.0, -120.0), Edge::Bottom),
            0.5
        ));
    }

    #[test]
    fn cross_axis_movement_is_ignored() {
        let t = Translation::new(0.0, 200.0);
        assert_eq!(progress_from_translation(t, Edge::Left), 0.0);
        assert_eq!(progress_from_translation(t, Edge::Right), 0.0);
    }

    #[test]
    fn close_progress_uses_reverse_direction() {
        assert!(approx(
            close_progress_from_translation(Translation::new(-60.0, 0.0), Edge::Left),
            0.25
        ));
        assert_eq!(
            close_progress_from_translation(Translation::new(60.0, 0.0), Edge::Left),
            0.0
        );
        assert!(approx(
            close_progress_from_translation(Translation::new(180.0, 0.0), Edge::Right),
            0.75
        ));
        assert!(approx(
            close_progress_from_translation(Translation::new(0.0, -240.0), Edge::Top),
            1.0
        ));
        assert_eq!(
            close_progress_from_translation(Translation::new(0.0, 900.0), Edge::Bottom),
            1.0
        );
    }

    #[test]
    fn nan_translation_is_closed() {
        let t = Translation::new(f64::NAN, f64::NAN);
        for edge in Edge::ALL {
            assert_eq!(progress_from_translation(t, edge), 0.0);
            assert_eq!(close_progress_from_translation(t, edge), 0.0);
        }
    }

    #[test]
    fn hit_test_boundaries() {
        assert!(hit_test(Point::new(25.0, 400.0), Edge::Left, 50.0, PHONE));
        assert!(!hit_test(Point::new(75.0, 400.0), Edge::Left, 50.0, PHONE));
        assert!(hit_test(Point::new(350.0, 400.0), Edge::Right, 50.0, PHONE));
        assert!(!hit_test(Point::new(300.0, 400.0), Edge::Right, 50.0, PHONE));
        assert!(hit_test(Point::new(200.0, 25.0), Edge::Top, 50.0, PHONE));
        assert!(!hit_test(Point::new(200.0, 75.0), Edge::Top, 50.0, PHONE));
        assert!(hit_test(Point::new(200.0, 780.0), Edge::Bottom, 50.0, PHONE));
        assert!(!hit_test(Point::new(200.0, 700.0), Edge::Bottom, 50.0, PHONE));
    }

    #[test]
    fn hit_test_is_inclusive_at_the_boundary() {
        assert!(hit_test(Point::new(50.0, 0.0), Edge::Left, 50.0, PHONE));
        assert!(hit_test(Point::new(325.0, 0.0), Edge::Right, 50.0, PHONE));
    }

    #[test]
    fn transform_endpoints() {
        let closed = transform_for_progress(Edge::Left, 0.0);
        let open = transform_for_progress(Edge::Left, 1.0);
        assert_eq!(closed.translate_x, -480.0);
        assert_eq!(open.translate_x, -240.0);

        assert_eq!(transform_for_progress(Edge::Right, 0.0).translate_x, 480.0);
        assert_eq!(transform_for_progress(Edge::Right, 1.0).translate_x, 240.0);
        assert_eq!(transform_for_progress(Edge::Top, 0.5).translate_y, -360.0);
        assert_eq!(transform_for_progress(Edge::Bottom, 0.5).translate_y, 360.0);
        assert_eq!(transform_for_progress(Edge::Bottom, 0.5).translate_x, 0.0);
    }

    #[test]
    fn transform_clamps_progress() {
        assert_eq!(
            transform_for_progress(Edge::Top, 3.0),
            transform_for_progress(Edge::Top, 1.0)
        );
        assert_eq!(
            transform_for_progress(Edge::Top, -1.0),
            transform_for_progress(Edge::Top, 0.0)
        );
    }

    #[test]
    fn open_panel_covers_visible_strip() {
        let left = panel_rect(Edge::Left, LayoutMode::Fullscreen, PHONE, 1.0);
        assert_eq!(left, Rect::new(-240.0, 0.0, 480.0, 812.0));
        assert!(left.contains(Point::new(100.0, 400.0)));
        assert!(!left.contains(Point::new(240.0, 400.0)));

        let right = panel_rect(Edge::Right, LayoutMode::Fullscreen, PHONE, 1.0);
        assert_eq!(right.x, 375.0 - 240.0);
        assert!(right.contains(Point::new(300.0, 400.0)));

        let bottom = panel_rect(Edge::Bottom, LayoutMode::CornerAware, PHONE, 1.0);
        assert_eq!(bottom, Rect::new(240.0, 812.0 - 240.0, 0.0, 480.0));
    }

    #[test]
    fn closed_panel_is_off_screen() {
        for edge in Edge::ALL {
            let rect = panel_rect(edge, LayoutMode::Fullscreen, PHONE, 0.0);
            let screen = Rect::new(0.0, 0.0, PHONE.width, PHONE.height);
            let overlaps = rect.x < screen.right()
                && rect.right() > screen.x
                && rect.y < screen.bottom()
                && rect.bottom() > screen.y;
            assert!(!overlaps, "{edge} panel visible at progress 0: {rect:?}");
        }
    }
}
