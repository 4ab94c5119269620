#![forbid(unsafe_code)]

//! Drawer panel sizing and resting placement per layout mode.
//!
//! Panels are oversized: each is [`OVERSIZED_EXTENT`] deep along its sliding
//! axis but only [`VISIBLE_EXTENT`] of it is ever revealed. The hidden margin
//! keeps the panel edge off-screen when a spring overshoots past "open".
//!
//! # Layout table
//!
//! `W`/`H` are the screen size, `T` = [`VISIBLE_EXTENT`], `O` =
//! [`OVERSIZED_EXTENT`].
//!
//! | mode                   | left/right     | top/bottom     |
//! |------------------------|----------------|----------------|
//! | `Fullscreen`           | `O × H`        | `W × O`        |
//! | `SidebarLayout`        | `O × H`        | `(W − 2T) × O` |
//! | `HeaderFooterLayout`   | `O × (H − 2T)` | `W × O`        |
//! | `CornerAware`          | `O × (H − 2T)` | `(W − 2T) × O` |
//!
//! # Invariants
//!
//! 1. Returned sizes are never negative; screens narrower than `2T` collapse
//!    the inset extent to zero.
//! 2. The sliding-axis extent is always `O`, independent of the screen.

use std::fmt;
use std::str::FromStr;

use crate::geometry::{Edge, Size};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Depth of a drawer that is revealed when fully open.
pub const VISIBLE_EXTENT: f64 = 240.0;

/// Total depth of a drawer panel along its sliding axis.
pub const OVERSIZED_EXTENT: f64 = 480.0;

/// How the four drawers share the screen corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LayoutMode {
    /// Every drawer spans the full screen cross extent.
    #[default]
    Fullscreen,
    /// Left/right span full height; top/bottom fit between them.
    SidebarLayout,
    /// Top/bottom span full width; left/right fit between them.
    HeaderFooterLayout,
    /// All drawers are inset so no two share a corner.
    CornerAware,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 4] = [
        LayoutMode::Fullscreen,
        LayoutMode::SidebarLayout,
        LayoutMode::HeaderFooterLayout,
        LayoutMode::CornerAware,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fullscreen => "fullscreen",
            Self::SidebarLayout => "sidebar-layout",
            Self::HeaderFooterLayout => "header-footer-layout",
            Self::CornerAware => "corner-aware",
        }
    }

    /// Whether top/bottom drawers are narrowed to leave room for the sides.
    const fn insets_horizontal_drawers(self) -> bool {
        matches!(self, Self::SidebarLayout | Self::CornerAware)
    }

    /// Whether left/right drawers are shortened to leave room for top/bottom.
    const fn insets_vertical_drawers(self) -> bool {
        matches!(self, Self::HeaderFooterLayout | Self::CornerAware)
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown layout name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLayoutMode(pub String);

impl fmt::Display for UnknownLayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown drawer layout mode `{}`", self.0)
    }
}

impl std::error::Error for UnknownLayoutMode {}

impl FromStr for LayoutMode {
    type Err = UnknownLayoutMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownLayoutMode(s.to_owned()))
    }
}

/// Resting placement of a closed drawer container.
///
/// `edge_offset` is the distance from the drawer's own screen edge (always
/// zero for the built-in modes); `cross_offset` is measured from the top for
/// left/right drawers and from the left for top/bottom drawers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticAnchor {
    pub edge_offset: f64,
    pub cross_offset: f64,
}

/// Panel size for `edge` under `mode` on a screen of `screen` size.
#[must_use]
pub fn layout_dimensions(edge: Edge, mode: LayoutMode, screen: Size) -> Size {
    let inset = 2.0 * VISIBLE_EXTENT;
    if edge.is_horizontal() {
        let height = if mode.insets_vertical_drawers() {
            screen.height - inset
        } else {
            screen.height
        };
        Size::new(OVERSIZED_EXTENT, height.max(0.0))
    } else {
        let width = if mode.insets_horizontal_drawers() {
            screen.width - inset
        } else {
            screen.width
        };
        Size::new(width.max(0.0), OVERSIZED_EXTENT)
    }
}

/// Resting anchor for `edge` under `mode`.
#[must_use]
pub fn static_anchor(edge: Edge, mode: LayoutMode, screen: Size) -> StaticAnchor {
    let cross_offset = match mode {
        LayoutMode::Fullscreen => {
            let dims = layout_dimensions(edge, mode, screen);
            let (extent, available) = if edge.is_horizontal() {
                (dims.height, screen.height)
            } else {
                (dims.width, screen.width)
            };
            if extent < available {
                (available - extent) / 2.0
            } else {
                0.0
            }
        }
        LayoutMode::SidebarLayout => {
            if edge.is_horizontal() {
                0.0
            } else {
                VISIBLE_EXTENT
            }
        }
        LayoutMode::HeaderFooterLayout => {
            if edge.is_horizontal() {
                VISIBLE_EXTENT
            } else {
                0.0
            }
        }
        LayoutMode::CornerAware => VISIBLE_EXTENT,
    };

    StaticAnchor {
        edge_offset: 0.0,
        cross_offset,
    }
}
