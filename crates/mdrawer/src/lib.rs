#![forbid(unsafe_code)]

//! multidrawer public facade crate.
//!
//! Up to four drawers (top, right, bottom, left) slide in from the screen
//! edges, driven by pointer drags or commands, stacked by the order they
//! were opened, and settled by springs. This crate re-exports the stable
//! surface of `mdrawer-core` and `mdrawer-engine` and offers a prelude.
//!
//! ```rust,ignore
//! use mdrawer::prelude::*;
//!
//! let mut drawers = Coordinator::new(Size::new(375.0, 812.0));
//! drawers.mount(Edge::Left, DrawerConfig::default())?;
//! drawers.open_animated(Edge::Left);
//! drawers.advance(frame_time);
//! let frame = drawers.frame(Edge::Left);
//! ```

pub mod error;
#[cfg(feature = "logging")]
pub mod logging;

// --- Core re-exports -------------------------------------------------------

pub use mdrawer_core::event::{Event, PointerEvent};
pub use mdrawer_core::layout::{UnknownLayoutMode, layout_dimensions, static_anchor};
pub use mdrawer_core::progress::{
    close_progress_from_translation, hit_test, panel_rect, progress_from_translation,
    transform_for_progress,
};
pub use mdrawer_core::{
    Edge, EdgeMap, LayoutMode, Point, Rect, Size, StaticAnchor, Transform, Translation,
};

// --- Engine re-exports -----------------------------------------------------

#[cfg(feature = "policy-config")]
pub use mdrawer_engine::ConfigError;
pub use mdrawer_engine::{
    Authority, Coordinator, DragRefusal, DrawerConfig, DrawerFrame, DrawerHandle,
    DrawerOverrides, DrawerPolicy, DrawerRuntime, EdgePolicy, EngineError, ExternalSettler,
    GestureAdapter, GestureOutcome, InteractionHooks, NoHooks, Route, SettleDriver, SettleEvent,
    SettleRequest, SettleTicket, SpringSettler,
};

// --- Errors ---------------------------------------------------------------

pub use error::{Error, Result};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Authority, Coordinator, DrawerConfig, DrawerFrame, DrawerPolicy, DrawerRuntime, Edge,
        Error, Event, LayoutMode, Point, PointerEvent, Rect, Result, Size, Transform, Translation,
    };

    pub use crate::{core, engine};
}

pub use mdrawer_core as core;
pub use mdrawer_engine as engine;
