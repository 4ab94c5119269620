#![forbid(unsafe_code)]

//! Drawer engine: state, coordination, and gesture routing for edge drawers.
//!
//! # Key Components
//!
//! - [`Coordinator`] - Owns every drawer on a screen: mounts, open order,
//!   drag lock, snapping and settle bookkeeping
//! - [`GestureAdapter`] - Routes pointer capture events into opening or
//!   closing drags
//! - [`SettleDriver`] - Seam for settle animators; [`SpringSettler`] steps
//!   springs in-process, [`ExternalSettler`] hands them to the host
//! - [`DrawerHandle`] - Lock-free progress reader for render threads
//! - [`DrawerPolicy`] - Policy-as-data configuration, loadable from TOML/JSON
//!   with the `policy-config` feature
//! - [`DrawerRuntime`] - Event-loop glue bundling the pieces above
//!
//! # Role in multidrawer
//! `mdrawer-engine` is the stateful layer between host input and rendering.
//! It calls `mdrawer-core` for every geometric decision and reports state
//! transitions through `tracing`.

pub mod authority;
pub mod config;
pub mod coordinator;
mod drawer;
pub mod error;
pub mod gesture;
pub mod registry;
pub mod runtime;
pub mod settle;

pub use authority::{Authority, DrawerHandle, EdgeCell};
#[cfg(feature = "policy-config")]
pub use config::ConfigError;
pub use config::{DrawerConfig, DrawerOverrides, DrawerPolicy, EdgePolicy};
pub use coordinator::{Coordinator, DrawerFrame};
pub use drawer::GestureKind;
pub use error::{DragRefusal, EngineError};
pub use gesture::{GestureAdapter, GestureOutcome, InteractionHooks, NoHooks, Route};
pub use registry::DrawerRegistry;
pub use runtime::DrawerRuntime;
pub use settle::{
    ExternalSettler, SettleDriver, SettleEvent, SettleRequest, SettleTicket, SpringSettler,
};
