#![forbid(unsafe_code)]

//! Event-loop glue for hosts that want a single entry point.
//!
//! [`DrawerRuntime`] bundles a [`Coordinator`], a [`GestureAdapter`] and the
//! host's [`InteractionHooks`]. Hosts feed it canonical [`Event`]s as they
//! arrive and call [`tick`](DrawerRuntime::tick) once per frame, then draw the
//! returned [`DrawerFrame`]s.
//!
//! ```rust,ignore
//! let mut runtime = DrawerRuntime::new(Coordinator::from_policy(&policy, screen)?);
//! loop {
//!     for event in host.drain_events() {
//!         runtime.handle(event);
//!     }
//!     for frame in runtime.tick(frame_time) {
//!         host.draw(frame);
//!     }
//! }
//! ```

use std::time::Duration;

use tracing::trace;

use mdrawer_core::event::Event;

use crate::coordinator::{Coordinator, DrawerFrame};
use crate::gesture::{GestureAdapter, GestureOutcome, InteractionHooks, NoHooks};
use crate::settle::{SettleDriver, SpringSettler};

/// Coordinator plus pointer routing, driven by host events.
#[derive(Debug)]
pub struct DrawerRuntime<S: SettleDriver = SpringSettler, H: InteractionHooks = NoHooks> {
    coordinator: Coordinator<S>,
    gestures: GestureAdapter,
    hooks: H,
}

impl<S: SettleDriver> DrawerRuntime<S, NoHooks> {
    #[must_use]
    pub fn new(coordinator: Coordinator<S>) -> Self {
        Self::with_hooks(coordinator, NoHooks)
    }
}

impl<S: SettleDriver, H: InteractionHooks> DrawerRuntime<S, H> {
    #[must_use]
    pub fn with_hooks(coordinator: Coordinator<S>, hooks: H) -> Self {
        Self {
            coordinator,
            gestures: GestureAdapter::new(),
            hooks,
        }
    }

    /// Apply one host event. Pointer events return the gesture outcome.
    pub fn handle(&mut self, event: Event) -> Option<GestureOutcome> {
        match event {
            Event::Pointer(pointer) => Some(self.gestures.process(
                &mut self.coordinator,
                &mut self.hooks,
                pointer,
            )),
            Event::Resize(size) => {
                self.coordinator.set_screen_size(size);
                None
            }
            Event::Measured { edge, bounds } => {
                self.coordinator.update_bounds(edge, bounds);
                None
            }
        }
    }

    /// Advance settle animations by `dt` and return this frame's render data.
    pub fn tick(&mut self, dt: Duration) -> Vec<DrawerFrame> {
        let applied = self.coordinator.advance(dt);
        if applied > 0 {
            trace!(applied, "settle reports applied");
        }
        self.coordinator.frames()
    }

    /// Cancel any live drag, e.g. when the host loses focus.
    pub fn cancel_interaction(&mut self) {
        self.gestures.reset(&mut self.coordinator, &mut self.hooks);
    }

    #[must_use]
    pub fn coordinator(&self) -> &Coordinator<S> {
        &self.coordinator
    }

    /// Mutable access for imperative commands (`open`, `close_animated`, ...).
    pub fn coordinator_mut(&mut self) -> &mut Coordinator<S> {
        &mut self.coordinator
    }

    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    #[must_use]
    pub fn gestures(&self) -> &GestureAdapter {
        &self.gestures
    }

    /// Tear down, returning the coordinator and hooks.
    pub fn into_parts(self) -> (Coordinator<S>, H) {
        (self.coordinator, self.hooks)
    }
}
