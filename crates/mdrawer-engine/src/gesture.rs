#![forbid(unsafe_code)]

//! Pointer capture adapter: routes raw pointer events into coordinator drags.
//!
//! [`GestureAdapter`] owns the "which drag does this pointer drive" decision.
//! A pointer-down on the measured panel of an open drawer starts a close
//! drag on that drawer (topmost first); anywhere else it tries the primary
//! opening drag through the edge hitboxes.
//!
//! # Invariants
//!
//! 1. Every [`InteractionHooks::drag_began`] is matched by exactly one
//!    [`InteractionHooks::drag_finished`] for the same edge.
//! 2. At most one route is live. While a primary drag is live a second
//!    `Down` is refused and the drag keeps the active-drawer lock; a second
//!    `Down` during a close drag cancels that close drag first.
//! 3. A refused `Down` leaves coordinator state and hooks untouched.
//!
//! # Failure Modes
//!
//! - `End { success: false }` and `Cancel` restore the pre-gesture state
//!   instead of snapping.
//! - Pointer events arriving with no live route are ignored.

use mdrawer_core::Edge;
use mdrawer_core::event::PointerEvent;

use crate::coordinator::Coordinator;
use crate::error::DragRefusal;
use crate::settle::SettleDriver;

/// Host callbacks around a live drag.
///
/// Web hosts use these to suppress text selection while dragging.
pub trait InteractionHooks {
    fn drag_began(&mut self, _edge: Edge) {}
    fn drag_finished(&mut self, _edge: Edge) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl InteractionHooks for NoHooks {}

/// Which drag a live pointer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Opening drag from an edge hitbox.
    Primary(Edge),
    /// Close drag on an open drawer's panel.
    Close(Edge),
}

impl Route {
    #[must_use]
    pub fn edge(self) -> Edge {
        match self {
            Self::Primary(edge) | Self::Close(edge) => edge,
        }
    }
}

/// Result of feeding one pointer event to the adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// No live route; the event was dropped.
    Ignored,
    /// The pointer-down could not start a drag.
    Refused(DragRefusal),
    Began(Route),
    /// `progress` is `None` when the movement was below the noise floor.
    Moved {
        route: Route,
        progress: Option<f64>,
    },
    /// Released and snapped toward `target`.
    Committed { route: Route, target: f64 },
    /// Failed or cancelled; state restored.
    Cancelled(Route),
}

/// Stateful pointer router.
#[derive(Debug, Clone, Default)]
pub struct GestureAdapter {
    route: Option<Route>,
}

impl GestureAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The live route, if a drag is in progress.
    #[must_use]
    pub fn route(&self) -> Option<Route> {
        self.route
    }

    /// Feed one pointer event.
    pub fn process<S, H>(
        &mut self,
        coordinator: &mut Coordinator<S>,
        hooks: &mut H,
        event: PointerEvent,
    ) -> GestureOutcome
    where
        S: SettleDriver,
        H: InteractionHooks + ?Sized,
    {
        match event {
            PointerEvent::Down { position } => {
                if let Some(Route::Primary(edge)) = self.route
                    && coordinator.active_drawer() == Some(edge)
                {
                    // The coordinator refuses (and logs) while the lock is held.
                    let refusal = coordinator
                        .begin_drag(position)
                        .err()
                        .unwrap_or(DragRefusal::AnotherDrawerActive(edge));
                    return GestureOutcome::Refused(refusal);
                }
                self.reset(coordinator, hooks);

                let route = match coordinator.open_drawer_at(position) {
                    Some(edge) => coordinator
                        .begin_close_drag(edge)
                        .map(|()| Route::Close(edge)),
                    None => coordinator.begin_drag(position).map(Route::Primary),
                };
                match route {
                    Ok(route) => {
                        self.route = Some(route);
                        hooks.drag_began(route.edge());
                        GestureOutcome::Began(route)
                    }
                    Err(refusal) => GestureOutcome::Refused(refusal),
                }
            }
            PointerEvent::Move { translation } => {
                let Some(route) = self.route else {
                    return GestureOutcome::Ignored;
                };
                let progress = match route {
                    Route::Primary(_) => coordinator.drag_to(translation),
                    Route::Close(edge) => coordinator.close_drag_to(edge, translation),
                };
                GestureOutcome::Moved { route, progress }
            }
            PointerEvent::End {
                translation,
                success: true,
            } => {
                let Some(route) = self.route.take() else {
                    return GestureOutcome::Ignored;
                };
                let target = match route {
                    Route::Primary(_) => coordinator.end_drag(translation),
                    Route::Close(edge) => coordinator.end_close_drag(edge, translation),
                };
                hooks.drag_finished(route.edge());
                match target {
                    Some(target) => GestureOutcome::Committed { route, target },
                    // The drawer was unmounted or taken over mid-drag.
                    None => GestureOutcome::Cancelled(route),
                }
            }
            PointerEvent::End { success: false, .. } | PointerEvent::Cancel => {
                match self.reset(coordinator, hooks) {
                    Some(route) => GestureOutcome::Cancelled(route),
                    None => GestureOutcome::Ignored,
                }
            }
        }
    }

    /// Cancel any live route, e.g. on focus loss. Returns the cancelled route.
    pub fn reset<S, H>(&mut self, coordinator: &mut Coordinator<S>, hooks: &mut H) -> Option<Route>
    where
        S: SettleDriver,
        H: InteractionHooks + ?Sized,
    {
        let route = self.route.take()?;
        match route {
            Route::Primary(_) => {
                coordinator.cancel_drag();
            }
            Route::Close(edge) => {
                coordinator.cancel_close_drag(edge);
            }
        }
        hooks.drag_finished(route.edge());
        Some(route)
    }
}
