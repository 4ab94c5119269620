#![forbid(unsafe_code)]

//! Drawer coordinator: the single owner of all drawer state.
//!
//! The coordinator combines the registry of mounted edges, one state
//! machine per edge, the open order that drives stacking, the
//! primary-drag lock, measured bounds, and the settle driver. Hosts call it
//! from one logical thread; render threads read through [`DrawerHandle`]s.
//!
//! # Invariants
//!
//! 1. At most one edge is the active (primary-drag) drawer.
//! 2. The open order holds each edge at most once; its last entry is on top.
//! 3. `is_open` flips when a settle starts, not when it finishes. A closing
//!    edge leaves the open order only once its settle completes.
//! 4. Operations naming an unmounted edge do nothing and return
//!    `None`/`false`.
//!
//! # Failure Modes
//!
//! - Drag starts that cannot proceed return a [`DragRefusal`] and change
//!   nothing.
//! - Settle reports with a superseded ticket are ignored.

use std::time::Duration;

use tracing::{debug, trace};

use mdrawer_core::animation::SpringParams;
use mdrawer_core::layout::{layout_dimensions, static_anchor};
use mdrawer_core::progress::{
    MOVEMENT_EPSILON, close_progress_from_translation, hit_test, panel_rect,
    progress_from_translation, transform_for_progress,
};
use mdrawer_core::{
    Edge, EdgeMap, LayoutMode, Point, Rect, Size, StaticAnchor, Transform, Translation,
};

use crate::authority::{Authority, DrawerHandle};
use crate::config::{DEFAULT_BASE_Z_INDEX, DrawerConfig, DrawerPolicy};
use crate::drawer::{DrawerMachine, GestureKind};
use crate::error::{DragRefusal, EngineError};
use crate::registry::DrawerRegistry;
use crate::settle::{SettleDriver, SettleEvent, SettleRequest, SettleTicket, SpringSettler};

/// Everything a renderer needs to draw one edge for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerFrame {
    pub edge: Edge,
    pub transform: Transform,
    pub z_index: i32,
    pub size: Size,
    pub anchor: StaticAnchor,
    pub is_open: bool,
    pub progress: f64,
    pub authority: Authority,
}

/// Owns and sequences every drawer on one screen.
#[derive(Debug)]
pub struct Coordinator<S: SettleDriver = SpringSettler> {
    registry: DrawerRegistry,
    drawers: EdgeMap<DrawerMachine>,
    active: Option<Edge>,
    translation: Translation,
    open_order: Vec<Edge>,
    bounds: EdgeMap<Option<Rect>>,
    screen: Size,
    layout: LayoutMode,
    base_z_index: i32,
    next_ticket: u64,
    driver: S,
}

impl Coordinator<SpringSettler> {
    /// Coordinator with the default spring settler.
    #[must_use]
    pub fn new(screen: Size) -> Self {
        Self::with_driver(screen, SpringSettler::new())
    }

    /// Coordinator configured and mounted from a policy.
    pub fn from_policy(policy: &DrawerPolicy, screen: Size) -> Result<Self, EngineError> {
        let driver = SpringSettler::new().with_rest_threshold(policy.rest_threshold);
        let mut coordinator = Self::with_driver(screen, driver);
        coordinator.apply_policy(policy)?;
        Ok(coordinator)
    }
}

impl<S: SettleDriver> Coordinator<S> {
    /// Coordinator using a custom settle driver.
    #[must_use]
    pub fn with_driver(screen: Size, driver: S) -> Self {
        Self {
            registry: DrawerRegistry::new(),
            drawers: EdgeMap::from_fn(DrawerMachine::new),
            active: None,
            translation: Translation::ZERO,
            open_order: Vec::with_capacity(Edge::ALL.len()),
            bounds: EdgeMap::default(),
            screen,
            layout: LayoutMode::default(),
            base_z_index: DEFAULT_BASE_Z_INDEX,
            next_ticket: 1,
            driver,
        }
    }

    /// Set the layout mode (builder pattern).
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    /// Set the base z-index (builder pattern).
    #[must_use]
    pub fn with_base_z_index(mut self, base: i32) -> Self {
        self.base_z_index = base;
        self
    }

    /// Apply a policy's layout and base z-index and mount its edges.
    ///
    /// Edges are validated before any is mounted, so a failing policy
    /// changes nothing.
    pub fn apply_policy(&mut self, policy: &DrawerPolicy) -> Result<(), EngineError> {
        let mounted = policy.mounted();
        for (edge, config) in mounted.iter() {
            if let Some(config) = config {
                config.validate(edge)?;
            }
        }
        self.layout = policy.layout;
        self.base_z_index = policy.base_z_index;
        for (edge, config) in mounted.iter() {
            if let Some(config) = config {
                self.mount(edge, *config)?;
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Mounting
    // ═══════════════════════════════════════════════════════════════════════

    /// Mount a drawer on `edge`, replacing any previous tuning.
    pub fn mount(&mut self, edge: Edge, config: DrawerConfig) -> Result<(), EngineError> {
        config.validate(edge)?;
        self.registry.register(edge, config);
        debug!(edge = %edge, hitbox = config.hitbox_size, "drawer mounted");
        Ok(())
    }

    /// Unmount `edge`.
    ///
    /// Any drag or settle on the edge is abandoned and the drawer closes
    /// immediately, so no authority is left stuck.
    pub fn unmount(&mut self, edge: Edge) -> Option<DrawerConfig> {
        let config = self.registry.unregister(edge)?;
        self.abandon_interaction(edge, 0.0);
        self.drawers[edge].set_committed(false);
        self.remove_from_order(edge);
        self.bounds[edge] = None;
        debug!(edge = %edge, "drawer unmounted");
        Some(config)
    }

    #[must_use]
    pub fn is_mounted(&self, edge: Edge) -> bool {
        self.registry.contains(edge)
    }

    #[must_use]
    pub fn config(&self, edge: Edge) -> Option<&DrawerConfig> {
        self.registry.lookup(edge)
    }

    #[must_use]
    pub fn registry(&self) -> &DrawerRegistry {
        &self.registry
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════════

    /// Committed open flag. Flips when a settle starts.
    #[must_use]
    pub fn is_open(&self, edge: Edge) -> bool {
        self.drawers[edge].is_open()
    }

    #[must_use]
    pub fn progress(&self, edge: Edge) -> f64 {
        self.drawers[edge].progress()
    }

    #[must_use]
    pub fn authority(&self, edge: Edge) -> Authority {
        self.drawers[edge].authority()
    }

    /// Edge currently owning the primary drag.
    #[must_use]
    pub fn active_drawer(&self) -> Option<Edge> {
        self.active
    }

    /// Latest translation of the primary drag, zero when none is active.
    #[must_use]
    pub fn drag_translation(&self) -> Translation {
        self.translation
    }

    /// Open order, topmost last.
    #[must_use]
    pub fn open_order(&self) -> &[Edge] {
        &self.open_order
    }

    /// Stacking index: base plus 1-based position in the open order.
    #[must_use]
    pub fn z_index_of(&self, edge: Edge) -> i32 {
        match self.open_order.iter().position(|&e| e == edge) {
            Some(index) => self.base_z_index + index as i32 + 1,
            None => self.base_z_index,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Size {
        self.screen
    }

    #[must_use]
    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    /// Panel size for `edge` under the current layout and screen.
    #[must_use]
    pub fn dimensions(&self, edge: Edge) -> Size {
        layout_dimensions(edge, self.layout, self.screen)
    }

    /// Resting anchor for `edge` under the current layout and screen.
    #[must_use]
    pub fn static_position(&self, edge: Edge) -> StaticAnchor {
        static_anchor(edge, self.layout, self.screen)
    }

    /// Last measured rectangle reported through [`update_bounds`](Self::update_bounds).
    #[must_use]
    pub fn bounds(&self, edge: Edge) -> Option<Rect> {
        self.bounds[edge]
    }

    /// Where `edge`'s panel sits: the measured rectangle, or the one derived
    /// from layout and progress when the host never measured it.
    #[must_use]
    pub fn panel_bounds(&self, edge: Edge) -> Rect {
        self.bounds[edge]
            .unwrap_or_else(|| panel_rect(edge, self.layout, self.screen, self.progress(edge)))
    }

    /// Render data for `edge`.
    #[must_use]
    pub fn frame(&self, edge: Edge) -> DrawerFrame {
        let progress = self.progress(edge);
        DrawerFrame {
            edge,
            transform: transform_for_progress(edge, progress),
            z_index: self.z_index_of(edge),
            size: self.dimensions(edge),
            anchor: self.static_position(edge),
            is_open: self.is_open(edge),
            progress,
            authority: self.authority(edge),
        }
    }

    /// Render data for every mounted edge, in canonical order.
    #[must_use]
    pub fn frames(&self) -> Vec<DrawerFrame> {
        self.registry
            .iter()
            .map(|(edge, _)| self.frame(edge))
            .collect()
    }

    /// Lock-free reader for a render thread.
    #[must_use]
    pub fn render_handle(&self, edge: Edge) -> DrawerHandle {
        DrawerHandle::new(edge, self.drawers[edge].cell())
    }

    #[must_use]
    pub fn driver(&self) -> &S {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut S {
        &mut self.driver
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Environment
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_screen_size(&mut self, screen: Size) {
        if self.screen != screen {
            trace!(width = screen.width, height = screen.height, "screen resized");
            self.screen = screen;
        }
    }

    pub fn set_layout(&mut self, layout: LayoutMode) {
        if self.layout != layout {
            debug!(layout = %layout, "layout changed");
            self.layout = layout;
        }
    }

    /// Record the measured rectangle of `edge`'s panel.
    pub fn update_bounds(&mut self, edge: Edge, bounds: Rect) {
        self.bounds[edge] = Some(bounds);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Hit testing
    // ═══════════════════════════════════════════════════════════════════════

    /// First mounted edge, in canonical order, whose hitbox contains `point`.
    #[must_use]
    pub fn find_edge_at(&self, point: Point) -> Option<Edge> {
        self.registry
            .iter()
            .find(|(edge, config)| hit_test(point, *edge, config.hitbox_size, self.screen))
            .map(|(edge, _)| edge)
    }

    /// Topmost open drawer whose panel contains `point`.
    #[must_use]
    pub fn open_drawer_at(&self, point: Point) -> Option<Edge> {
        self.open_order
            .iter()
            .rev()
            .copied()
            .find(|&edge| self.drawers[edge].is_open() && self.panel_bounds(edge).contains(point))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Commands
    // ═══════════════════════════════════════════════════════════════════════

    /// Open `edge` immediately, without animation.
    pub fn open(&mut self, edge: Edge) -> bool {
        if !self.is_mounted(edge) {
            debug!(edge = %edge, "open ignored: no drawer mounted");
            return false;
        }
        self.abandon_interaction(edge, 1.0);
        self.drawers[edge].set_committed(true);
        self.promote(edge);
        debug!(edge = %edge, "drawer opened");
        true
    }

    /// Close `edge` immediately, without animation.
    pub fn close(&mut self, edge: Edge) -> bool {
        if !self.is_mounted(edge) {
            debug!(edge = %edge, "close ignored: no drawer mounted");
            return false;
        }
        self.abandon_interaction(edge, 0.0);
        self.drawers[edge].set_committed(false);
        self.remove_from_order(edge);
        debug!(edge = %edge, "drawer closed");
        true
    }

    /// Animate `edge` open.
    pub fn open_animated(&mut self, edge: Edge) -> bool {
        self.settle_mounted(edge, 1.0).is_some()
    }

    /// Animate `edge` closed.
    pub fn close_animated(&mut self, edge: Edge) -> bool {
        self.settle_mounted(edge, 0.0).is_some()
    }

    /// Settle `edge` after an opening drag released at `observed` progress.
    ///
    /// Opens when `observed` is strictly above the open threshold. Returns
    /// the chosen target, or `None` for an unmounted edge.
    pub fn snap(&mut self, edge: Edge, observed: f64) -> Option<f64> {
        let Some(config) = self.registry.lookup(edge) else {
            debug!(edge = %edge, "snap ignored: no drawer mounted");
            return None;
        };
        let target = if observed > config.snap_open_threshold {
            1.0
        } else {
            0.0
        };
        let params = config.spring_params();
        self.settle_to(edge, target, params);
        Some(target)
    }

    /// Settle `edge` after a close drag released at `close_progress`.
    ///
    /// Closes when `close_progress` reaches the close threshold.
    pub fn snap_close(&mut self, edge: Edge, close_progress: f64) -> Option<f64> {
        let Some(config) = self.registry.lookup(edge) else {
            debug!(edge = %edge, "snap ignored: no drawer mounted");
            return None;
        };
        let target = if close_progress >= config.snap_close_threshold {
            0.0
        } else {
            1.0
        };
        let params = config.spring_params();
        self.settle_to(edge, target, params);
        Some(target)
    }

    /// Raise an open drawer to the top of the stack (tap on its panel).
    pub fn bring_to_front(&mut self, edge: Edge) -> bool {
        if !self.is_mounted(edge) || !self.drawers[edge].is_open() {
            return false;
        }
        self.promote(edge);
        trace!(edge = %edge, z_index = self.z_index_of(edge), "drawer raised");
        true
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Primary drag
    // ═══════════════════════════════════════════════════════════════════════

    /// Start an opening drag at `point`.
    pub fn begin_drag(&mut self, point: Point) -> Result<Edge, DragRefusal> {
        let result = self.try_begin_drag(point);
        match result {
            Ok(edge) => debug!(edge = %edge, "drag began"),
            Err(reason) => debug!(reason = %reason, "drag refused"),
        }
        result
    }

    fn try_begin_drag(&mut self, point: Point) -> Result<Edge, DragRefusal> {
        if let Some(active) = self.active {
            return Err(DragRefusal::AnotherDrawerActive(active));
        }
        let edge = self.find_edge_at(point).ok_or(DragRefusal::NoEdgeAtPoint)?;
        if !self.drawers[edge].begin_gesture(GestureKind::Opening) {
            return Err(DragRefusal::AuthorityHeld { edge });
        }
        self.active = Some(edge);
        self.translation = Translation::ZERO;
        self.promote(edge);
        Ok(edge)
    }

    /// Stream the primary drag's translation. Returns the live progress.
    pub fn drag_to(&mut self, translation: Translation) -> Option<f64> {
        let edge = self.active?;
        self.translation = translation;
        let progress = self.drawers[edge].stream_opening(translation);
        if let Some(progress) = progress {
            trace!(edge = %edge, progress, "drag moved");
        }
        progress
    }

    /// Release the primary drag and snap. Returns the settle target.
    pub fn end_drag(&mut self, translation: Translation) -> Option<f64> {
        let edge = self.active?;
        if self.drawers[edge].gesture() != Some(GestureKind::Opening) {
            self.clear_active();
            return None;
        }
        let observed = progress_from_translation(translation, edge);
        let target = self.snap(edge, observed);
        if target.is_none() {
            self.cancel_drag();
        }
        target
    }

    /// Abandon the primary drag, restoring the pre-drag state.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(edge) = self.active else {
            return false;
        };
        self.clear_active();
        self.drawers[edge].cancel_gesture();
        if !self.drawers[edge].is_open() {
            self.remove_from_order(edge);
        }
        debug!(edge = %edge, "drag cancelled");
        true
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Close drag
    // ═══════════════════════════════════════════════════════════════════════

    /// Start dragging an open drawer's own panel. Raises it to the top.
    pub fn begin_close_drag(&mut self, edge: Edge) -> Result<(), DragRefusal> {
        let result = self.try_begin_close_drag(edge);
        match result {
            Ok(()) => debug!(edge = %edge, "close drag began"),
            Err(reason) => debug!(edge = %edge, reason = %reason, "close drag refused"),
        }
        result
    }

    fn try_begin_close_drag(&mut self, edge: Edge) -> Result<(), DragRefusal> {
        if !self.is_mounted(edge) {
            return Err(DragRefusal::NotRegistered(edge));
        }
        if !self.drawers[edge].is_open() {
            return Err(DragRefusal::NotOpen(edge));
        }
        if !self.drawers[edge].begin_gesture(GestureKind::Closing) {
            return Err(DragRefusal::AuthorityHeld { edge });
        }
        self.promote(edge);
        Ok(())
    }

    /// Stream a close drag's translation. Returns the live progress.
    pub fn close_drag_to(&mut self, edge: Edge, translation: Translation) -> Option<f64> {
        let progress = self.drawers[edge].stream_closing(translation);
        if let Some(progress) = progress {
            trace!(edge = %edge, progress, "close drag moved");
        }
        progress
    }

    /// Release a close drag and snap. Returns the settle target.
    ///
    /// A release without movement is a tap: the drawer stays open on top and
    /// returns to static without a settle, and the result is `Some(1.0)`.
    pub fn end_close_drag(&mut self, edge: Edge, translation: Translation) -> Option<f64> {
        if self.drawers[edge].gesture() != Some(GestureKind::Closing) {
            return None;
        }
        if !translation.exceeds(MOVEMENT_EPSILON) {
            self.drawers[edge].cancel_gesture();
            self.bring_to_front(edge);
            return Some(1.0);
        }
        let close_progress = close_progress_from_translation(translation, edge);
        let target = self.snap_close(edge, close_progress);
        if target.is_none() {
            self.drawers[edge].cancel_gesture();
        }
        target
    }

    /// Abandon a close drag, leaving the drawer open.
    pub fn cancel_close_drag(&mut self, edge: Edge) -> bool {
        if self.drawers[edge].gesture() != Some(GestureKind::Closing) {
            return false;
        }
        self.drawers[edge].cancel_gesture();
        debug!(edge = %edge, "close drag cancelled");
        true
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Settling
    // ═══════════════════════════════════════════════════════════════════════

    /// Step the settle driver by `dt` and apply its reports.
    ///
    /// Returns how many reports were applied.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let events = self.driver.poll(dt);
        events
            .into_iter()
            .filter(|event| self.apply_settle(*event))
            .count()
    }

    /// Apply one settle report. Returns false for a stale ticket.
    pub fn apply_settle(&mut self, event: SettleEvent) -> bool {
        match event {
            SettleEvent::Progress {
                edge,
                ticket,
                value,
            } => {
                let applied = self.drawers[edge].settle_progress(ticket, value);
                if !applied {
                    trace!(edge = %edge, ticket = %ticket, "stale settle progress ignored");
                }
                applied
            }
            SettleEvent::Complete {
                edge,
                ticket,
                finished,
            } => {
                if self.drawers[edge].settle_ticket() != Some(ticket) {
                    trace!(edge = %edge, ticket = %ticket, "stale settle completion ignored");
                    return false;
                }
                match self.drawers[edge].complete_settle(ticket, finished) {
                    Some(target) => {
                        if target <= 0.0 {
                            self.remove_from_order(edge);
                        }
                        debug!(edge = %edge, ticket = %ticket, target, "settle finished");
                    }
                    None => debug!(edge = %edge, ticket = %ticket, "settle interrupted"),
                }
                true
            }
        }
    }

    fn settle_mounted(&mut self, edge: Edge, target: f64) -> Option<SettleTicket> {
        let Some(config) = self.registry.lookup(edge) else {
            debug!(edge = %edge, target, "animated command ignored: no drawer mounted");
            return None;
        };
        let params = config.spring_params();
        Some(self.settle_to(edge, target, params))
    }

    fn settle_to(&mut self, edge: Edge, target: f64, params: SpringParams) -> SettleTicket {
        let open = target >= 1.0;
        self.drawers[edge].set_committed(open);
        if open {
            self.promote(edge);
        }
        if self.active == Some(edge) {
            self.clear_active();
        }

        let ticket = SettleTicket(self.next_ticket);
        self.next_ticket += 1;
        let from = self.drawers[edge].start_settle(ticket, target);
        debug!(edge = %edge, ticket = %ticket, from, target, "settle started");
        self.driver.start(SettleRequest {
            edge,
            ticket,
            from,
            to: target,
            params,
        });
        ticket
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Internals
    // ═══════════════════════════════════════════════════════════════════════

    fn abandon_interaction(&mut self, edge: Edge, progress: f64) {
        if self.active == Some(edge) {
            self.clear_active();
        }
        if self.drawers[edge].reset_to(progress) {
            self.driver.cancel(edge);
        }
    }

    fn clear_active(&mut self) {
        self.active = None;
        self.translation = Translation::ZERO;
    }

    fn promote(&mut self, edge: Edge) {
        self.remove_from_order(edge);
        self.open_order.push(edge);
    }

    fn remove_from_order(&mut self, edge: Edge) {
        self.open_order.retain(|&e| e != edge);
    }
}
