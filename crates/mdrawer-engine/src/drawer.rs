#![forbid(unsafe_code)]

//! Per-edge drawer state machine.
//!
//! ```text
//!            begin_gesture            start_settle
//!   static ───────────────▶ gesture ───────────────▶ spring
//!     ▲  ◀─────────────────── │                        │
//!     │      cancel_gesture                            │
//!     └────────────────────────────────────────────────┘
//!                    complete_settle (current ticket)
//! ```
//!
//! Imperative commands may also move `static → spring` or retarget
//! `spring → spring`, and immediate commands jump any state back to static.
//!
//! # Invariants
//!
//! 1. A gesture can only begin from static.
//! 2. Only reports for the current settle ticket change state.
//! 3. Cancelling a gesture restores the progress held before it began.

use std::sync::Arc;

use mdrawer_core::progress::{
    MOVEMENT_EPSILON, close_progress_from_translation, progress_from_translation,
};
use mdrawer_core::{Edge, Translation};

use crate::authority::{Authority, EdgeCell};
use crate::settle::SettleTicket;

/// Which sub-gesture owns an edge in the gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Dragging the drawer open from its edge hitbox.
    Opening,
    /// Dragging an open drawer's own panel toward closed.
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingSettle {
    ticket: SettleTicket,
    target: f64,
}

/// State of one edge.
#[derive(Debug)]
pub(crate) struct DrawerMachine {
    edge: Edge,
    cell: Arc<EdgeCell>,
    committed_open: bool,
    gesture: Option<GestureKind>,
    close_translation: Translation,
    settled_progress: f64,
    settle: Option<PendingSettle>,
}

impl DrawerMachine {
    pub(crate) fn new(edge: Edge) -> Self {
        Self {
            edge,
            cell: Arc::new(EdgeCell::new(0.0)),
            committed_open: false,
            gesture: None,
            close_translation: Translation::ZERO,
            settled_progress: 0.0,
            settle: None,
        }
    }

    pub(crate) fn cell(&self) -> &Arc<EdgeCell> {
        &self.cell
    }

    pub(crate) fn authority(&self) -> Authority {
        self.cell.authority()
    }

    pub(crate) fn progress(&self) -> f64 {
        self.cell.progress()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.committed_open
    }

    pub(crate) fn set_committed(&mut self, open: bool) {
        self.committed_open = open;
    }

    pub(crate) fn gesture(&self) -> Option<GestureKind> {
        self.gesture
    }

    pub(crate) fn settle_ticket(&self) -> Option<SettleTicket> {
        self.settle.map(|pending| pending.ticket)
    }

    // -----------------------------------------------------------------------
    // Gesture
    // -----------------------------------------------------------------------

    /// `static → gesture`. Returns false if another authority owns the edge.
    pub(crate) fn begin_gesture(&mut self, kind: GestureKind) -> bool {
        if !self.cell.claim(Authority::Static, Authority::Gesture) {
            return false;
        }
        self.gesture = Some(kind);
        self.close_translation = Translation::ZERO;
        self.settled_progress = self.cell.progress();
        true
    }

    /// Resolve live progress from the opening translation and any close
    /// translation recorded for this edge. The close sub-gesture wins when
    /// both have moved.
    pub(crate) fn resolve_progress(&self, opening: Translation) -> Option<f64> {
        if self.close_translation.exceeds(MOVEMENT_EPSILON) {
            Some(1.0 - close_progress_from_translation(self.close_translation, self.edge))
        } else if opening.exceeds(MOVEMENT_EPSILON) {
            Some(progress_from_translation(opening, self.edge))
        } else {
            None
        }
    }

    /// Stream an opening-drag translation. Returns the written progress.
    pub(crate) fn stream_opening(&mut self, translation: Translation) -> Option<f64> {
        if self.gesture != Some(GestureKind::Opening) {
            return None;
        }
        let progress = self.resolve_progress(translation)?;
        self.cell
            .write_progress(Authority::Gesture, progress)
            .then(|| self.cell.progress())
    }

    /// Stream a close-drag translation. Returns the written progress.
    pub(crate) fn stream_closing(&mut self, translation: Translation) -> Option<f64> {
        if self.gesture != Some(GestureKind::Closing) {
            return None;
        }
        self.close_translation = translation;
        let progress = self.resolve_progress(Translation::ZERO)?;
        self.cell
            .write_progress(Authority::Gesture, progress)
            .then(|| self.cell.progress())
    }

    /// `gesture → static`, restoring the pre-gesture progress.
    pub(crate) fn cancel_gesture(&mut self) -> bool {
        if self.gesture.take().is_none() {
            return false;
        }
        self.close_translation = Translation::ZERO;
        self.cell.settle_at(self.settled_progress);
        true
    }

    // -----------------------------------------------------------------------
    // Settle
    // -----------------------------------------------------------------------

    /// Hand the edge to a spring heading for `target`. Returns the progress
    /// the spring starts from.
    pub(crate) fn start_settle(&mut self, ticket: SettleTicket, target: f64) -> f64 {
        self.gesture = None;
        self.close_translation = Translation::ZERO;
        self.cell.force(Authority::Spring);
        self.settle = Some(PendingSettle { ticket, target });
        self.cell.progress()
    }

    /// Apply an intermediate settle value if `ticket` is current.
    pub(crate) fn settle_progress(&mut self, ticket: SettleTicket, value: f64) -> bool {
        if self.settle_ticket() != Some(ticket) {
            return false;
        }
        self.cell.write_progress(Authority::Spring, value)
    }

    /// `spring → static` for the current ticket.
    ///
    /// Returns the target reached when the settle finished, `None` if the
    /// ticket was stale or the settle was interrupted.
    pub(crate) fn complete_settle(&mut self, ticket: SettleTicket, finished: bool) -> Option<f64> {
        let pending = self.settle.filter(|pending| pending.ticket == ticket)?;
        self.settle = None;
        if finished {
            self.cell.settle_at(pending.target);
            self.settled_progress = pending.target;
            Some(pending.target)
        } else {
            let reached = self.cell.progress();
            self.cell.settle_at(reached);
            self.settled_progress = reached;
            None
        }
    }

    /// Jump to `progress` at rest, abandoning any gesture or settle.
    ///
    /// Returns true if a settle was running so the caller can stop its driver.
    pub(crate) fn reset_to(&mut self, progress: f64) -> bool {
        let had_settle = self.settle.take().is_some();
        self.gesture = None;
        self.close_translation = Translation::ZERO;
        self.cell.settle_at(progress);
        self.settled_progress = self.cell.progress();
        had_settle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_begins_only_from_static() {
        let mut drawer = DrawerMachine::new(Edge::Left);
        assert!(drawer.begin_gesture(GestureKind::Opening));
        assert!(!drawer.begin_gesture(GestureKind::Closing));

        drawer.start_settle(SettleTicket(1), 1.0);
        assert!(!drawer.begin_gesture(GestureKind::Opening));
        assert_eq!(drawer.authority(), Authority::Spring);
    }

    #[test]
    fn opening_stream_writes_progress() {
        let mut drawer = DrawerMachine::new(Edge::Left);
        drawer.begin_gesture(GestureKind::Opening);
        assert_eq!(drawer.stream_opening(Translation::new(120.0, 0.0)), Some(0.5));
        assert_eq!(drawer.progress(), 0.5);
        // Sub-epsilon movement leaves progress alone.
        assert_eq!(drawer.stream_opening(Translation::new(0.05, 0.0)), None);
        assert_eq!(drawer.progress(), 0.5);
    }

    #[test]
    fn closing_stream_uses_inverse_progress() {
        let mut drawer = DrawerMachine::new(Edge::Right);
        drawer.reset_to(1.0);
        drawer.begin_gesture(GestureKind::Closing);
        assert_eq!(drawer.stream_closing(Translation::new(60.0, 0.0)), Some(0.75));
        // Opening stream is ignored while the close sub-gesture owns the edge.
        assert_eq!(drawer.stream_opening(Translation::new(-240.0, 0.0)), None);
    }

    #[test]
    fn close_translation_wins_over_opening() {
        let mut drawer = DrawerMachine::new(Edge::Left);
        drawer.close_translation = Translation::new(-120.0, 0.0);
        let progress = drawer.resolve_progress(Translation::new(240.0, 0.0));
        assert_eq!(progress, Some(0.5));

        drawer.close_translation = Translation::ZERO;
        assert_eq!(drawer.resolve_progress(Translation::new(240.0, 0.0)), Some(1.0));
    }

    #[test]
    fn cancel_restores_pre_gesture_progress() {
        let mut drawer = DrawerMachine::new(Edge::Top);
        drawer.begin_gesture(GestureKind::Opening);
        drawer.stream_opening(Translation::new(0.0, 200.0));
        assert!(drawer.cancel_gesture());
        assert_eq!(drawer.progress(), 0.0);
        assert_eq!(drawer.authority(), Authority::Static);
        assert!(!drawer.cancel_gesture());
    }

    #[test]
    fn stale_tickets_are_ignored() {
        let mut drawer = DrawerMachine::new(Edge::Bottom);
        drawer.start_settle(SettleTicket(1), 1.0);
        drawer.start_settle(SettleTicket(2), 0.0);

        assert!(!drawer.settle_progress(SettleTicket(1), 0.9));
        assert_eq!(drawer.complete_settle(SettleTicket(1), true), None);
        assert_eq!(drawer.authority(), Authority::Spring);

        assert!(drawer.settle_progress(SettleTicket(2), 0.1));
        assert_eq!(drawer.complete_settle(SettleTicket(2), true), Some(0.0));
        assert_eq!(drawer.authority(), Authority::Static);
    }

    #[test]
    fn interrupted_settle_rests_where_it_stopped() {
        let mut drawer = DrawerMachine::new(Edge::Left);
        drawer.start_settle(SettleTicket(3), 1.0);
        drawer.settle_progress(SettleTicket(3), 0.6);
        assert_eq!(drawer.complete_settle(SettleTicket(3), false), None);
        assert_eq!(drawer.authority(), Authority::Static);
        assert_eq!(drawer.progress(), 0.6);
        assert_eq!(drawer.settle_ticket(), None);
    }

    #[test]
    fn reset_reports_running_settle() {
        let mut drawer = DrawerMachine::new(Edge::Left);
        assert!(!drawer.reset_to(1.0));
        drawer.start_settle(SettleTicket(1), 0.0);
        assert!(drawer.reset_to(0.0));
        assert_eq!(drawer.authority(), Authority::Static);
    }
}
