#![forbid(unsafe_code)]

//! Settle animation drivers.
//!
//! When a drag is released or an animated command runs, the coordinator hands
//! a [`SettleRequest`] to its [`SettleDriver`]. The driver reports back with
//! [`SettleEvent`]s, either from [`SettleDriver::poll`] (stepping drivers
//! such as [`SpringSettler`]) or through
//! [`Coordinator::apply_settle`](crate::Coordinator::apply_settle) when a host
//! animator runs elsewhere.
//!
//! Every request carries a [`SettleTicket`]. A newer request for the same
//! edge supersedes the older one; reports carrying a superseded ticket are
//! ignored by the coordinator.

use std::fmt;
use std::time::Duration;

use mdrawer_core::animation::{Spring, SpringParams};
use mdrawer_core::{Edge, EdgeMap};

use crate::config::DEFAULT_REST_THRESHOLD;

/// Longest a [`SpringSettler`] spring may run before it is snapped to target.
///
/// Springs with zero damping never rest on their own.
pub const DEFAULT_MAX_SETTLE: Duration = Duration::from_secs(5);

/// Identity of one settle animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SettleTicket(pub u64);

impl fmt::Display for SettleTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Instruction to animate one edge's progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleRequest {
    pub edge: Edge,
    pub ticket: SettleTicket,
    /// Progress at the moment the settle starts.
    pub from: f64,
    /// Snap target, `0.0` or `1.0`.
    pub to: f64,
    pub params: SpringParams,
}

/// Report from a settle driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettleEvent {
    /// Intermediate progress value.
    Progress {
        edge: Edge,
        ticket: SettleTicket,
        value: f64,
    },
    /// The animation ended. `finished == false` means it was interrupted.
    Complete {
        edge: Edge,
        ticket: SettleTicket,
        finished: bool,
    },
}

impl SettleEvent {
    #[must_use]
    pub fn edge(&self) -> Edge {
        match self {
            Self::Progress { edge, .. } | Self::Complete { edge, .. } => *edge,
        }
    }

    #[must_use]
    pub fn ticket(&self) -> SettleTicket {
        match self {
            Self::Progress { ticket, .. } | Self::Complete { ticket, .. } => *ticket,
        }
    }
}

/// Runs settle animations on behalf of a coordinator.
pub trait SettleDriver {
    /// Begin animating, superseding any running settle for the same edge.
    fn start(&mut self, request: SettleRequest);

    /// Stop animating `edge` without reporting completion.
    fn cancel(&mut self, edge: Edge);

    /// Advance running animations by `dt` and collect their reports.
    ///
    /// Drivers that report through `Coordinator::apply_settle` keep the
    /// default, which reports nothing.
    fn poll(&mut self, _dt: Duration) -> Vec<SettleEvent> {
        Vec::new()
    }
}

impl<D: SettleDriver + ?Sized> SettleDriver for Box<D> {
    fn start(&mut self, request: SettleRequest) {
        (**self).start(request);
    }

    fn cancel(&mut self, edge: Edge) {
        (**self).cancel(edge);
    }

    fn poll(&mut self, dt: Duration) -> Vec<SettleEvent> {
        (**self).poll(dt)
    }
}

// ---------------------------------------------------------------------------
// SpringSettler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct RunningSettle {
    ticket: SettleTicket,
    spring: Spring,
    elapsed: Duration,
}

/// Default driver: one [`Spring`] per edge, stepped by `poll`.
///
/// Retargeting an edge that is already settling keeps the spring's velocity,
/// so an interrupted close that is reopened reverses smoothly.
#[derive(Debug, Clone)]
pub struct SpringSettler {
    running: EdgeMap<Option<RunningSettle>>,
    rest_threshold: f64,
    max_duration: Duration,
}

impl Default for SpringSettler {
    fn default() -> Self {
        Self::new()
    }
}

impl SpringSettler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            running: EdgeMap::default(),
            rest_threshold: DEFAULT_REST_THRESHOLD,
            max_duration: DEFAULT_MAX_SETTLE,
        }
    }

    /// Position delta below which a spring rests (builder pattern).
    #[must_use]
    pub fn with_rest_threshold(mut self, threshold: f64) -> Self {
        self.rest_threshold = threshold;
        self
    }

    /// Cap on a single settle's duration (builder pattern).
    #[must_use]
    pub fn with_max_duration(mut self, max: Duration) -> Self {
        self.max_duration = max;
        self
    }

    /// Whether `edge` is currently animating.
    #[must_use]
    pub fn is_running(&self, edge: Edge) -> bool {
        self.running[edge].is_some()
    }

    /// Number of edges currently animating.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.running.iter().filter(|(_, slot)| slot.is_some()).count()
    }
}

impl SettleDriver for SpringSettler {
    fn start(&mut self, request: SettleRequest) {
        let carried_velocity = self.running[request.edge]
            .as_ref()
            .map_or(0.0, |running| running.spring.velocity());

        let mut spring = Spring::new(request.from, request.to)
            .with_params(request.params)
            .with_rest_threshold(self.rest_threshold);
        if carried_velocity != 0.0 {
            spring.impulse(carried_velocity);
        }

        self.running[request.edge] = Some(RunningSettle {
            ticket: request.ticket,
            spring,
            elapsed: Duration::ZERO,
        });
    }

    fn cancel(&mut self, edge: Edge) {
        self.running[edge] = None;
    }

    fn poll(&mut self, dt: Duration) -> Vec<SettleEvent> {
        let max_duration = self.max_duration;
        let mut events = Vec::new();

        for (edge, slot) in self.running.iter_mut() {
            let Some(running) = slot else { continue };

            running.spring.advance(dt);
            running.elapsed += dt;
            let expired = running.elapsed >= max_duration;
            if expired && !running.spring.is_at_rest() {
                tracing::debug!(
                    edge = %edge,
                    ticket = %running.ticket,
                    elapsed_ms = running.elapsed.as_millis() as u64,
                    "settle cap reached, snapping to target"
                );
            }
            let value = if expired {
                running.spring.target()
            } else {
                running.spring.position()
            };

            events.push(SettleEvent::Progress {
                edge,
                ticket: running.ticket,
                value,
            });

            if expired || running.spring.is_at_rest() {
                events.push(SettleEvent::Complete {
                    edge,
                    ticket: running.ticket,
                    finished: true,
                });
                *slot = None;
            }
        }
        events
    }
}

// ---------------------------------------------------------------------------
// ExternalSettler
// ---------------------------------------------------------------------------

/// Driver for hosts that animate on their own thread or engine.
///
/// It only records what should be animated. The host reads
/// [`pending`](Self::pending) (or drains [`take_started`](Self::take_started)),
/// runs its animation, and reports back through
/// [`Coordinator::apply_settle`](crate::Coordinator::apply_settle).
#[derive(Debug, Clone, Default)]
pub struct ExternalSettler {
    pending: EdgeMap<Option<SettleRequest>>,
    started: Vec<SettleRequest>,
}

impl ExternalSettler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The settle currently expected for `edge`.
    #[must_use]
    pub fn pending(&self, edge: Edge) -> Option<SettleRequest> {
        self.pending[edge]
    }

    /// Requests started since the last call, oldest first.
    pub fn take_started(&mut self) -> Vec<SettleRequest> {
        std::mem::take(&mut self.started)
    }
}

impl SettleDriver for ExternalSettler {
    fn start(&mut self, request: SettleRequest) {
        self.pending[request.edge] = Some(request);
        self.started.push(request);
    }

    fn cancel(&mut self, edge: Edge) {
        self.pending[edge] = None;
    }
}
