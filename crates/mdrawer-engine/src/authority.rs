#![forbid(unsafe_code)]

//! Per-edge progress cells shared with render threads.
//!
//! Each edge's progress and the authority that may write it live in an
//! [`EdgeCell`] behind an `Arc`. The coordinator holds the only strong
//! reference; renderers get a [`DrawerHandle`] holding a `Weak`, so a handle
//! can never keep a dropped coordinator's state alive.
//!
//! # Invariants
//!
//! 1. Exactly one [`Authority`] owns an edge at a time.
//! 2. Progress writes name the authority they act for and are dropped if it
//!    no longer owns the edge.
//! 3. Stored progress is always finite and within `[0, 1]`.
//!
//! # Failure Modes
//!
//! - Reading through a handle whose coordinator is gone panics; the `try_*`
//!   accessors report [`EngineError::Detached`] instead.

use std::fmt;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use mdrawer_core::progress::transform_for_progress;
use mdrawer_core::{Edge, Transform};

use crate::error::EngineError;

/// Who currently drives an edge's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Authority {
    /// Resting at a committed value.
    #[default]
    Static = 0,
    /// Following a live pointer drag.
    Gesture = 1,
    /// Settling toward a snap target.
    Spring = 2,
}

impl Authority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Gesture => "gesture",
            Self::Spring => "spring",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Gesture,
            2 => Self::Spring,
            _ => Self::Static,
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn sanitize(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Lock-free progress and authority for one edge.
#[derive(Debug)]
pub struct EdgeCell {
    authority: AtomicU8,
    progress: AtomicU64,
}

impl EdgeCell {
    #[must_use]
    pub fn new(progress: f64) -> Self {
        Self {
            authority: AtomicU8::new(Authority::Static as u8),
            progress: AtomicU64::new(sanitize(progress).to_bits()),
        }
    }

    #[must_use]
    pub fn authority(&self) -> Authority {
        Authority::from_u8(self.authority.load(Ordering::Acquire))
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        f64::from_bits(self.progress.load(Ordering::Acquire))
    }

    /// Move ownership from `from` to `to`; fails if `from` no longer owns it.
    pub(crate) fn claim(&self, from: Authority, to: Authority) -> bool {
        self.authority
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Take ownership unconditionally, returning the previous owner.
    pub(crate) fn force(&self, to: Authority) -> Authority {
        Authority::from_u8(self.authority.swap(to as u8, Ordering::AcqRel))
    }

    /// Store `value` if `owner` still drives the edge.
    pub(crate) fn write_progress(&self, owner: Authority, value: f64) -> bool {
        if self.authority() != owner {
            return false;
        }
        self.progress
            .store(sanitize(value).to_bits(), Ordering::Release);
        true
    }

    /// Return to static at `progress`.
    pub(crate) fn settle_at(&self, progress: f64) {
        self.progress
            .store(sanitize(progress).to_bits(), Ordering::Release);
        self.authority
            .store(Authority::Static as u8, Ordering::Release);
    }
}

/// Read-only view of one edge for renderers.
///
/// Cheap to clone and `Send + Sync`, so it can move to a render thread.
#[derive(Debug, Clone)]
pub struct DrawerHandle {
    edge: Edge,
    cell: Weak<EdgeCell>,
}

impl DrawerHandle {
    pub(crate) fn new(edge: Edge, cell: &Arc<EdgeCell>) -> Self {
        Self {
            edge,
            cell: Arc::downgrade(cell),
        }
    }

    #[must_use]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Whether the owning coordinator still exists.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.cell.strong_count() > 0
    }

    fn cell(&self) -> Result<Arc<EdgeCell>, EngineError> {
        self.cell
            .upgrade()
            .ok_or(EngineError::Detached { edge: self.edge })
    }

    pub fn try_progress(&self) -> Result<f64, EngineError> {
        Ok(self.cell()?.progress())
    }

    pub fn try_authority(&self) -> Result<Authority, EngineError> {
        Ok(self.cell()?.authority())
    }

    pub fn try_transform(&self) -> Result<Transform, EngineError> {
        let progress = self.try_progress()?;
        Ok(transform_for_progress(self.edge, progress))
    }

    /// Current progress.
    ///
    /// # Panics
    ///
    /// Panics if the coordinator that issued this handle was dropped.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.try_progress().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Current authority.
    ///
    /// # Panics
    ///
    /// Panics if the coordinator that issued this handle was dropped.
    #[must_use]
    pub fn authority(&self) -> Authority {
        self.try_authority().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Container transform for the current progress.
    ///
    /// # Panics
    ///
    /// Panics if the coordinator that issued this handle was dropped.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.try_transform().unwrap_or_else(|err| panic!("{err}"))
    }
}
