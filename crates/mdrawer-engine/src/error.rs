#![forbid(unsafe_code)]

//! Engine error types.
//!
//! Only two things can go wrong inside the engine: a drawer is mounted with
//! nonsensical tuning, or a render handle is used after its coordinator is
//! gone. Everything else (unregistered edges, refused drags) is an expected
//! condition reported through `Option` or [`DragRefusal`].

use std::fmt;

use mdrawer_core::Edge;

/// Errors produced by the drawer engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A [`DrawerConfig`](crate::DrawerConfig) field is out of range.
    InvalidConfig {
        edge: Edge,
        field: &'static str,
        value: f64,
    },
    /// A [`DrawerHandle`](crate::DrawerHandle) outlived its coordinator.
    Detached { edge: Edge },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { edge, field, value } => {
                write!(f, "invalid {field} for {edge} drawer: {value}")
            }
            Self::Detached { edge } => write!(
                f,
                "{edge} drawer handle used after its coordinator was dropped"
            ),
        }
    }
}

impl std::error::Error for EngineError {}

/// Why a drag could not start.
///
/// Refusals are the gesture-recognizer "fail" path: silent for the user,
/// logged at debug level, and never mutate drawer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRefusal {
    /// No registered hitbox contains the pointer.
    NoEdgeAtPoint,
    /// Another drawer already owns the primary drag.
    AnotherDrawerActive(Edge),
    /// The edge's progress is owned by a gesture or spring.
    AuthorityHeld { edge: Edge },
    /// The edge has no mounted drawer.
    NotRegistered(Edge),
    /// Close drags need an open drawer.
    NotOpen(Edge),
}

impl fmt::Display for DragRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEdgeAtPoint => write!(f, "pointer is outside every drawer hitbox"),
            Self::AnotherDrawerActive(edge) => write!(f, "{edge} drawer is already being dragged"),
            Self::AuthorityHeld { edge } => write!(f, "{edge} drawer is still animating"),
            Self::NotRegistered(edge) => write!(f, "no {edge} drawer is mounted"),
            Self::NotOpen(edge) => write!(f, "{edge} drawer is not open"),
        }
    }
}
