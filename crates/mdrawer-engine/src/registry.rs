#![forbid(unsafe_code)]

//! Which edges have a mounted drawer, and with what tuning.
//!
//! The registry is owned by its coordinator; two coordinators never share
//! mounts.

use mdrawer_core::{Edge, EdgeMap};

use crate::config::DrawerConfig;

/// Mounted drawer tuning keyed by edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawerRegistry {
    slots: EdgeMap<Option<DrawerConfig>>,
}

impl DrawerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `edge`, replacing any previous tuning.
    pub fn register(&mut self, edge: Edge, config: DrawerConfig) {
        self.slots[edge] = Some(config);
    }

    /// Unmount `edge`, returning its tuning. Other edges are untouched.
    pub fn unregister(&mut self, edge: Edge) -> Option<DrawerConfig> {
        self.slots[edge].take()
    }

    #[must_use]
    pub fn lookup(&self, edge: Edge) -> Option<&DrawerConfig> {
        self.slots[edge].as_ref()
    }

    #[must_use]
    pub fn contains(&self, edge: Edge) -> bool {
        self.slots[edge].is_some()
    }

    /// Mounted edges in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, &DrawerConfig)> + '_ {
        self.slots
            .iter()
            .filter_map(|(edge, slot)| slot.as_ref().map(|config| (edge, config)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
