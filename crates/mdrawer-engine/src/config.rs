#![forbid(unsafe_code)]

//! Drawer tuning and policy-as-data configuration.
//!
//! [`DrawerConfig`] is the per-edge tuning a host passes when mounting a
//! drawer. [`DrawerPolicy`] groups the coordinator-wide knobs (layout mode,
//! base z-index, spring rest threshold) with default and per-edge drawer
//! tuning so a whole drawer setup can be loaded from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! layout = "sidebar-layout"
//! base_z_index = 1000
//!
//! [defaults]
//! animation_speed = 0.8
//!
//! [edges.left]
//! hitbox_size = 30.0
//!
//! [edges.right]
//! ```
//!
//! ```rust,ignore
//! let policy = DrawerPolicy::from_toml_file("drawers.toml")?;
//! let coordinator = Coordinator::from_policy(&policy, screen)?;
//! ```
//!
//! # Defaults
//!
//! `DrawerPolicy::default()` mounts nothing and reproduces the built-in
//! constants: fullscreen layout, base z-index 1000, hitbox 50, open threshold
//! 0.3, close threshold 0.7, speed 0.5, bounciness 0.3.

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};

use mdrawer_core::animation::SpringParams;
use mdrawer_core::progress::DEFAULT_HITBOX;
use mdrawer_core::{Edge, EdgeMap, LayoutMode};

use crate::error::EngineError;

/// Default z-index of a drawer that is not in the open order.
pub const DEFAULT_BASE_Z_INDEX: i32 = 1000;

/// Default position delta below which a settle spring counts as resting.
pub const DEFAULT_REST_THRESHOLD: f64 = 0.001;

// ---------------------------------------------------------------------------
// DrawerConfig
// ---------------------------------------------------------------------------

/// Tuning for one mounted drawer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct DrawerConfig {
    /// Thickness of the edge strip that starts an opening drag.
    pub hitbox_size: f64,
    /// Progress strictly above which a released opening drag opens.
    pub snap_open_threshold: f64,
    /// Close progress at or above which a released close drag closes.
    pub snap_close_threshold: f64,
    /// Raises spring stiffness.
    pub animation_speed: f64,
    /// Lowers spring damping.
    pub bounciness: f64,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            hitbox_size: DEFAULT_HITBOX,
            snap_open_threshold: 0.3,
            snap_close_threshold: 0.7,
            animation_speed: 0.5,
            bounciness: 0.3,
        }
    }
}

impl DrawerConfig {
    #[must_use]
    pub fn with_hitbox_size(mut self, size: f64) -> Self {
        self.hitbox_size = size;
        self
    }

    #[must_use]
    pub fn with_snap_open_threshold(mut self, threshold: f64) -> Self {
        self.snap_open_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_snap_close_threshold(mut self, threshold: f64) -> Self {
        self.snap_close_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_animation_speed(mut self, speed: f64) -> Self {
        self.animation_speed = speed;
        self
    }

    #[must_use]
    pub fn with_bounciness(mut self, bounciness: f64) -> Self {
        self.bounciness = bounciness;
        self
    }

    /// Spring constants for settles of this drawer.
    #[must_use]
    pub fn spring_params(&self) -> SpringParams {
        SpringParams::from_tuning(self.animation_speed, self.bounciness)
    }

    /// Reject values that make the drawer unusable.
    ///
    /// Thresholds must be finite and in `[0, 1]`; hitbox, speed and
    /// bounciness must be finite and non-negative.
    pub fn validate(&self, edge: Edge) -> Result<(), EngineError> {
        let unit = [
            ("snap_open_threshold", self.snap_open_threshold),
            ("snap_close_threshold", self.snap_close_threshold),
        ];
        for (field, value) in unit {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(EngineError::InvalidConfig { edge, field, value });
            }
        }

        let non_negative = [
            ("hitbox_size", self.hitbox_size),
            ("animation_speed", self.animation_speed),
            ("bounciness", self.bounciness),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfig { edge, field, value });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Per-edge overrides
// ---------------------------------------------------------------------------

/// Partial drawer tuning layered over [`DrawerPolicy::defaults`].
///
/// Present in a policy means "mount this edge"; absent fields inherit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct DrawerOverrides {
    pub hitbox_size: Option<f64>,
    pub snap_open_threshold: Option<f64>,
    pub snap_close_threshold: Option<f64>,
    pub animation_speed: Option<f64>,
    pub bounciness: Option<f64>,
}

impl DrawerOverrides {
    /// Layer these overrides on `base`.
    #[must_use]
    pub fn apply(&self, base: DrawerConfig) -> DrawerConfig {
        DrawerConfig {
            hitbox_size: self.hitbox_size.unwrap_or(base.hitbox_size),
            snap_open_threshold: self.snap_open_threshold.unwrap_or(base.snap_open_threshold),
            snap_close_threshold: self
                .snap_close_threshold
                .unwrap_or(base.snap_close_threshold),
            animation_speed: self.animation_speed.unwrap_or(base.animation_speed),
            bounciness: self.bounciness.unwrap_or(base.bounciness),
        }
    }
}

/// Which edges a policy mounts, with their overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct EdgePolicy {
    pub top: Option<DrawerOverrides>,
    pub right: Option<DrawerOverrides>,
    pub bottom: Option<DrawerOverrides>,
    pub left: Option<DrawerOverrides>,
}

impl EdgePolicy {
    /// Overrides for `edge`, if the policy mounts it.
    #[must_use]
    pub fn get(&self, edge: Edge) -> Option<&DrawerOverrides> {
        match edge {
            Edge::Top => self.top.as_ref(),
            Edge::Right => self.right.as_ref(),
            Edge::Bottom => self.bottom.as_ref(),
            Edge::Left => self.left.as_ref(),
        }
    }

    /// Mount `edge` with `overrides` (builder pattern).
    #[must_use]
    pub fn with(mut self, edge: Edge, overrides: DrawerOverrides) -> Self {
        let slot = match edge {
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
        };
        *slot = Some(overrides);
        self
    }
}

// ---------------------------------------------------------------------------
// DrawerPolicy
// ---------------------------------------------------------------------------

/// Coordinator-wide drawer configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct DrawerPolicy {
    /// How drawer panels share the screen.
    pub layout: LayoutMode,
    /// z-index for drawers outside the open order.
    pub base_z_index: i32,
    /// Position delta below which a settle spring rests.
    pub rest_threshold: f64,
    /// Tuning inherited by every mounted edge.
    pub defaults: DrawerConfig,
    /// Edges to mount.
    pub edges: EdgePolicy,
}

impl Default for DrawerPolicy {
    fn default() -> Self {
        Self {
            layout: LayoutMode::default(),
            base_z_index: DEFAULT_BASE_Z_INDEX,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            defaults: DrawerConfig::default(),
            edges: EdgePolicy::default(),
        }
    }
}

impl DrawerPolicy {
    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let policy: Self = toml::from_str(s)?;
        policy.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let policy: Self = serde_json::from_str(s)?;
        policy.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty TOML.
    #[cfg(feature = "policy-config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    #[cfg(feature = "policy-config")]
    fn checked(self) -> Result<Self, ConfigError> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Resolved tuning for every edge this policy mounts.
    #[must_use]
    pub fn mounted(&self) -> EdgeMap<Option<DrawerConfig>> {
        EdgeMap::from_fn(|edge| {
            self.edges
                .get(edge)
                .map(|overrides| overrides.apply(self.defaults))
        })
    }

    /// Validate all parameters, returning every problem found.
    ///
    /// An empty result means the policy is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !self.rest_threshold.is_finite() || self.rest_threshold <= 0.0 {
            problems.push(format!(
                "rest_threshold must be positive, got {}",
                self.rest_threshold
            ));
        }
        for (edge, config) in self.mounted().iter() {
            if let Some(config) = config
                && let Err(err) = config.validate(edge)
            {
                problems.push(err.to_string());
            }
        }
        problems
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading a [`DrawerPolicy`].
#[cfg(feature = "policy-config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML policy: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize policy: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("invalid JSON policy: {0}")]
    Json(#[from] serde_json::Error),

    #[error("policy failed validation: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
