// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CRPC Protocol Simulator - Configuration

use serde::{Deserialize, Serialize};

use crate::autoplay::AUTOPLAY_INTERVAL_MS;
use crate::error::SimError;
use crate::phase::VALIDATION_PROBABILITY;
use crate::topology::{CURVE_SEGMENTS, RING_RADIUS};

/// Upper bound on ring size; the ring view is unreadable past this.
pub const MAX_NODES: u32 = 64;

pub const DEFAULT_NODE_COUNT: u32 = 6;

/// Sphere radius for an unhovered node.
pub const NODE_RADIUS: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub node_count: u32,
    pub ring_radius: f64,
    pub node_radius: f64,
    pub autoplay_interval_ms: f64,
    pub validation_probability: f64,
    pub curve_segments: usize,
    /// Fixed PRNG seed; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            ring_radius: RING_RADIUS,
            node_radius: NODE_RADIUS,
            autoplay_interval_ms: AUTOPLAY_INTERVAL_MS,
            validation_probability: VALIDATION_PROBABILITY,
            curve_segments: CURVE_SEGMENTS,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_node_count(node_count: u32) -> Self {
        Self { node_count, ..Self::default() }
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.node_count == 0 || self.node_count > MAX_NODES {
            return Err(SimError::InvalidConfig(format!(
                "node_count must be in 1..={}, got {}",
                MAX_NODES, self.node_count
            )));
        }
        if !(self.ring_radius > 0.0 && self.ring_radius.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "ring_radius must be positive, got {}",
                self.ring_radius
            )));
        }
        if !(self.node_radius > 0.0 && self.node_radius.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "node_radius must be positive, got {}",
                self.node_radius
            )));
        }
        if !(self.autoplay_interval_ms > 0.0 && self.autoplay_interval_ms.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "autoplay_interval_ms must be positive, got {}",
                self.autoplay_interval_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.validation_probability) {
            return Err(SimError::InvalidConfig(format!(
                "validation_probability must be in [0, 1], got {}",
                self.validation_probability
            )));
        }
        if self.curve_segments == 0 {
            return Err(SimError::InvalidConfig("curve_segments must be at least 1".into()));
        }
        Ok(())
    }
}
