// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CRPC Protocol Simulator - Type Definitions

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

// ─── Simulation Phase ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SimulationPhase {
    CommitWork = 0,
    RevealWork = 1,
    ComputeDelta = 2,
    CommitDelta = 3,
    RevealDelta = 4,
    Verification = 5,
}

impl Default for SimulationPhase {
    fn default() -> Self { SimulationPhase::CommitWork }
}

impl SimulationPhase {
    pub const ALL: [SimulationPhase; 6] = [
        Self::CommitWork,
        Self::RevealWork,
        Self::ComputeDelta,
        Self::CommitDelta,
        Self::RevealDelta,
        Self::Verification,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Next phase in the sequence, `None` at `Verification`.
    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verification)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CommitWork => "CommitWork",
            Self::RevealWork => "RevealWork",
            Self::ComputeDelta => "ComputeDelta",
            Self::CommitDelta => "CommitDelta",
            Self::RevealDelta => "RevealDelta",
            Self::Verification => "Verification",
        }
    }

    pub fn info(&self) -> PhaseInfo {
        let (title, description) = match self {
            Self::CommitWork => (
                "Phase 1: Commit Work",
                "Each node commits to their work by publishing a hash of their value and salt.",
            ),
            Self::RevealWork => (
                "Phase 2: Reveal Work",
                "Nodes reveal their work values and salts, allowing verification of commitments.",
            ),
            Self::ComputeDelta => (
                "Phase 3: Compute Delta",
                "Each node computes the delta between their value and the next node's value.",
            ),
            Self::CommitDelta => (
                "Phase 4: Commit Delta",
                "Nodes commit to their calculated delta values by publishing hashes.",
            ),
            Self::RevealDelta => (
                "Phase 5: Reveal Delta",
                "Nodes reveal their delta values and salts for verification.",
            ),
            Self::Verification => (
                "Phase 6: Final Verification",
                "The network validates all revealed values and detects any inconsistencies.",
            ),
        };
        PhaseInfo {
            phase: *self,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

impl fmt::Display for SimulationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimulationPhase {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| SimError::UnknownPhase(s.to_string()))
    }
}

// ─── Phase Info ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseInfo {
    pub phase: SimulationPhase,
    pub title: String,
    pub description: String,
}

// ─── Node Status ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    Pending = 0,
    Committed = 1,
    Revealed = 2,
    Validated = 3,  // TERMINAL
    Disputed = 4,   // TERMINAL
}

impl Default for NodeStatus {
    fn default() -> Self { NodeStatus::Pending }
}

impl NodeStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Validated | Self::Disputed)
    }
}

// ─── Value Mode ──────────────────────────────────────────────────────────────

/// Where CommitWork takes node values from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueMode {
    /// Uniform in `0..100` per node.
    Random,
    /// Caller-supplied values keyed by node id. Missing ids commit `0`.
    Manual(HashMap<String, i64>),
}

impl Default for ValueMode {
    fn default() -> Self { ValueMode::Random }
}

impl ValueMode {
    pub fn is_random(&self) -> bool {
        matches!(self, Self::Random)
    }
}

// ─── SimNode ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimNode {
    pub id: String,
    /// 0x + 40 hex digits, fixed at creation.
    pub address: String,
    pub status: NodeStatus,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub salt: Option<String>,
    #[serde(default)]
    pub commitment: Option<String>,
}

impl SimNode {
    pub fn pending(id: String, address: String) -> Self {
        Self {
            id,
            address,
            status: NodeStatus::Pending,
            value: None,
            salt: None,
            commitment: None,
        }
    }
}

// ─── SimEdge ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimEdge {
    pub source: String,
    pub target: String,
    /// target.value - source.value
    #[serde(default)]
    pub delta: Option<i64>,
    #[serde(default)]
    pub commitment: Option<String>,
}

impl SimEdge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            delta: None,
            commitment: None,
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

// ─── SimulationState ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub phase: SimulationPhase,
    pub nodes: Vec<SimNode>,
    pub edges: Vec<SimEdge>,
    pub is_running: bool,
    pub is_paused: bool,
}

impl SimulationState {
    pub fn node(&self, id: &str) -> Option<&SimNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&SimEdge> {
        self.edges.iter().find(|e| e.source == source && e.target == target)
    }
}

// ─── StateSnapshot ───────────────────────────────────────────────────────────

/// Everything the UI redraws from after an operation.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub state: SimulationState,
    pub phase_index: usize,
    pub phase_info: PhaseInfo,
    pub phase_applied: bool,
    pub hovered_node_id: Option<String>,
    pub use_random_values: bool,
    pub manual_values: HashMap<String, i64>,
}
