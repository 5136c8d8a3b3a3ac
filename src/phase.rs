// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CRPC Protocol Simulator - Phase Processor
//
// One transform per phase. Only the named phase is applied; skipped phases
// are never replayed, so a direct jump can leave dependent fields unset.

use std::collections::HashMap;

use rand::Rng;

use crate::hex::{generate_hex_string, COMMITMENT_DIGITS, SALT_DIGITS};
use crate::types::{NodeStatus, SimEdge, SimNode, SimulationPhase, ValueMode};

/// Exclusive upper bound for randomly drawn work values.
pub const RANDOM_VALUE_CEILING: i64 = 100;

/// Default probability that Verification marks a node Validated.
pub const VALIDATION_PROBABILITY: f64 = 0.8;

/// New node and edge collections produced by one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseOutput {
    pub nodes: Vec<SimNode>,
    pub edges: Vec<SimEdge>,
}

/// Apply `phase` to the given nodes and edges. Inputs are never mutated.
///
/// `validation_probability` must lie in `[0, 1]`; config validation enforces it.
pub fn process_phase<R: Rng + ?Sized>(
    nodes: &[SimNode],
    edges: &[SimEdge],
    phase: SimulationPhase,
    value_mode: &ValueMode,
    rng: &mut R,
    validation_probability: f64,
) -> PhaseOutput {
    match phase {
        SimulationPhase::CommitWork => PhaseOutput {
            nodes: commit_work(nodes, value_mode, rng),
            edges: edges.to_vec(),
        },
        SimulationPhase::RevealWork => PhaseOutput {
            nodes: with_status(nodes, NodeStatus::Revealed),
            edges: edges.to_vec(),
        },
        SimulationPhase::ComputeDelta => PhaseOutput {
            nodes: nodes.to_vec(),
            edges: compute_deltas(nodes, edges),
        },
        SimulationPhase::CommitDelta => PhaseOutput {
            nodes: nodes.to_vec(),
            edges: edges
                .iter()
                .map(|e| SimEdge {
                    commitment: Some(generate_hex_string(rng, COMMITMENT_DIGITS)),
                    ..e.clone()
                })
                .collect(),
        },
        // Deltas were already computed; revealing them changes nothing.
        SimulationPhase::RevealDelta => PhaseOutput {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
        },
        SimulationPhase::Verification => PhaseOutput {
            nodes: verify(nodes, rng, validation_probability),
            edges: edges.to_vec(),
        },
    }
}

fn commit_work<R: Rng + ?Sized>(
    nodes: &[SimNode],
    value_mode: &ValueMode,
    rng: &mut R,
) -> Vec<SimNode> {
    nodes
        .iter()
        .map(|node| {
            let value = match value_mode {
                ValueMode::Random => rng.gen_range(0..RANDOM_VALUE_CEILING),
                ValueMode::Manual(values) => values.get(&node.id).copied().unwrap_or(0),
            };
            SimNode {
                status: NodeStatus::Committed,
                value: Some(value),
                salt: Some(generate_hex_string(rng, SALT_DIGITS)),
                commitment: Some(generate_hex_string(rng, COMMITMENT_DIGITS)),
                ..node.clone()
            }
        })
        .collect()
}

fn with_status(nodes: &[SimNode], status: NodeStatus) -> Vec<SimNode> {
    nodes
        .iter()
        .map(|node| SimNode { status, ..node.clone() })
        .collect()
}

fn compute_deltas(nodes: &[SimNode], edges: &[SimEdge]) -> Vec<SimEdge> {
    let values: HashMap<&str, Option<i64>> =
        nodes.iter().map(|n| (n.id.as_str(), n.value)).collect();

    edges
        .iter()
        .map(|edge| {
            let source = values.get(edge.source.as_str()).copied().flatten();
            let target = values.get(edge.target.as_str()).copied().flatten();
            match (source, target) {
                (Some(s), Some(t)) => SimEdge { delta: Some(t - s), ..edge.clone() },
                _ => edge.clone(),
            }
        })
        .collect()
}

fn verify<R: Rng + ?Sized>(nodes: &[SimNode], rng: &mut R, p: f64) -> Vec<SimNode> {
    nodes
        .iter()
        .map(|node| {
            let status = if rng.gen_bool(p) {
                NodeStatus::Validated
            } else {
                NodeStatus::Disputed
            };
            SimNode { status, ..node.clone() }
        })
        .collect()
}

/// Sum of deltas around the ring, `None` while any edge lacks one.
///
/// Telescopes to zero on any cycle whose deltas were computed from the same
/// node values.
pub fn ring_delta_sum(edges: &[SimEdge]) -> Option<i64> {
    edges.iter().map(|e| e.delta).sum()
}
