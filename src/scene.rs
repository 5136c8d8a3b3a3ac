// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CRPC Protocol Simulator - Render Scene
//
// Flattens a state snapshot into what the ring view and details table draw.
// Hover highlighting is derived here so both views agree.

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::style::{edge_style, node_style, short_address, status_class, truncate, EdgeStyle, NodeStyle, EMPTY_CELL};
use crate::topology::{edge_curve, layout_positions};
use crate::types::{NodeStatus, SimulationState};

#[derive(Debug, Clone, Serialize)]
pub struct SceneNode {
    pub id: String,
    pub label: String,
    pub position: [f64; 3],
    pub style: NodeStyle,
    pub hovered: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneEdge {
    pub source: String,
    pub target: String,
    pub points: Vec<[f64; 3]>,
    pub style: EdgeStyle,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub id: String,
    pub address: String,
    pub status: NodeStatus,
    pub status_class: &'static str,
    pub value: String,
    pub salt: String,
    pub commitment: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderScene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
    pub rows: Vec<TableRow>,
}

pub fn build_scene(
    state: &SimulationState,
    hovered: Option<&str>,
    config: &SimulationConfig,
) -> RenderScene {
    let ids: Vec<&str> = state.nodes.iter().map(|n| n.id.as_str()).collect();
    let positions = layout_positions(&ids, config.ring_radius);
    let is_hovered = |id: &str| hovered.map_or(false, |h| h == id);

    let nodes = state
        .nodes
        .iter()
        .map(|node| SceneNode {
            id: node.id.clone(),
            label: short_address(&node.address),
            position: positions.get(&node.id).copied().unwrap_or_default(),
            style: node_style(node.status, config.node_radius, is_hovered(&node.id)),
            hovered: is_hovered(&node.id),
        })
        .collect();

    // Edges whose endpoints have no position are not drawn.
    let edges = state
        .edges
        .iter()
        .filter_map(|edge| {
            let source = positions.get(&edge.source)?;
            let target = positions.get(&edge.target)?;
            let highlighted = hovered.map_or(false, |h| edge.touches(h));
            Some(SceneEdge {
                source: edge.source.clone(),
                target: edge.target.clone(),
                points: edge_curve(*source, *target, config.curve_segments),
                style: edge_style(edge.delta, highlighted),
                highlighted,
            })
        })
        .collect();

    let rows = state
        .nodes
        .iter()
        .map(|node| TableRow {
            id: node.id.clone(),
            address: truncate(Some(node.address.as_str()), 8),
            status: node.status,
            status_class: status_class(node.status),
            value: node.value.map_or_else(|| EMPTY_CELL.to_string(), |v| v.to_string()),
            salt: truncate(node.salt.as_deref(), 6),
            commitment: truncate(node.commitment.as_deref(), 8),
            highlighted: is_hovered(&node.id),
        })
        .collect();

    RenderScene { nodes, edges, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::build_ring;
    use crate::types::{SimEdge, SimNode, SimulationPhase};

    fn state(n: usize) -> SimulationState {
        let nodes: Vec<SimNode> = (0..n)
            .map(|i| SimNode::pending(format!("node-{}", i), format!("0x{:040x}", i + 1)))
            .collect();
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let edges = build_ring(&ids);
        SimulationState {
            phase: SimulationPhase::CommitWork,
            nodes,
            edges,
            is_running: false,
            is_paused: false,
        }
    }

    #[test]
    fn test_scene_shapes() {
        let config = SimulationConfig::default();
        let scene = build_scene(&state(6), None, &config);
        assert_eq!(scene.nodes.len(), 6);
        assert_eq!(scene.edges.len(), 6);
        assert_eq!(scene.rows.len(), 6);
        for edge in &scene.edges {
            assert_eq!(edge.points.len(), config.curve_segments + 1);
            assert!(!edge.highlighted);
        }
        let row = &scene.rows[0];
        assert_eq!(row.value, EMPTY_CELL);
        assert_eq!(row.salt, EMPTY_CELL);
        assert_eq!(row.address, "0x000000...");
    }

    #[test]
    fn test_edge_endpoints_match_node_positions() {
        let config = SimulationConfig::default();
        let scene = build_scene(&state(5), None, &config);
        for edge in &scene.edges {
            let src = scene.nodes.iter().find(|n| n.id == edge.source).unwrap();
            assert_eq!(edge.points[0], src.position);
        }
    }

    #[test]
    fn test_hover_highlights_node_row_and_incident_edges() {
        let config = SimulationConfig::default();
        let scene = build_scene(&state(6), Some("node-2"), &config);

        let hovered: Vec<&str> = scene.nodes.iter().filter(|n| n.hovered).map(|n| n.id.as_str()).collect();
        assert_eq!(hovered, vec!["node-2"]);

        let rows: Vec<&str> = scene.rows.iter().filter(|r| r.highlighted).map(|r| r.id.as_str()).collect();
        assert_eq!(rows, vec!["node-2"]);

        let edges: Vec<(&str, &str)> = scene
            .edges
            .iter()
            .filter(|e| e.highlighted)
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(edges, vec![("node-1", "node-2"), ("node-2", "node-3")]);
    }

    #[test]
    fn test_unknown_hover_matches_nothing() {
        let config = SimulationConfig::default();
        let scene = build_scene(&state(3), Some("node-99"), &config);
        assert!(scene.nodes.iter().all(|n| !n.hovered));
        assert!(scene.edges.iter().all(|e| !e.highlighted));
    }

    #[test]
    fn test_dangling_edge_skipped() {
        let config = SimulationConfig::default();
        let mut s = state(3);
        s.edges.push(SimEdge::new("node-0", "ghost"));
        let scene = build_scene(&s, None, &config);
        assert_eq!(scene.edges.len(), 3);
    }
}
