// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CRPC Protocol Simulator - Ring Topology

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::types::SimEdge;

/// Default ring radius in scene units.
pub const RING_RADIUS: f64 = 3.0;

/// How far the curve control point is pushed out relative to the chord midpoint.
const CURVE_BULGE: f64 = 1.1;

/// Default number of segments per edge polyline.
pub const CURVE_SEGMENTS: usize = 10;

/// Directed cycle: node i points at node (i + 1) mod N.
///
/// A single node yields a self-loop. Ids are assumed unique.
pub fn build_ring<S: AsRef<str>>(node_ids: &[S]) -> Vec<SimEdge> {
    let n = node_ids.len();
    (0..n)
        .map(|i| SimEdge::new(node_ids[i].as_ref(), node_ids[(i + 1) % n].as_ref()))
        .collect()
}

/// Ring position for node `index` of `count`, on the y = 0 plane.
pub fn ring_position(index: usize, count: usize, radius: f64) -> [f64; 3] {
    if count == 0 {
        return [0.0, 0.0, 0.0];
    }
    let angle = (index as f64 / count as f64) * PI * 2.0;
    [radius * angle.cos(), 0.0, radius * angle.sin()]
}

/// Evenly spaced positions on a horizontal circle, keyed by node id.
pub fn layout_positions<S: AsRef<str>>(node_ids: &[S], radius: f64) -> HashMap<String, [f64; 3]> {
    let n = node_ids.len();
    node_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_ref().to_string(), ring_position(i, n, radius)))
        .collect()
}

/// Quadratic Bezier from `source` to `target`, bowed away from the ring centre.
///
/// Returns `segments + 1` points including both endpoints.
pub fn edge_curve(source: [f64; 3], target: [f64; 3], segments: usize) -> Vec<[f64; 3]> {
    let mut control = [
        (source[0] + target[0]) / 2.0,
        (source[1] + target[1]) / 2.0,
        (source[2] + target[2]) / 2.0,
    ];
    let dist = (control[0].powi(2) + control[1].powi(2) + control[2].powi(2)).sqrt();
    // Normalizing then scaling to 1.1 * dist is a plain scale by 1.1.
    if dist > 0.0 {
        for c in control.iter_mut() {
            *c *= CURVE_BULGE;
        }
    }

    let segments = segments.max(1);
    (0..=segments)
        .map(|step| {
            let t = step as f64 / segments as f64;
            let a = (1.0 - t) * (1.0 - t);
            let b = 2.0 * (1.0 - t) * t;
            let c = t * t;
            [
                a * source[0] + b * control[0] + c * target[0],
                a * source[1] + b * control[1] + c * target[1],
                a * source[2] + b * control[2] + c * target[2],
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("node-{}", i)).collect()
    }

    #[test]
    fn test_empty_ring() {
        let empty: Vec<String> = Vec::new();
        assert!(build_ring(&empty).is_empty());
        assert!(layout_positions(&empty, RING_RADIUS).is_empty());
    }

    #[test]
    fn test_single_node_self_loop() {
        let edges = build_ring(&["solo"]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "solo");
        assert_eq!(edges[0].target, "solo");
    }

    #[test]
    fn test_ring_wraps_to_first() {
        let edges = build_ring(&ids(6));
        assert_eq!(edges[5].source, "node-5");
        assert_eq!(edges[5].target, "node-0");
        assert!(edges.iter().all(|e| e.delta.is_none() && e.commitment.is_none()));
    }

    #[test]
    fn test_layout_on_circle() {
        let positions = layout_positions(&ids(6), RING_RADIUS);
        assert_eq!(positions.len(), 6);
        let p0 = positions["node-0"];
        assert!((p0[0] - 3.0).abs() < 1e-12 && p0[1] == 0.0 && p0[2].abs() < 1e-12);
        let p3 = positions["node-3"];
        assert!((p3[0] + 3.0).abs() < 1e-12 && p3[2].abs() < 1e-9);
        for p in positions.values() {
            let r = (p[0].powi(2) + p[2].powi(2)).sqrt();
            assert!((r - RING_RADIUS).abs() < 1e-9);
            assert_eq!(p[1], 0.0);
        }
    }

    #[test]
    fn test_layout_idempotent() {
        let a = layout_positions(&ids(7), 2.5);
        let b = layout_positions(&ids(7), 2.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_curve_endpoints_and_bulge() {
        let s = ring_position(0, 4, RING_RADIUS);
        let t = ring_position(1, 4, RING_RADIUS);
        let points = edge_curve(s, t, CURVE_SEGMENTS);
        assert_eq!(points.len(), CURVE_SEGMENTS + 1);
        assert_eq!(points[0], s);
        for k in 0..3 {
            assert!((points[CURVE_SEGMENTS][k] - t[k]).abs() < 1e-12);
        }
        // Apex sits outside the straight chord midpoint.
        let mid = points[CURVE_SEGMENTS / 2];
        let chord_mid_r = ((s[0] + t[0]).powi(2) + (s[2] + t[2]).powi(2)).sqrt() / 2.0;
        let apex_r = (mid[0].powi(2) + mid[2].powi(2)).sqrt();
        assert!(apex_r > chord_mid_r);
    }

    #[test]
    fn test_curve_through_origin_stays_straight() {
        // Opposite nodes: midpoint is the origin, no bulge.
        let s = ring_position(0, 2, RING_RADIUS);
        let t = ring_position(1, 2, RING_RADIUS);
        let points = edge_curve(s, t, 4);
        for p in points {
            assert!(p[2].abs() < 1e-9);
        }
    }

    proptest! {
        #[test]
        fn prop_ring_is_single_cycle(n in 2usize..64) {
            let node_ids = ids(n);
            let edges = build_ring(&node_ids);
            prop_assert_eq!(edges.len(), n);

            let sources: HashSet<&str> = edges.iter().map(|e| e.source.as_str()).collect();
            let targets: HashSet<&str> = edges.iter().map(|e| e.target.as_str()).collect();
            prop_assert_eq!(sources.len(), n);
            prop_assert_eq!(targets.len(), n);

            // Walk successors from node-0; must return after exactly n hops.
            let succ: std::collections::HashMap<&str, &str> = edges
                .iter()
                .map(|e| (e.source.as_str(), e.target.as_str()))
                .collect();
            let mut cur = node_ids[0].as_str();
            for step in 1..=n {
                cur = succ[cur];
                if step < n {
                    prop_assert_ne!(cur, node_ids[0].as_str());
                }
            }
            prop_assert_eq!(cur, node_ids[0].as_str());
        }
    }
}
