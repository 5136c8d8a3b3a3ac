// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CRPC Protocol Simulator - Status Styling
//
// Lookup tables the ring view and details table share.

use serde::Serialize;

use crate::types::NodeStatus;

const HOVER_SCALE: f64 = 1.2;
const EMISSIVE_IDLE: f64 = 0.5;
const EMISSIVE_HOVER: f64 = 1.0;

const EDGE_POSITIVE: &str = "#00ffe5";
const EDGE_NEGATIVE: &str = "#ff4242";
const EDGE_NEUTRAL: &str = "#3a4a64";
const EDGE_HIGHLIGHT: &str = "#ffffff";

/// Placeholder for an absent table cell.
pub const EMPTY_CELL: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStyle {
    pub color: &'static str,
    pub radius: f64,
    pub emissive_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeStyle {
    pub color: &'static str,
    pub width: f64,
}

pub fn status_color(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Pending => "#6e7884",
        NodeStatus::Committed => "#00a8ff",
        NodeStatus::Revealed => "#00ff88",
        NodeStatus::Validated => "#a742f5",
        NodeStatus::Disputed => "#ff4242",
    }
}

/// CSS class suffix used by the table badges, e.g. `crpc-node-validated`.
pub fn status_class(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Pending => "crpc-node-pending",
        NodeStatus::Committed => "crpc-node-committed",
        NodeStatus::Revealed => "crpc-node-revealed",
        NodeStatus::Validated => "crpc-node-validated",
        NodeStatus::Disputed => "crpc-node-disputed",
    }
}

pub fn node_style(status: NodeStatus, base_radius: f64, hovered: bool) -> NodeStyle {
    NodeStyle {
        color: status_color(status),
        radius: if hovered { base_radius * HOVER_SCALE } else { base_radius },
        emissive_intensity: if hovered { EMISSIVE_HOVER } else { EMISSIVE_IDLE },
    }
}

/// Zero and missing deltas both render neutral.
pub fn edge_style(delta: Option<i64>, highlighted: bool) -> EdgeStyle {
    let (color, width) = match delta {
        Some(d) if d != 0 => {
            let color = if d > 0 { EDGE_POSITIVE } else { EDGE_NEGATIVE };
            (color, (d.abs() as f64 / 10.0).clamp(1.0, 5.0))
        }
        _ => (EDGE_NEUTRAL, 1.0),
    };
    if highlighted {
        EdgeStyle { color: EDGE_HIGHLIGHT, width: width + 1.0 }
    } else {
        EdgeStyle { color, width }
    }
}

/// `0x1234...cdef`: first six and last four characters.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn truncate(value: Option<&str>, length: usize) -> String {
    match value {
        None | Some("") => EMPTY_CELL.to_string(),
        Some(s) if s.chars().count() > length => {
            format!("{}...", s.chars().take(length).collect::<String>())
        }
        Some(s) => s.to_string(),
    }
}
