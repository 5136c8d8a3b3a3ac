// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CRPC Protocol Simulator - Errors

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Input-boundary errors. Phase processing itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("unknown phase: {0}")]
    UnknownPhase(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("value {value} for {node_id} is outside 0..=100")]
    ValueOutOfRange { node_id: String, value: i64 },
    #[error("{0} has already committed its value")]
    NodeLocked(String),
    #[error("malformed config json: {0}")]
    Config(#[from] serde_json::Error),
}
