// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CRPC Protocol Simulator - Simulation Controller

use std::collections::HashMap;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

use crate::autoplay::AutoplayTicker;
use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::hex::{generate_hex_string, ADDRESS_DIGITS};
use crate::phase::{process_phase, PhaseOutput};
use crate::scene::{build_scene, RenderScene};
use crate::topology::build_ring;
use crate::types::*;

/// Inclusive bounds for manually entered work values.
pub const MANUAL_VALUE_MIN: i64 = 0;
pub const MANUAL_VALUE_MAX: i64 = 100;

// ─── SimulationController struct ────────────────────────────────────────────

/// Sole owner and writer of the simulation state.
#[wasm_bindgen]
pub struct SimulationController {
    pub(crate) config: SimulationConfig,
    pub(crate) state: SimulationState,
    pub(crate) ticker: AutoplayTicker,
    pub(crate) rng: ChaCha8Rng,
    /// False until the current phase's transform has run. Only a fresh or
    /// reset state sits at CommitWork without it.
    pub(crate) phase_applied: bool,

    // UI input, survives reset
    pub(crate) use_random_values: bool,
    pub(crate) manual_values: HashMap<String, i64>,
    pub(crate) hovered_node_id: Option<String>,

    pub(crate) disposed: bool,
}

/// `node_count` fresh Pending nodes and their ring.
pub fn initial_state<R: rand::Rng + ?Sized>(node_count: u32, rng: &mut R) -> SimulationState {
    let nodes: Vec<SimNode> = (0..node_count)
        .map(|i| SimNode::pending(format!("node-{}", i), generate_hex_string(rng, ADDRESS_DIGITS)))
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

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl SimulationController {
    pub fn with_config(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let state = initial_state(config.node_count, &mut rng);
        info!(
            "crpc simulation created: {} nodes, autoplay every {} ms",
            config.node_count, config.autoplay_interval_ms
        );
        Ok(Self {
            ticker: AutoplayTicker::new(config.autoplay_interval_ms),
            config,
            state,
            rng,
            phase_applied: false,
            use_random_values: true,
            manual_values: HashMap::new(),
            hovered_node_id: None,
            disposed: false,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> SimulationPhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    pub fn phase_applied(&self) -> bool {
        self.phase_applied
    }

    pub fn ticker(&self) -> &AutoplayTicker {
        &self.ticker
    }

    pub fn hovered_node_id(&self) -> Option<&str> {
        self.hovered_node_id.as_deref()
    }

    pub fn value_mode(&self) -> ValueMode {
        if self.use_random_values {
            ValueMode::Random
        } else {
            ValueMode::Manual(self.manual_values.clone())
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            state: self.state.clone(),
            phase_index: self.state.phase.index(),
            phase_info: self.state.phase.info(),
            phase_applied: self.phase_applied,
            hovered_node_id: self.hovered_node_id.clone(),
            use_random_values: self.use_random_values,
            manual_values: self.manual_values.clone(),
        }
    }

    pub fn scene(&self) -> RenderScene {
        build_scene(&self.state, self.hovered_node_id.as_deref(), &self.config)
    }

    fn run_phase(&mut self, phase: SimulationPhase) -> PhaseOutput {
        let mode = self.value_mode();
        process_phase(
            &self.state.nodes,
            &self.state.edges,
            phase,
            &mode,
            &mut self.rng,
            self.config.validation_probability,
        )
    }

    fn commit(&mut self, phase: SimulationPhase, output: PhaseOutput) {
        self.state.phase = phase;
        self.state.nodes = output.nodes;
        self.state.edges = output.edges;
        self.phase_applied = true;
        debug!("phase committed: {}", phase);
    }

    fn stop_autoplay(&mut self) {
        if self.ticker.cancel() {
            debug!("autoplay ticker cancelled");
        }
        self.state.is_running = false;
    }

    /// Move to the next phase. A fresh state first applies CommitWork in
    /// place; at `Verification` this only stops autoplay.
    /// Returns whether the state changed.
    pub fn advance_phase(&mut self) -> bool {
        if !self.phase_applied {
            let phase = self.state.phase;
            let output = self.run_phase(phase);
            self.commit(phase, output);
            return true;
        }
        match self.state.phase.next() {
            Some(next) => {
                let output = self.run_phase(next);
                self.commit(next, output);
                true
            }
            None => {
                self.stop_autoplay();
                self.state.is_paused = false;
                info!("simulation reached {}", self.state.phase);
                false
            }
        }
    }

    /// Apply `phase` to the current state without replaying skipped phases.
    pub fn jump_to_phase(&mut self, phase: SimulationPhase) {
        self.stop_autoplay();
        let output = self.run_phase(phase);
        self.commit(phase, output);
        self.state.is_paused = false;
    }

    /// Start autoplay, or toggle pause while running.
    pub fn play(&mut self) {
        if self.disposed {
            return;
        }
        if self.state.is_running {
            self.state.is_paused = !self.state.is_paused;
            if self.state.is_paused {
                self.ticker.cancel();
                debug!("autoplay paused");
            } else {
                self.ticker.arm();
                debug!("autoplay resumed");
            }
        } else {
            self.state.is_running = true;
            self.state.is_paused = false;
            let handle = self.ticker.arm();
            info!("autoplay started (ticker generation {})", handle.generation);
        }
    }

    /// Same toggle as `play` while running; no-op otherwise.
    pub fn pause(&mut self) {
        if self.state.is_running {
            self.play();
        }
    }

    /// Fresh Pending nodes and ring; value mode and manual inputs are kept.
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.state = initial_state(self.config.node_count, &mut self.rng);
        self.phase_applied = false;
        info!("simulation reset to {} nodes", self.config.node_count);
    }

    /// Feed host time to the autoplay ticker. Returns whether a tick fired.
    pub fn tick(&mut self, elapsed_ms: f64) -> bool {
        if !self.ticker.poll(elapsed_ms) {
            return false;
        }
        self.advance_phase();
        true
    }

    /// Teardown: no tick can mutate state afterwards.
    pub fn dispose(&mut self) {
        self.stop_autoplay();
        self.state.is_paused = false;
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn set_hover(&mut self, node_id: Option<String>) {
        self.hovered_node_id = node_id;
    }

    pub fn set_random_values(&mut self, enabled: bool) {
        self.use_random_values = enabled;
    }

    pub fn toggle_random_values(&mut self) -> bool {
        self.use_random_values = !self.use_random_values;
        self.use_random_values
    }

    /// Record a manual value for the next CommitWork.
    ///
    /// Unknown ids are ignored. Nodes past `Pending` are locked.
    pub fn set_manual_value(&mut self, node_id: &str, value: i64) -> Result<(), SimError> {
        let Some(node) = self.state.node(node_id) else {
            debug!("ignoring manual value for unknown node {}", node_id);
            return Ok(());
        };
        if !(MANUAL_VALUE_MIN..=MANUAL_VALUE_MAX).contains(&value) {
            return Err(SimError::ValueOutOfRange { node_id: node_id.to_string(), value });
        }
        if node.status != NodeStatus::Pending {
            return Err(SimError::NodeLocked(node_id.to_string()));
        }
        self.manual_values.insert(node_id.to_string(), value);
        Ok(())
    }

    pub fn manual_values(&self) -> &HashMap<String, i64> {
        &self.manual_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(nodes: u32) -> SimulationController {
        SimulationController::with_config(SimulationConfig {
            node_count: nodes,
            seed: Some(42),
            ..SimulationConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let sim = seeded(6);
        let state = sim.state();
        assert_eq!(state.phase, SimulationPhase::CommitWork);
        assert_eq!(state.nodes.len(), 6);
        assert_eq!(state.edges.len(), 6);
        assert!(!state.is_running && !state.is_paused);
        assert_eq!(state.nodes[3].id, "node-3");
        assert!(crate::hex::is_hex_string(&state.nodes[3].address, ADDRESS_DIGITS));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = SimulationController::with_config(SimulationConfig::with_node_count(0));
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_play_pause_toggle() {
        let mut sim = seeded(3);
        sim.play();
        assert!(sim.is_running() && !sim.is_paused());
        assert!(sim.ticker().is_armed());

        sim.pause();
        assert!(sim.is_running() && sim.is_paused());
        assert!(!sim.ticker().is_armed());

        sim.play();
        assert!(!sim.is_paused());
        assert!(sim.ticker().is_armed());
    }

    #[test]
    fn test_pause_when_stopped_is_noop() {
        let mut sim = seeded(3);
        sim.pause();
        assert!(!sim.is_running() && !sim.is_paused());
        assert!(!sim.ticker().is_armed());
    }

    #[test]
    fn test_paused_ticks_do_nothing() {
        let mut sim = seeded(3);
        sim.play();
        sim.pause();
        assert!(!sim.tick(10_000.0));
        assert_eq!(sim.phase(), SimulationPhase::CommitWork);
    }

    #[test]
    fn test_manual_value_validation() {
        let mut sim = seeded(2);
        assert!(matches!(
            sim.set_manual_value("node-0", 101),
            Err(SimError::ValueOutOfRange { value: 101, .. })
        ));
        assert!(sim.set_manual_value("node-0", 100).is_ok());
        assert!(sim.set_manual_value("ghost", 5).is_ok());
        assert!(sim.set_manual_value("ghost", 500).is_ok());
        assert!(sim.set_manual_value("ghost", -1).is_ok());
        assert!(!sim.manual_values().contains_key("ghost"));

        sim.jump_to_phase(SimulationPhase::CommitWork);
        assert!(matches!(sim.set_manual_value("node-0", 3), Err(SimError::NodeLocked(_))));
    }

    #[test]
    fn test_advance_past_end_while_paused_clears_pause() {
        let mut sim = seeded(3);
        sim.play();
        sim.pause();
        while sim.advance_phase() {}
        assert_eq!(sim.phase(), SimulationPhase::Verification);
        assert!(!sim.is_running());
        assert!(!sim.is_paused());
        assert!(!sim.snapshot().state.is_paused);
    }

    #[test]
    fn test_config_drives_ticker_and_value_mode() {
        let sim = SimulationController::with_config(SimulationConfig {
            node_count: 4,
            autoplay_interval_ms: 1_500.0,
            seed: Some(7),
            ..SimulationConfig::default()
        })
        .unwrap();
        assert_eq!(sim.config().node_count, 4);
        assert_eq!(sim.ticker().interval_ms(), 1_500.0);
        assert!(sim.value_mode().is_random());
    }

    #[test]
    fn test_disposed_cannot_restart() {
        let mut sim = seeded(3);
        sim.play();
        sim.dispose();
        assert!(sim.is_disposed());
        assert!(!sim.is_running());
        sim.play();
        assert!(!sim.is_running());
        assert!(!sim.tick(60_000.0));
    }
}
