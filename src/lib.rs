// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CRPC Protocol Simulator ("Commit-Reveal Protocol with Consistency")

pub mod types;
pub mod error;
pub mod config;
pub mod hex;
pub mod topology;
pub mod phase;
pub mod autoplay;
pub mod style;
pub mod scene;
pub mod simulation;

pub use types::*;
pub use error::SimError;
pub use config::SimulationConfig;
pub use phase::{process_phase, ring_delta_sum, PhaseOutput};
pub use scene::{build_scene, RenderScene};
pub use simulation::SimulationController;

use wasm_bindgen::prelude::*;

fn to_js_error(err: SimError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Maps become plain objects so the UI can index them by node id.
fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    serde::Serialize::serialize(value, &serializer).unwrap_or(JsValue::NULL)
}

/// Install the browser console logger at `level` (trace..error, default info).
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };
    #[cfg(target_arch = "wasm32")]
    wasm_logger::init(wasm_logger::Config::new(log_level));
    log::info!("crpc engine logging at {}", log_level);
}

/// Title and description for every phase, in order.
#[wasm_bindgen]
pub fn phase_catalog() -> JsValue {
    let infos: Vec<PhaseInfo> = SimulationPhase::ALL.iter().map(|p| p.info()).collect();
    to_js(&infos)
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl SimulationController {
    #[wasm_bindgen(constructor)]
    pub fn new(node_count: u32) -> Result<SimulationController, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Self::with_config(SimulationConfig::with_node_count(node_count)).map_err(to_js_error)
    }

    /// Build from a JSON config; omitted fields take defaults.
    #[wasm_bindgen(js_name = with_config)]
    pub fn from_config_json(json: &str) -> Result<SimulationController, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let config = SimulationConfig::from_json(json).map_err(to_js_error)?;
        Self::with_config(config).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = advance_phase)]
    pub fn js_advance_phase(&mut self) -> bool {
        self.advance_phase()
    }

    #[wasm_bindgen(js_name = jump_to_phase)]
    pub fn js_jump_to_phase(&mut self, phase: &str) -> Result<(), JsValue> {
        let phase: SimulationPhase = phase.parse().map_err(to_js_error)?;
        self.jump_to_phase(phase);
        Ok(())
    }

    #[wasm_bindgen(js_name = play)]
    pub fn js_play(&mut self) {
        self.play();
    }

    #[wasm_bindgen(js_name = pause)]
    pub fn js_pause(&mut self) {
        self.pause();
    }

    #[wasm_bindgen(js_name = reset)]
    pub fn js_reset(&mut self) {
        self.reset();
    }

    /// Call from the host frame loop with milliseconds since the last call.
    #[wasm_bindgen(js_name = tick)]
    pub fn js_tick(&mut self, elapsed_ms: f64) -> bool {
        self.tick(elapsed_ms)
    }

    #[wasm_bindgen(js_name = dispose)]
    pub fn js_dispose(&mut self) {
        self.dispose();
    }

    #[wasm_bindgen(js_name = set_hover)]
    pub fn js_set_hover(&mut self, node_id: Option<String>) {
        self.set_hover(node_id);
    }

    #[wasm_bindgen(js_name = set_random_values)]
    pub fn js_set_random_values(&mut self, enabled: bool) {
        self.set_random_values(enabled);
    }

    pub fn set_node_value(&mut self, node_id: &str, value: i32) -> Result<(), JsValue> {
        self.set_manual_value(node_id, value as i64).map_err(to_js_error)
    }

    pub fn get_state(&self) -> JsValue {
        to_js(&self.state)
    }

    pub fn get_snapshot(&self) -> JsValue {
        to_js(&self.snapshot())
    }

    pub fn get_scene(&self) -> JsValue {
        to_js(&self.scene())
    }

    pub fn get_phase_info(&self) -> JsValue {
        to_js(&self.state.phase.info())
    }

    pub fn get_phase(&self) -> String {
        self.state.phase.name().to_string()
    }
}
