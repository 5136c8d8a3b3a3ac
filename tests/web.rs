//! Browser tests for the wasm bindings.
//! Run with: wasm-pack test --headless --firefox

#![cfg(target_arch = "wasm32")]

use crpc_engine::*;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_constructor_defaults() {
    let sim = SimulationController::new(6).unwrap();
    assert_eq!(sim.get_phase(), "CommitWork");
    assert!(sim.get_state().is_object());
}

#[wasm_bindgen_test]
fn test_constructor_rejects_zero_nodes() {
    assert!(SimulationController::new(0).is_err());
}

#[wasm_bindgen_test]
fn test_jump_by_name() {
    let mut sim = SimulationController::new(4).unwrap();
    sim.js_jump_to_phase("ComputeDelta").unwrap();
    assert_eq!(sim.get_phase(), "ComputeDelta");
    assert!(sim.js_jump_to_phase("Settlement").is_err());
}

#[wasm_bindgen_test]
fn test_config_json() {
    let sim = SimulationController::from_config_json(r#"{ "node_count": 3, "seed": 1 }"#).unwrap();
    assert_eq!(sim.state().nodes.len(), 3);
    assert!(SimulationController::from_config_json(r#"{ "node_count": 0 }"#).is_err());
}

#[wasm_bindgen_test]
fn test_scene_and_catalog() {
    let mut sim = SimulationController::new(6).unwrap();
    sim.js_set_hover(Some("node-1".to_string()));
    assert!(sim.get_scene().is_object());
    assert!(sim.get_snapshot().is_object());
    assert!(phase_catalog().is_array());
}

#[wasm_bindgen_test]
fn test_tick_drives_autoplay() {
    let mut sim = SimulationController::new(6).unwrap();
    sim.js_play();
    assert!(!sim.js_tick(1_000.0));
    assert!(sim.js_tick(2_000.0));
    sim.js_dispose();
    assert!(!sim.js_tick(10_000.0));
}

#[wasm_bindgen_test]
fn test_snapshot_manual_values_index_by_node_id() {
    let mut sim = SimulationController::new(3).unwrap();
    sim.js_set_random_values(false);
    sim.set_node_value("node-1", 42).unwrap();

    let snapshot = sim.get_snapshot();
    let manual = Reflect::get(&snapshot, &JsValue::from_str("manual_values")).unwrap();
    let value = Reflect::get(&manual, &JsValue::from_str("node-1")).unwrap();
    assert_eq!(value.as_f64(), Some(42.0));
}
