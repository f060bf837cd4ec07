//! WebAssembly bindings for the board generator.
//!
//! This module exposes board generation to the browser clients through
//! wasm-bindgen. Everything crosses the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::board::{generate_board, LayoutParams};
use crate::presets::{preset_catalog, preset_definition};

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Generate a board graph from layout parameters JSON.
///
/// Missing fields take their defaults (radius 2, hex size 100, no assignments).
/// Ports are not placed.
#[wasm_bindgen(js_name = generateBoard)]
pub fn generate_board_json(params_json: &str) -> Result<String, JsValue> {
    let params: LayoutParams = serde_json::from_str(params_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid layout params: {}", e)))?;

    let graph = generate_board(&params);
    serde_json::to_string(&graph)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize board: {}", e)))
}

/// Generate a standard board from a preset, with harbors placed
#[wasm_bindgen(js_name = generatePresetBoard)]
pub fn generate_preset_board(preset_id: &str, seed: Option<String>) -> Result<String, JsValue> {
    let preset = preset_definition(preset_id, seed.as_deref())
        .map_err(|e| JsValue::from_str(&format!("Preset failed: {}", e)))?;

    let graph = generate_board(&preset.layout_params()).with_standard_ports();
    serde_json::to_string(&graph)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize board: {}", e)))
}

/// List available presets as a JSON array of `{ id, name }`
#[wasm_bindgen(js_name = listPresets)]
pub fn list_presets() -> String {
    serde_json::to_string(&preset_catalog()).unwrap_or_else(|_| "[]".to_string())
}
