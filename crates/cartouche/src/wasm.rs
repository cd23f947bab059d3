//! WebAssembly bindings for Cartouche
//!
//! Browser-friendly wrappers around detection and rendering. Configuration is
//! passed as a JSON string (empty for none); errors are thrown as JavaScript
//! errors.

use wasm_bindgen::prelude::*;

use crate::core::Config;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn parse_config(config_json: &str) -> Result<Config, JsValue> {
    if config_json.trim().is_empty() {
        return Ok(Config::default());
    }
    Config::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resolve the diagram type id for `input`
///
/// # Arguments
/// * `input` - Diagram text or a bare type tag (e.g. "graph TD")
/// * `config_json` - Site configuration as JSON, or an empty string
#[wasm_bindgen]
pub fn detect_type(input: &str, config_json: &str) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    crate::detect(input, &config)
        .map(str::to_string)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render `input` and return the output as a JSON object
/// (`diagramType`, `body`, `styles`)
#[wasm_bindgen]
pub fn render_diagram(input: &str, config_json: &str) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let output =
        crate::render(input, &config).map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    serde_json::to_string(&output).map_err(|e| JsValue::from_str(&e.to_string()))
}
