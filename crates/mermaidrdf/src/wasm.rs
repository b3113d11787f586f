//! WebAssembly bindings for mermaidrdf
//!
//! Browser-friendly wrappers used by the in-page diagram editor.

use wasm_bindgen::prelude::*;

use crate::core::Graph;
use crate::plugins::Orchestrator;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    // Logs go to the browser console
    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Translate a diagram (or Markdown with diagrams) into Turtle
///
/// Throws a JavaScript error if the document is rejected.
#[wasm_bindgen]
pub fn translate_diagram(input: &str) -> Result<String, JsValue> {
    Orchestrator::new()
        .translate(input)
        .map(|(graph, _)| graph.to_turtle())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render Turtle statements back into a flowchart
#[wasm_bindgen]
pub fn render_turtle(turtle: &str) -> Result<String, JsValue> {
    let graph = Graph::parse_statements(turtle).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Orchestrator::new()
        .render(&graph)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Translate a diagram and return JSON with the Turtle, skipped lines and any error
///
/// # Returns
/// * JSON string with fields: turtle, skipped, error
#[wasm_bindgen]
pub fn translate_diagram_json(input: &str) -> String {
    match Orchestrator::new().translate(input) {
        Ok((graph, report)) => serde_json::json!({
            "turtle": graph.to_turtle(),
            "skipped": report.notable_skips().collect::<Vec<_>>(),
            "error": null,
        }),
        Err(e) => serde_json::json!({
            "turtle": "",
            "skipped": [],
            "error": e.to_string(),
        }),
    }
    .to_string()
}
