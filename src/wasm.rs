//! JavaScript bindings.

use wasm_bindgen::prelude::*;

/// Render markdown; returns `{ content, error }`.
#[wasm_bindgen(js_name = toHTML)]
pub fn to_html(text: &str) -> Result<JsValue, JsValue> {
    let result = crate::to_html(text);
    serde_wasm_bindgen::to_value(&result).map_err(JsValue::from)
}

/// Escape HTML special characters.
#[wasm_bindgen(js_name = escape)]
pub fn escape(html: &str, encode: bool) -> String {
    crate::escape(html, encode).into_owned()
}
