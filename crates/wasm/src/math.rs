//! Binding to the page's auto-render function for math.

use tracing::warn;
use villani_page::MathRenderOptions;
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    // Throws a ReferenceError when the renderer script is absent; `catch`
    // turns that into an `Err`.
    #[wasm_bindgen(catch, js_name = renderMathInElement)]
    fn render_math_in_element(element: &Element, options: &JsValue) -> Result<(), JsValue>;
}

pub struct MathRenderer {
    options: JsValue,
}

impl MathRenderer {
    pub fn new(options: &MathRenderOptions) -> Self {
        let options = serde_json::to_string(options)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok())
            .unwrap_or(JsValue::UNDEFINED);
        Self { options }
    }

    pub fn render(&self, element: &Element) {
        if let Err(e) = render_math_in_element(element, &self.options) {
            warn!(error = ?e, "math rendering failed");
        }
    }
}
