//! Capability probe

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement};

use crate::capability::Capability;

/// Context ids tried on the probe canvas, best first
const GPU_CONTEXTS: [&str; 2] = ["webgl2", "webgl"];

/// Report which tier the browser can run
///
/// Uses a detached canvas that is dropped on return. Exceptions count as
/// "not supported".
pub fn probe_capability(document: &Document) -> Capability {
    let gpu = has_gpu_context(document);
    let css_3d = !gpu && has_css_3d();
    Capability::from_checks(gpu, css_3d)
}

fn has_gpu_context(document: &Document) -> bool {
    let Some(canvas) = document
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        return false;
    };

    GPU_CONTEXTS
        .iter()
        .any(|id| matches!(canvas.get_context(id), Ok(Some(_))))
}

fn has_css_3d() -> bool {
    web_sys::css::supports_with_value("transform-style", "preserve-3d").unwrap_or(false)
}
