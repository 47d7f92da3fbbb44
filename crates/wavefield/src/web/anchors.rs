//! Surface and fallback anchor elements

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::dom_error;
use crate::tier::TierError;

/// Layer styles for anchors this crate creates itself
const LAYER_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("inset", "0"),
    ("z-index", "-1"),
    ("pointer-events", "none"),
    ("overflow", "hidden"),
];

/// Gradient painted into a fallback element created by this crate
pub const DEFAULT_FALLBACK_BACKGROUND: &str =
    "radial-gradient(ellipse at 50% 120%, #1b3a57 0%, #0b1320 60%, #05070d 100%)";

/// An anchor element and whether it was created here
#[derive(Clone, Debug)]
pub struct Anchor {
    pub element: HtmlElement,
    pub created: bool,
}

/// Look up `id`, creating a `<div>` on `<body>` when it is missing
pub fn ensure_anchor(document: &Document, id: &str) -> Result<Anchor, TierError> {
    if let Some(element) = document.get_element_by_id(id) {
        let element = element
            .dyn_into::<HtmlElement>()
            .map_err(|_| TierError::MissingAnchor(id.to_string()))?;
        return Ok(Anchor {
            element,
            created: false,
        });
    }

    let body = document
        .body()
        .ok_or_else(|| TierError::MissingAnchor(id.to_string()))?;
    let element = document
        .create_element("div")
        .map_err(|e| dom_error("create anchor", e))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| TierError::MissingAnchor(id.to_string()))?;
    element.set_id(id);

    let style = element.style();
    for (name, value) in LAYER_STYLE {
        style
            .set_property(name, value)
            .map_err(|e| dom_error("style anchor", e))?;
    }
    body.append_child(&element)
        .map_err(|e| dom_error("append anchor", e))?;

    tracing::debug!("[anchors] Created #{}", id);
    Ok(Anchor {
        element,
        created: true,
    })
}

/// Toggle an element through `visibility` only
pub fn set_visible(element: &HtmlElement, visible: bool) {
    let value = if visible { "visible" } else { "hidden" };
    if let Err(err) = element.style().set_property("visibility", value) {
        tracing::debug!("[anchors] visibility update failed: {:?}", err);
    }
}
