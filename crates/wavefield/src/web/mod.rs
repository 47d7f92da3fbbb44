//! Browser platform
//!
//! [`WebPlatform`] implements [`Platform`](crate::Platform) on `web-sys` and
//! owns the three tier renderers:
//!
//! - `gpu`: wgpu point renderer over WebGPU or WebGL2
//! - `dom`: one CSS-3D-transformed element per point
//! - `fallback`: the static gradient element

mod anchors;
mod dom;
mod fallback;
mod frames;
mod gpu;
mod platform;
mod probe;

pub use frames::FrameScheduler;
pub use platform::WebPlatform;

use wasm_bindgen::JsValue;

use crate::tier::TierError;

/// Convert a JS exception into a DOM tier error
pub(crate) fn dom_error(context: &str, err: JsValue) -> TierError {
    TierError::Dom(format!("{}: {:?}", context, err))
}
