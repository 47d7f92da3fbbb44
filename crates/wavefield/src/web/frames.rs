//! requestAnimationFrame scheduling

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::platform::FrameHandle;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Holds the one animation callback a pipeline uses
///
/// The callback is installed by the host after the controller exists (it
/// needs a weak reference to it). Until then frame requests are refused.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the callback invoked with the frame timestamp
    pub fn install(&self, callback: FrameCallback) {
        *self.callback.borrow_mut() = Some(callback);
    }

    /// Drop the callback; later requests are refused
    pub fn clear(&self) {
        self.callback.borrow_mut().take();
    }

    pub(super) fn request(&self, window: &Window) -> Option<FrameHandle> {
        let callback = self.callback.borrow();
        let callback = callback.as_ref()?;
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::debug!("[frames] requestAnimationFrame failed: {:?}", err);
                None
            }
        }
    }

    pub(super) fn cancel(&self, window: &Window, handle: FrameHandle) {
        if let Err(err) = window.cancel_animation_frame(handle) {
            tracing::debug!("[frames] cancelAnimationFrame failed: {:?}", err);
        }
    }
}
