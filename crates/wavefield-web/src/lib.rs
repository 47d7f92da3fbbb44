//! Browser entry point for the wave-field background
//!
//! Exposes the `WaveField` class to JavaScript and, at module start, looks
//! for a `<script data-wave-field="auto">` (or `data-preset`) tag to start a
//! page-wide instance without any JS glue.
//!
//! ```js
//! import init, { WaveField } from "./wavefield_web.js";
//! await init();
//! const field = new WaveField();
//! await field.init({ preset: "waves", color: 0xff0000 });
//! // later
//! field.destroy();
//! ```

mod auto;
mod events;

pub use auto::auto_instance;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wavefield::web::WebPlatform;
use wavefield::{InitOptions, PipelineController, TierState};

use events::Listener;

type Controller = PipelineController<WebPlatform>;

/// Initialize panic hook and log routing
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Fails only if a subscriber is already installed
    let _ = tracing_wasm::try_set_as_global_default();
    auto::schedule();
}

/// Shared state behind a `WaveField`
///
/// The controller is taken out of its slot for the duration of the async
/// `init`, so no borrow is held across an await point.
pub(crate) struct Shared {
    controller: RefCell<Option<Controller>>,
    listeners: RefCell<Vec<Listener>>,
    initializing: Cell<bool>,
    destroy_requested: Cell<bool>,
}

impl Shared {
    /// Run `f` on the controller if it is present and not borrowed
    pub(crate) fn with_controller<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
        let mut slot = self.controller.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    }

    fn install_frame_callback(self: &Rc<Self>) {
        let weak: Weak<Shared> = Rc::downgrade(self);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            if let Some(shared) = weak.upgrade() {
                shared.with_controller(|controller| controller.frame(timestamp));
            }
        }) as Box<dyn FnMut(f64)>);

        self.with_controller(|controller| controller.platform().frames().install(callback));
    }

    async fn init(self: Rc<Self>, options: InitOptions) {
        let Some(mut controller) = self.controller.borrow_mut().take() else {
            tracing::info!("[wave-field] init already in progress");
            return;
        };
        let first = controller.state() == TierState::Uninitialized;
        self.initializing.set(true);
        controller.init(&options).await;
        self.initializing.set(false);
        self.finish_init(controller, first);
    }

    /// Return the controller to its slot after `init`
    ///
    /// Applies a destroy requested meanwhile; otherwise attaches listeners,
    /// but only when this call performed the initialization.
    fn finish_init(self: &Rc<Self>, controller: Controller, first: bool) {
        *self.controller.borrow_mut() = Some(controller);

        if self.destroy_requested.replace(false) {
            tracing::info!("[wave-field] Applying destroy requested during init");
            self.destroy();
            return;
        }
        let active = self
            .with_controller(|controller| controller.state().is_active())
            .unwrap_or(false);
        if first && active {
            events::attach(self);
        }
    }

    fn destroy(&self) {
        events::detach(&mut self.listeners.borrow_mut());
        let destroyed = self.with_controller(|controller| {
            controller.destroy();
            controller.platform().frames().clear();
        });
        if destroyed.is_none() {
            // Controller is out of its slot: init is still running
            self.destroy_requested.set(true);
        }
    }
}

impl Drop for Shared {
    /// Covers `free()` from JS without a prior `destroy()`: cancels the
    /// pending frame and removes the window listeners.
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Wave-field background bound to the page
#[wasm_bindgen]
pub struct WaveField {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl WaveField {
    /// Create an uninitialized wave field
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WaveField, JsValue> {
        let platform = WebPlatform::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let shared = Rc::new(Shared {
            controller: RefCell::new(Some(PipelineController::new(platform))),
            listeners: RefCell::new(Vec::new()),
            initializing: Cell::new(false),
            destroy_requested: Cell::new(false),
        });
        shared.install_frame_callback();
        Ok(Self { shared })
    }

    /// Resolve the config, pick a tier and start animating
    ///
    /// `options` is `{ preset?, color?, overrides?, surfaceId?, fallbackId? }`
    /// or `undefined`. Never rejects; malformed options are logged and
    /// ignored.
    pub async fn init(&self, options: JsValue) {
        let options = parse_options(options);
        Rc::clone(&self.shared).init(options).await;
    }

    /// Stop animating and release the active tier
    pub fn destroy(&self) {
        self.shared.destroy();
    }

    /// Lifecycle state, e.g. `"gpuActive"`
    pub fn state(&self) -> String {
        if self.shared.initializing.get() {
            return TierState::ProbingCapability.id().to_string();
        }
        self.shared
            .with_controller(|controller| controller.state().id().to_string())
            .unwrap_or_else(|| TierState::ProbingCapability.id().to_string())
    }

    /// Active tier (`"gpu"`, `"dom"`, `"static"`) or `undefined`
    pub fn tier(&self) -> Option<String> {
        self.shared
            .with_controller(|controller| controller.tier().map(|tier| tier.id().to_string()))
            .flatten()
    }

    /// Resolved config as a plain object, `undefined` before `init`
    pub fn config(&self) -> JsValue {
        self.shared
            .with_controller(|controller| {
                controller
                    .config()
                    .and_then(|config| serde_wasm_bindgen::to_value(config).ok())
            })
            .flatten()
            .unwrap_or(JsValue::UNDEFINED)
    }
}

fn parse_options(options: JsValue) -> InitOptions {
    if options.is_undefined() || options.is_null() {
        return InitOptions::default();
    }
    serde_wasm_bindgen::from_value(options).unwrap_or_else(|err| {
        tracing::warn!("[wave-field] Ignoring malformed options: {}", err);
        InitOptions::default()
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_init_ends_rendered() {
        let field = WaveField::new().unwrap();
        field.init(JsValue::UNDEFINED).await;
        assert!(matches!(
            field.state().as_str(),
            "gpuActive" | "domActive" | "staticFallback"
        ));
        assert!(field.tier().is_some());

        field.destroy();
        assert_eq!(field.state(), "destroyed");
        assert_eq!(field.tier(), None);
    }

    #[wasm_bindgen_test]
    async fn test_anchors_are_created() {
        let field = WaveField::new().unwrap();
        let options = js_sys::JSON::parse(r#"{"surfaceId":"test-surface","fallbackId":"test-fallback"}"#).unwrap();
        field.init(options).await;

        let document = web_sys::window().unwrap().document().unwrap();
        assert!(document.get_element_by_id("test-surface").is_some());
        assert!(document.get_element_by_id("test-fallback").is_some());
        field.destroy();
        // The fallback belongs to the page and survives destroy
        assert!(document.get_element_by_id("test-fallback").is_some());
    }

    #[wasm_bindgen_test]
    async fn test_repeated_init_registers_listeners_once() {
        let field = WaveField::new().unwrap();
        field.init(JsValue::UNDEFINED).await;
        assert_eq!(field.shared.listeners.borrow().len(), 3);

        field.init(JsValue::UNDEFINED).await;
        field.init(JsValue::UNDEFINED).await;
        assert_eq!(field.shared.listeners.borrow().len(), 3);

        field.destroy();
        assert!(field.shared.listeners.borrow().is_empty());
    }

    #[wasm_bindgen_test]
    async fn test_destroy_during_init_is_applied_when_init_returns() {
        let field = WaveField::new().unwrap();
        let shared = Rc::clone(&field.shared);

        // Hold the controller out of its slot, as the awaiting init does
        let mut controller = shared.controller.borrow_mut().take().unwrap();
        controller.init(&InitOptions::default()).await;

        field.destroy();
        assert!(shared.destroy_requested.get());
        assert_eq!(field.state(), "probingCapability");

        shared.finish_init(controller, true);
        assert_eq!(field.state(), "destroyed");
        assert!(!shared.destroy_requested.get());
        assert!(shared.listeners.borrow().is_empty());
        assert_eq!(shared.with_controller(|c| c.has_pending_frame()), Some(false));
    }

    #[wasm_bindgen_test]
    async fn test_free_without_destroy_releases_page_resources() {
        let field = WaveField::new().unwrap();
        let options = js_sys::JSON::parse(r#"{"surfaceId":"free-surface"}"#).unwrap();
        field.init(options).await;
        let weak = Rc::downgrade(&field.shared);

        drop(field);

        assert!(weak.upgrade().is_none());
        let document = web_sys::window().unwrap().document().unwrap();
        let surface = document.get_element_by_id("free-surface").unwrap();
        assert_eq!(surface.child_element_count(), 0);
    }

    #[wasm_bindgen_test]
    fn test_malformed_options_fall_back_to_defaults() {
        let options = parse_options(JsValue::from_str("not an object"));
        assert_eq!(options, InitOptions::default());
    }
}
