//! Script-tag auto-initialization
//!
//! ```html
//! <script type="module" src="wave-field.js" data-wave-field="auto"></script>
//! <script type="module" src="wave-field.js" data-preset="waves" data-color="#ff0000"></script>
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};
use wavefield::{Color, InitOptions};

use crate::WaveField;

const SCRIPT_SELECTOR: &str = "script[data-wave-field], script[data-preset]";

thread_local! {
    /// The page-wide instance started from a script tag
    static AUTO_INSTANCE: RefCell<Option<WaveField>> = const { RefCell::new(None) };
    /// Pending DOMContentLoaded listener
    static READY_LISTENER: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
}

/// Start an instance if the page asked for one
pub(crate) fn schedule() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(script) = document.query_selector(SCRIPT_SELECTOR).ok().flatten() else {
        return;
    };
    let Some(options) = options_from_script(&script) else {
        return;
    };

    if document.ready_state() == "loading" {
        defer_until_ready(&document, options);
    } else {
        start(options);
    }
}

fn options_from_script(script: &Element) -> Option<InitOptions> {
    auto_options(
        script.get_attribute("data-wave-field").as_deref(),
        script.get_attribute("data-preset").as_deref(),
        script.get_attribute("data-color").as_deref(),
    )
}

/// Options for a script tag's data attributes, or `None` if it did not opt in
fn auto_options(mode: Option<&str>, preset: Option<&str>, color: Option<&str>) -> Option<InitOptions> {
    let auto = mode.is_some_and(|m| m.trim().eq_ignore_ascii_case("auto"));
    if !auto && preset.is_none() {
        return None;
    }

    let color = color.and_then(|text| {
        let parsed = Color::from_hex(text);
        if parsed.is_none() {
            tracing::warn!("[wave-field] Ignoring data-color '{}'", text);
        }
        parsed
    });

    Some(InitOptions {
        preset: preset.map(str::to_string),
        color,
        ..InitOptions::default()
    })
}

fn defer_until_ready(document: &Document, options: InitOptions) {
    let mut options = Some(options);
    let closure = Closure::wrap(Box::new(move || {
        if let Some(options) = options.take() {
            start(options);
        }
    }) as Box<dyn FnMut()>);

    let added = document
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
    match added {
        Ok(()) => READY_LISTENER.with(|slot| *slot.borrow_mut() = Some(closure)),
        Err(err) => tracing::warn!("[wave-field] Auto-init skipped: {:?}", err),
    }
}

/// Handle to the instance started from the script tag, if any
///
/// The handle shares state with the page-wide instance, so `destroy()` on it
/// tears that instance down.
#[wasm_bindgen]
pub fn auto_instance() -> Option<WaveField> {
    AUTO_INSTANCE.with(|slot| {
        slot.borrow().as_ref().map(|field| WaveField {
            shared: Rc::clone(&field.shared),
        })
    })
}

fn start(options: InitOptions) {
    let field = match WaveField::new() {
        Ok(field) => field,
        Err(err) => {
            tracing::warn!("[wave-field] Auto-init failed: {:?}", err);
            return;
        }
    };
    let shared = field.shared.clone();
    AUTO_INSTANCE.with(|slot| *slot.borrow_mut() = Some(field));

    tracing::info!("[wave-field] Auto-init (preset: {:?})", options.preset);
    wasm_bindgen_futures::spawn_local(async move {
        shared.init(options).await;
    });
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    async fn sleep(ms: i32) {
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            web_sys::window()
                .unwrap()
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .unwrap();
        });
        wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
    }

    #[wasm_bindgen_test]
    async fn test_auto_instance_can_be_destroyed() {
        start(InitOptions::default());
        let handle = auto_instance().unwrap();
        handle.destroy();

        for _ in 0..50 {
            if handle.state() == "destroyed" {
                break;
            }
            sleep(20).await;
        }
        assert_eq!(handle.state(), "destroyed");

        let stored = AUTO_INSTANCE.with(|slot| slot.borrow().as_ref().map(|field| field.state()));
        assert_eq!(stored.as_deref(), Some("destroyed"));
        assert!(handle.shared.listeners.borrow().is_empty());
    }
}
