//! Window event wiring
//!
//! Handlers only translate DOM events into `InteractionEvent`s; painting
//! stays in the frame callback.

use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, MouseEvent, TouchEvent};
use wavefield::{InteractionEvent, Platform};

use crate::Shared;

/// A registered listener, kept alive until detached
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

/// Register pointer, touch and resize listeners on the window
///
/// No-op when listeners are already registered.
pub(crate) fn attach(shared: &Rc<Shared>) {
    let mut listeners = shared.listeners.borrow_mut();
    if !listeners.is_empty() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let target: EventTarget = window.into();

    listeners.extend(
        [
            listen(&target, "pointermove", Rc::downgrade(shared), pointer_event),
            listen(&target, "touchmove", Rc::downgrade(shared), touch_event),
            listen(&target, "resize", Rc::downgrade(shared), resize_event),
        ]
        .into_iter()
        .flatten(),
    );
    tracing::debug!("[wave-field] Attached {} listeners", listeners.len());
}

/// Remove every listener registered by [`attach`]
pub(crate) fn detach(listeners: &mut Vec<Listener>) {
    for listener in listeners.drain(..) {
        if let Err(err) = listener.target.remove_event_listener_with_callback(
            listener.event,
            listener.closure.as_ref().unchecked_ref(),
        ) {
            tracing::debug!("[wave-field] Could not remove '{}' listener: {:?}", listener.event, err);
        }
    }
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    shared: Weak<Shared>,
    translate: fn(&web_sys::Event, &Shared) -> Option<InteractionEvent>,
) -> Option<Listener> {
    let closure = Closure::wrap(Box::new(move |dom_event: web_sys::Event| {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        if let Some(event) = translate(&dom_event, &shared) {
            shared.with_controller(|controller| controller.handle(event));
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        Ok(()) => Some(Listener {
            target: target.clone(),
            event,
            closure,
        }),
        Err(err) => {
            tracing::warn!("[wave-field] Could not listen for '{}': {:?}", event, err);
            None
        }
    }
}

fn pointer_event(event: &web_sys::Event, _shared: &Shared) -> Option<InteractionEvent> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(InteractionEvent::PointerMoved {
        x: event.client_x() as f32,
        y: event.client_y() as f32,
    })
}

fn touch_event(event: &web_sys::Event, _shared: &Shared) -> Option<InteractionEvent> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(InteractionEvent::TouchMoved {
        x: touch.client_x() as f32,
        y: touch.client_y() as f32,
    })
}

fn resize_event(_event: &web_sys::Event, shared: &Shared) -> Option<InteractionEvent> {
    let viewport = shared.with_controller(|controller| controller.platform().viewport())?;
    Some(InteractionEvent::Resized(viewport))
}
