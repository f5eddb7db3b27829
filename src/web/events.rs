use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

struct Binding {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Event listeners owned by a session.
///
/// Every listener is removed from its target when the set is dropped, so a
/// torn-down session leaves nothing behind on the page.
#[derive(Default)]
pub struct EventBindings {
    bindings: Vec<Binding>,
}

impl EventBindings {
    pub fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
        if let Err(e) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::error!("failed to bind {event}: {e:?}");
            return;
        }
        self.bindings.push(Binding {
            target: target.clone(),
            event,
            closure,
        });
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

impl Drop for EventBindings {
    fn drop(&mut self) {
        for b in self.bindings.drain(..) {
            let _ = b
                .target
                .remove_event_listener_with_callback(b.event, b.closure.as_ref().unchecked_ref());
        }
    }
}
