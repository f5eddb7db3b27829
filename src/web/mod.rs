//! Browser bindings.
//!
//! `start` runs when the module is instantiated: it installs the panic hook
//! and logger, then builds a [`DashboardSession`] for the current page. The
//! session lives until the page is unloaded for good (a `pagehide` that is
//! not entering the back/forward cache) or an explicit `teardown()`.

mod chart;
mod dom;
mod dropzone;
mod events;
mod session;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::PageTransitionEvent;

use crate::config::DashboardConfig;
use crate::metrics;
use crate::ui::navigation::releases_session_on_pagehide;

pub use session::DashboardSession;

thread_local! {
    static SESSION: RefCell<Option<DashboardSession>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let mut session = DashboardSession::new(window.clone(), document, DashboardConfig::default());
    session.start()?;
    log::info!("dashboard session started (ticker running: {})", session.is_running());

    // Replaces any earlier session; dropping it releases its page bindings.
    let previous = SESSION.with(|slot| slot.borrow_mut().replace(session));
    drop(previous);

    let on_pagehide = Closure::<dyn FnMut(PageTransitionEvent)>::wrap(Box::new(
        |event: PageTransitionEvent| {
            if releases_session_on_pagehide(event.persisted()) {
                teardown();
            } else {
                log::debug!("page cached; session kept");
            }
        },
    ));
    window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())?;
    on_pagehide.forget();

    Ok(())
}

/// Stop the ticker and release every chart and listener of the session.
#[wasm_bindgen]
pub fn teardown() {
    let session = SESSION.with(|slot| slot.borrow_mut().take());
    if session.is_some() {
        log::info!("dashboard session torn down");
    }
}

/// Re-render the interpretation from the score currently on the page.
#[wasm_bindgen(js_name = updateFitnessInterpretation)]
pub fn update_fitness_interpretation() {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        dom::refresh_interpretation(&document);
    }
}

/// Interpretation markup for a score.
#[wasm_bindgen(js_name = getFitnessInterpretation)]
pub fn get_fitness_interpretation(score: f64) -> String {
    metrics::get_fitness_interpretation(score)
}
