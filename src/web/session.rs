use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Event, EventTarget, File, FormData, HtmlInputElement, ScrollBehavior,
    ScrollIntoViewOptions, Window,
};

use crate::charts::{LoadMonitor, tick_label};
use crate::config::DashboardConfig;
use crate::endpoints::{ArtifactKind, Endpoints};
use crate::error::GenerateError;
use crate::metrics::MetricsResponse;
use crate::ui::dropzone::{CHECK_ZONES, DATASET_ZONE};
use crate::ui::generate::{GenerateFlow, PendingGenerate};
use crate::ui::navigation::{
    CONTENT_ANCHOR_ID, GENERATE_LINK_ID, MENU_LINKS_SELECTOR, MENU_TOGGLE_ID, NavAction,
    download_button_actions, generate_link_actions, menu_link_actions,
};
use crate::ui::{DOWNLOAD_EXCEL_ID, DOWNLOAD_JSON_ID, GENERATE_BUTTON_ID};

use super::chart::ChartHandle;
use super::dom::{self, DomView, element};
use super::dropzone;
use super::events::EventBindings;

struct Ticker {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

/// Everything one page view owns: charts, listeners and the load ticker.
///
/// Dropping the session stops the ticker, removes its listeners and
/// destroys its charts.
pub struct DashboardSession {
    window: Window,
    config: DashboardConfig,
    monitor: Rc<RefCell<LoadMonitor<ChartHandle>>>,
    view: Rc<RefCell<DomView>>,
    events: EventBindings,
    ticker: Option<Ticker>,
}

impl DashboardSession {
    /// Create the charts and bind every control present on the page.
    pub fn new(window: Window, document: Document, config: DashboardConfig) -> Self {
        let monitor = LoadMonitor::new(config.window_points, |kind| {
            ChartHandle::create(&document, &kind.spec())
        });
        let view = DomView::new(window.clone(), document.clone());

        let mut session = Self {
            window,
            config,
            monitor: Rc::new(RefCell::new(monitor)),
            view: Rc::new(RefCell::new(view)),
            events: EventBindings::default(),
            ticker: None,
        };

        let zones = CHECK_ZONES
            .into_iter()
            .chain([DATASET_ZONE])
            .filter(|zone| dropzone::bind(&mut session.events, &document, *zone))
            .count();
        log::debug!("bound {zones} drop zone(s)");

        session.bind_navigation(&document);
        session.bind_generate(&document, Rc::new(GenerateFlow::new(Endpoints::relative())));
        log::debug!("{} listener(s) bound", session.events.len());

        session
    }

    /// Start the load ticker. Does nothing when it already runs or when the
    /// page has no load charts.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.ticker.is_some() {
            return Ok(());
        }
        if self.monitor.borrow().live_charts() == 0 {
            log::debug!("no load charts on this page; ticker not started");
            return Ok(());
        }

        let monitor = self.monitor.clone();
        let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let label = tick_label(&chrono::Local::now());
            monitor.borrow_mut().tick(&label, js_sys::Math::random);
        }));
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                i32::try_from(self.config.tick_interval_ms).unwrap_or(i32::MAX),
            )?;

        self.ticker = Some(Ticker {
            handle,
            _closure: closure,
        });
        Ok(())
    }

    /// Cancel the load ticker.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            self.window.clear_interval_with_handle(ticker.handle);
            log::debug!("load ticker stopped after {} tick(s)", self.monitor.borrow().ticks());
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    fn bind_navigation(&mut self, document: &Document) {
        if let Some(link) = document.get_element_by_id(GENERATE_LINK_ID) {
            let window = self.window.clone();
            let document = document.clone();
            self.events.listen(&link, "click", move |event: Event| {
                let pathname = window.location().pathname().unwrap_or_default();
                for action in generate_link_actions(&pathname) {
                    apply_nav(&document, &event, action);
                }
            });
        }

        let Ok(links) = document.query_selector_all(MENU_LINKS_SELECTOR) else {
            return;
        };
        for i in 0..links.length() {
            let Some(target) = links
                .get(i)
                .and_then(|node| node.dyn_into::<EventTarget>().ok())
            else {
                continue;
            };
            let document = document.clone();
            self.events.listen(&target, "click", move |event: Event| {
                for action in menu_link_actions() {
                    apply_nav(&document, &event, action);
                }
            });
        }
    }

    fn bind_generate(&mut self, document: &Document, flow: Rc<GenerateFlow>) {
        if let Some(button) = document.get_element_by_id(GENERATE_BUTTON_ID) {
            let document = document.clone();
            let view = self.view.clone();
            let flow = flow.clone();
            self.events.listen(&button, "click", move |_event: Event| {
                let selection = dom::selected_trimester(&document);
                let upload = dom::selected_file(&document, DATASET_ZONE.input_id);
                let pending = flow.begin(&mut *view.borrow_mut(), selection, upload);
                let Some(pending) = pending else {
                    return;
                };

                let view = view.clone();
                let flow = flow.clone();
                spawn_local(async move {
                    let outcome = send_generate(&pending).await;
                    if let Err(e) = &outcome {
                        log::error!("generate for trimester {} failed: {e}", pending.trimester);
                    }
                    let _ = flow.finish(&mut *view.borrow_mut(), pending.trimester, outcome);
                });
            });
        }

        for (id, kind) in [
            (DOWNLOAD_EXCEL_ID, ArtifactKind::Excel),
            (DOWNLOAD_JSON_ID, ArtifactKind::Json),
        ] {
            let Some(button) = document.get_element_by_id(id) else {
                continue;
            };
            let document = document.clone();
            let view = self.view.clone();
            let flow = flow.clone();
            self.events.listen(&button, "click", move |event: Event| {
                for action in download_button_actions() {
                    apply_nav(&document, &event, action);
                }
                let selection = dom::selected_trimester(&document);
                flow.download(&mut *view.borrow_mut(), selection, kind);
            });
        }
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.stop();
    }
}

fn apply_nav(document: &Document, event: &Event, action: NavAction) {
    match action {
        NavAction::PreventDefault => event.prevent_default(),
        NavAction::ScrollToContent => {
            if let Some(anchor) = document.get_element_by_id(CONTENT_ANCHOR_ID) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                anchor.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
        NavAction::CollapseMenu => {
            if let Some(toggle) = element::<HtmlInputElement>(document, MENU_TOGGLE_ID) {
                toggle.set_checked(false);
            }
        }
    }
}

/// `POST` the upload as `multipart/form-data` and decode the metrics.
async fn send_generate(pending: &PendingGenerate<File>) -> Result<MetricsResponse, GenerateError> {
    let js_err = |e: JsValue| GenerateError::Network(format!("{e:?}"));

    let form = FormData::new().map_err(js_err)?;
    form.append_with_blob_and_filename("file", &pending.upload, &pending.upload.name())
        .map_err(js_err)?;
    form.append_with_str("trimester", pending.trimester.as_str())
        .map_err(js_err)?;

    let response = Request::post(&pending.url)
        .body(form)
        .map_err(|e| GenerateError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| GenerateError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(GenerateError::HttpStatus(response.status()));
    }
    response
        .json::<MetricsResponse>()
        .await
        .map_err(|e| GenerateError::Decode(e.to_string()))
}
