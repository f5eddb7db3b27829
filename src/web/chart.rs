//! Chart.js handles.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement};

use crate::charts::{ChartSpec, ChartSurface};

/// A live Chart.js instance bound to one canvas.
///
/// The chart is destroyed when the handle is dropped, which frees the
/// canvas for a later session.
pub struct ChartHandle {
    chart: JsValue,
}

impl ChartHandle {
    /// Create the chart described by `spec`.
    ///
    /// Returns `None` when the page has no such canvas (the checker page has
    /// none) or when Chart.js is not loaded.
    pub fn create(document: &Document, spec: &ChartSpec) -> Option<Self> {
        let canvas = document
            .get_element_by_id(spec.canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;

        let Some(ctor) = Reflect::get(&js_sys::global(), &JsValue::from_str("Chart"))
            .ok()
            .and_then(|v| v.dyn_into::<Function>().ok())
        else {
            log::warn!("Chart.js is not loaded; {} stays empty", spec.canvas_id);
            return None;
        };

        let config = match js_sys::JSON::parse(&spec.config().to_string()) {
            Ok(config) => config,
            Err(e) => {
                log::error!("bad chart config for {}: {e:?}", spec.canvas_id);
                return None;
            }
        };

        match Reflect::construct(&ctor, &Array::of2(&canvas, &config)) {
            Ok(chart) => Some(Self { chart }),
            Err(e) => {
                log::error!("Chart.js rejected {}: {e:?}", spec.canvas_id);
                None
            }
        }
    }

    fn call(&self, method: &str) {
        if let Ok(func) = Reflect::get(&self.chart, &JsValue::from_str(method))
            .and_then(|v| v.dyn_into::<Function>())
        {
            let _ = func.call0(&self.chart);
        }
    }
}

impl ChartSurface for ChartHandle {
    fn draw(&mut self, labels: &[String], values: &[f64]) {
        let Ok(data) = Reflect::get(&self.chart, &JsValue::from_str("data")) else {
            return;
        };
        let js_labels: Array = labels.iter().map(|l| JsValue::from_str(l)).collect();
        let js_values: Array = values.iter().map(|v| JsValue::from_f64(*v)).collect();

        Reflect::set(&data, &JsValue::from_str("labels"), &js_labels).ok();
        if let Ok(datasets) = Reflect::get(&data, &JsValue::from_str("datasets")) {
            let first = Reflect::get_u32(&datasets, 0).unwrap_or(JsValue::UNDEFINED);
            if first.is_object() {
                Reflect::set(&first, &JsValue::from_str("data"), &js_values).ok();
            }
        }
        self.call("update");
    }
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        self.call("destroy");
    }
}
