//! DOM access and the browser [`DashboardView`].

use wasm_bindgen::JsCast;
use web_sys::{Document, File, HtmlAnchorElement, HtmlButtonElement, HtmlElement, HtmlInputElement, Window};

use crate::charts::{ChartSpec, ChartSurface};
use crate::error::GenerateError;
use crate::metrics::{FitnessBand, MetricField, TrendSeries, get_fitness_interpretation, parse_displayed_score};
use crate::trimester::Trimester;
use crate::ui::{
    DOWNLOAD_LINKS_DISPLAY, DOWNLOAD_LINKS_ID, DashboardView, GENERATE_BUTTON_ID,
    INTERPRETATION_ID, TRIMESTER_GROUP,
};

use super::chart::ChartHandle;

/// Element by id, cast to a concrete element type.
pub fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// The checked trimester radio button, validated.
pub fn selected_trimester(document: &Document) -> Result<Trimester, GenerateError> {
    let selector = format!("input[name=\"{TRIMESTER_GROUP}\"]:checked");
    let value = document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value());
    Trimester::from_selection(value.as_deref())
}

/// First file chosen in a file input.
pub fn selected_file(document: &Document, input_id: &str) -> Option<File> {
    element::<HtmlInputElement>(document, input_id)?
        .files()?
        .get(0)
}

/// Re-derive the interpretation from whatever the score element shows.
pub fn refresh_interpretation(document: &Document) {
    let Some(score) = document.get_element_by_id(MetricField::FitnessScore.element_id()) else {
        return;
    };
    let Some(target) = document.get_element_by_id(INTERPRETATION_ID) else {
        return;
    };
    let text = score.text_content().unwrap_or_default();
    target.set_inner_html(&get_fitness_interpretation(parse_displayed_score(&text)));
}

/// The dashboard as rendered into the page.
pub struct DomView {
    window: Window,
    document: Document,
    trend_chart: Option<ChartHandle>,
}

impl DomView {
    pub fn new(window: Window, document: Document) -> Self {
        let trend_chart = ChartHandle::create(&document, &ChartSpec::FITNESS_TREND);
        Self {
            window,
            document,
            trend_chart,
        }
    }

    fn trigger(&self) -> Option<HtmlButtonElement> {
        element(&self.document, GENERATE_BUTTON_ID)
    }
}

impl DashboardView for DomView {
    fn set_metric_text(&mut self, field: MetricField, text: &str) {
        if let Some(el) = self.document.get_element_by_id(field.element_id()) {
            el.set_text_content(Some(text));
        }
    }

    fn set_interpretation(&mut self, band: FitnessBand) {
        if let Some(el) = self.document.get_element_by_id(INTERPRETATION_ID) {
            el.set_inner_html(&band.html());
        }
    }

    fn draw_fitness_trend(&mut self, trend: &TrendSeries) {
        if let Some(chart) = self.trend_chart.as_mut() {
            chart.draw(&trend.labels, &trend.values);
        }
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        if let Some(button) = self.trigger() {
            button.set_disabled(!enabled);
        }
    }

    fn set_trigger_label(&mut self, html: &str) {
        if let Some(button) = self.trigger() {
            button.set_inner_html(html);
        }
    }

    fn show_download_links(&mut self) {
        if let Some(links) = element::<HtmlElement>(&self.document, DOWNLOAD_LINKS_ID) {
            let _ = links.style().set_property("display", DOWNLOAD_LINKS_DISPLAY);
        }
    }

    fn trigger_download(&mut self, url: &str) {
        let Some(body) = self.document.body() else {
            return;
        };
        let Some(anchor) = self
            .document
            .create_element("a")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
        else {
            return;
        };
        anchor.set_href(url);
        anchor.set_download("");
        let _ = anchor.style().set_property("display", "none");
        if body.append_child(&anchor).is_ok() {
            anchor.click();
            anchor.remove();
        }
    }

    fn alert(&mut self, message: &str) {
        log::warn!("{message}");
        let _ = self.window.alert_with_message(message);
    }
}
