//! Page behavior, independent of how the page is drawn.
//!
//! Each submodule decides *what* happens for a user action and hands the
//! result to a view: the DOM in the browser, the terminal for the CLI, or a
//! recorder in tests.

pub mod dropzone;
pub mod generate;
pub mod navigation;

use crate::metrics::{FitnessBand, MetricField, TrendSeries};

pub const GENERATE_BUTTON_ID: &str = "generateBtn";
pub const DOWNLOAD_EXCEL_ID: &str = "downloadExcel";
pub const DOWNLOAD_JSON_ID: &str = "downloadJson";
pub const DOWNLOAD_LINKS_ID: &str = "downloadLinks";
pub const INTERPRETATION_ID: &str = "fitnessInterpretation";
pub const TRIMESTER_GROUP: &str = "trimester";
/// CSS `display` that reveals the download links; the page lays them out
/// with a flex gap.
pub const DOWNLOAD_LINKS_DISPLAY: &str = "flex";

/// Label of the generate trigger when idle.
pub const GENERATE_LABEL: &str = "Generate Schedule";
/// Label of the generate trigger while a request is in flight.
pub const BUSY_LABEL: &str =
    r#"Processing... <span class="spinner-border spinner-border-sm"></span>"#;

/// Output side of the dashboard.
pub trait DashboardView {
    fn set_metric_text(&mut self, field: MetricField, text: &str);
    fn set_interpretation(&mut self, band: FitnessBand);
    fn draw_fitness_trend(&mut self, trend: &TrendSeries);
    fn set_trigger_enabled(&mut self, enabled: bool);
    /// Replace the trigger's label markup.
    fn set_trigger_label(&mut self, html: &str);
    fn show_download_links(&mut self);
    fn trigger_download(&mut self, url: &str);
    /// Blocking notice to the user.
    fn alert(&mut self, message: &str);
}
