//! Upload-and-generate flow.
//!
//! The flow is split around the network call so the same steps drive the
//! browser (which awaits `fetch`) and the CLI (which blocks on `ureq`):
//!
//! 1. [`GenerateFlow::begin`] validates the trimester and the upload, then
//!    puts the trigger into its busy state and returns the request to send.
//! 2. The caller sends it.
//! 3. [`GenerateFlow::finish`] renders the outcome and restores the trigger.

use crate::endpoints::{ArtifactKind, Endpoints};
use crate::error::GenerateError;
use crate::metrics::{MetricField, MetricsResponse};
use crate::trimester::Trimester;

use super::{BUSY_LABEL, DashboardView, GENERATE_LABEL};

/// A validated generate request waiting to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingGenerate<U> {
    pub trimester: Trimester,
    pub upload: U,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateFlow {
    endpoints: Endpoints,
}

impl GenerateFlow {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Validate inputs and enter the busy state.
    ///
    /// Returns `None` after alerting the user when either precondition
    /// fails; nothing is sent in that case and the trigger is untouched.
    pub fn begin<V, U>(
        &self,
        view: &mut V,
        selection: Result<Trimester, GenerateError>,
        upload: Option<U>,
    ) -> Option<PendingGenerate<U>>
    where
        V: DashboardView + ?Sized,
    {
        let trimester = match selection {
            Ok(t) => t,
            Err(err) => {
                view.alert(&err.to_string());
                return None;
            }
        };
        let Some(upload) = upload else {
            view.alert(&GenerateError::MissingFile.to_string());
            return None;
        };

        view.set_trigger_enabled(false);
        view.set_trigger_label(BUSY_LABEL);

        Some(PendingGenerate {
            trimester,
            upload,
            url: self.endpoints.generate(),
        })
    }

    /// Render the response (or the failure) and leave the busy state.
    ///
    /// The trigger is re-enabled whatever the outcome. The outcome is handed
    /// back so callers can record it.
    pub fn finish<V>(
        &self,
        view: &mut V,
        trimester: Trimester,
        outcome: Result<MetricsResponse, GenerateError>,
    ) -> Result<MetricsResponse, GenerateError>
    where
        V: DashboardView + ?Sized,
    {
        match &outcome {
            Ok(metrics) => {
                render_metrics(view, metrics);
                view.show_download_links();
                for kind in [ArtifactKind::Excel, ArtifactKind::Json] {
                    view.trigger_download(&self.endpoints.download(kind, trimester));
                }
                view.set_trigger_label(GENERATE_LABEL);
            }
            Err(err) => {
                view.alert(&format!("Error: {err}"));
                view.set_trigger_label(GENERATE_LABEL);
            }
        }
        view.set_trigger_enabled(true);
        outcome
    }

    /// Handle a click on one of the download buttons.
    pub fn download<V>(
        &self,
        view: &mut V,
        selection: Result<Trimester, GenerateError>,
        kind: ArtifactKind,
    ) where
        V: DashboardView + ?Sized,
    {
        match selection {
            Ok(trimester) => view.trigger_download(&self.endpoints.download(kind, trimester)),
            Err(err) => view.alert(&err.to_string()),
        }
    }
}

/// Write the metric fields, then the interpretation and the trend chart.
///
/// The interpretation is refreshed here, right after the score text
/// changes, rather than by watching the score element.
pub fn render_metrics<V>(view: &mut V, metrics: &MetricsResponse)
where
    V: DashboardView + ?Sized,
{
    for field in MetricField::ALL {
        view.set_metric_text(field, &metrics.field_text(field));
    }
    view.set_interpretation(metrics.band());
    view.draw_fitness_trend(&metrics.trend());
}
