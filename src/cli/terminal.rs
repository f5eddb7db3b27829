//! Terminal rendition of the dashboard for `timetable-dash generate`.

use std::path::PathBuf;

use colored::Colorize;

use crate::client::ScheduleClient;
use crate::endpoints::ArtifactKind;
use crate::metrics::{FitnessBand, MetricField, TrendSeries};
use crate::trimester::Trimester;
use crate::ui::{BUSY_LABEL, DashboardView};

/// Trend points printed at each end of a long progress series.
const TREND_EDGE: usize = 5;

/// Prints what the browser would render and saves what it would download.
pub struct TerminalView<'a> {
    client: &'a ScheduleClient,
    out_dir: PathBuf,
    trimester: Option<Trimester>,
    saved: Vec<PathBuf>,
}

impl<'a> TerminalView<'a> {
    pub fn new(client: &'a ScheduleClient, out_dir: PathBuf, trimester: Option<Trimester>) -> Self {
        Self {
            client,
            out_dir,
            trimester,
            saved: Vec::new(),
        }
    }

    /// Artifacts written so far.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    fn fallback_name(&self, url: &str) -> String {
        let trimester = self.trimester.unwrap_or(Trimester::First);
        let kind = if url.contains(ArtifactKind::Json.path()) {
            ArtifactKind::Json
        } else {
            ArtifactKind::Excel
        };
        kind.fallback_file_name(trimester)
    }
}

impl DashboardView for TerminalView<'_> {
    fn set_metric_text(&mut self, field: MetricField, text: &str) {
        println!("  {:<18} {}", format!("{}:", field.caption()).bold(), text);
    }

    fn set_interpretation(&mut self, band: FitnessBand) {
        let headline = match band {
            FitnessBand::Excellent | FitnessBand::Good => band.headline().green(),
            FitnessBand::Average => band.headline().yellow(),
            FitnessBand::Poor => band.headline().red(),
        };
        println!();
        println!("  {} {} ({})", band.marker(), headline.bold(), band.detail());
    }

    fn draw_fitness_trend(&mut self, trend: &TrendSeries) {
        if trend.is_empty() {
            return;
        }
        println!();
        println!("{}", "Fitness Score Trend".bold().cyan());
        for line in trend_lines(trend, TREND_EDGE) {
            println!("  {line}");
        }
    }

    fn set_trigger_enabled(&mut self, _enabled: bool) {}

    fn set_trigger_label(&mut self, html: &str) {
        if html == BUSY_LABEL {
            println!("{}", "Processing...".dimmed());
        }
    }

    fn show_download_links(&mut self) {
        println!();
        println!("{}", "Downloads".bold().cyan());
    }

    fn trigger_download(&mut self, url: &str) {
        let fallback = self.fallback_name(url);
        match self.client.download(url, &fallback, &self.out_dir) {
            Ok(path) => {
                println!("  {} {}", "saved".green(), path.display());
                self.saved.push(path);
            }
            Err(e) => println!("  {} {e}", "skipped".yellow()),
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", message.red().bold());
    }
}

/// Listing of a trend, eliding the middle of long series.
pub(crate) fn trend_lines(trend: &TrendSeries, edge: usize) -> Vec<String> {
    let n = trend.len();
    let line = |i: usize| format!("{:<8} {}", trend.labels[i], trend.values[i]);

    if n <= edge * 2 {
        return (0..n).map(line).collect();
    }

    let mut lines: Vec<String> = (0..edge).map(line).collect();
    lines.push(format!("… {} more", n - edge * 2));
    lines.extend((n - edge..n).map(line));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_trend_is_listed_in_full() {
        let trend = TrendSeries::from_progress(&[0.0, 1.0, 4.0]);
        assert_eq!(
            trend_lines(&trend, 5),
            vec!["Gen 1    10000", "Gen 2    5000", "Gen 3    2000"]
        );
    }

    #[test]
    fn long_trend_elides_middle() {
        let progress: Vec<f64> = (0..30).map(f64::from).collect();
        let lines = trend_lines(&TrendSeries::from_progress(&progress), 2);
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Gen 1 "));
        assert_eq!(lines[2], "… 26 more");
        assert!(lines[4].starts_with("Gen 30"));
    }
}
