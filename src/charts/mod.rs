//! Line charts shown on the dashboard.
//!
//! The charts themselves are drawn by Chart.js in the browser; this module
//! owns what is drawn: the chart definitions, the simulated load samples and
//! the capped series they are pushed into.

pub mod monitor;
pub mod series;

use serde_json::{Value, json};

pub use monitor::LoadMonitor;
pub use series::{DEFAULT_WINDOW_POINTS, SeriesWindow};

/// Default tick period of the simulated load charts.
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 2000;

/// Color shared by legends and axis ticks.
const TICK_COLOR: &str = "#117964";

/// Anything a line series can be drawn onto.
///
/// Implemented by the Chart.js handle in the browser and by recording fakes
/// in tests.
pub trait ChartSurface {
    /// Replace the plotted series and redraw.
    fn draw(&mut self, labels: &[String], values: &[f64]);
}

/// Static description of one line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub canvas_id: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

impl ChartSpec {
    pub const FITNESS_TREND: ChartSpec = ChartSpec {
        canvas_id: "fitnessTrendChart",
        label: "Fitness Score Trend",
        color: "#0b96ff",
    };

    /// Chart.js configuration for an empty single-series line chart.
    pub fn config(&self) -> Value {
        json!({
            "type": "line",
            "data": {
                "labels": [],
                "datasets": [{
                    "label": self.label,
                    "data": [],
                    "borderColor": self.color,
                    "backgroundColor": "transparent",
                    "tension": 0.3
                }]
            },
            "options": {
                "responsive": true,
                "plugins": { "legend": { "labels": { "color": TICK_COLOR } } },
                "scales": {
                    "x": { "ticks": { "color": TICK_COLOR } },
                    "y": { "ticks": { "color": TICK_COLOR }, "beginAtZero": true }
                }
            }
        })
    }
}

/// The simulated system-load charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadKind {
    Cpu,
    Ram,
    Memory,
}

impl LoadKind {
    pub const ALL: [LoadKind; 3] = [Self::Cpu, Self::Ram, Self::Memory];

    pub fn spec(self) -> ChartSpec {
        match self {
            Self::Cpu => ChartSpec {
                canvas_id: "cpuChart",
                label: "CPU Load",
                color: "#117964",
            },
            Self::Ram => ChartSpec {
                canvas_id: "ramChart",
                label: "RAM Load",
                color: "#19be94",
            },
            Self::Memory => ChartSpec {
                canvas_id: "memoryChart",
                label: "Memory Load",
                color: "#ffc107",
            },
        }
    }

    /// Half-open sample range `[low, high)`.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Cpu => (0.0, 100.0),
            Self::Ram => (0.0, 50.0),
            Self::Memory => (80.0, 100.0),
        }
    }

    /// Map a uniform draw from `[0, 1)` into this chart's range.
    pub fn sample(self, unit: f64) -> f64 {
        let (low, high) = self.range();
        low + unit.clamp(0.0, 1.0) * (high - low)
    }
}

/// Local wall-clock label for a tick.
pub fn tick_label<Tz: chrono::TimeZone>(now: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn samples_stay_in_range() {
        for kind in LoadKind::ALL {
            let (low, high) = kind.range();
            for unit in [0.0, 0.25, 0.5, 0.999_999] {
                let v = kind.sample(unit);
                assert!(v >= low && v < high, "{kind:?} produced {v}");
            }
        }
        assert_eq!(LoadKind::Memory.sample(0.0), 80.0);
        assert_eq!(LoadKind::Ram.sample(0.5), 25.0);
    }

    #[test]
    fn config_has_single_empty_series() {
        let cfg = LoadKind::Cpu.spec().config();
        assert_eq!(cfg["type"], "line");
        let datasets = cfg["data"]["datasets"].as_array().unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0]["label"], "CPU Load");
        assert!(datasets[0]["data"].as_array().unwrap().is_empty());
        assert_eq!(cfg["options"]["scales"]["y"]["beginAtZero"], true);
    }

    #[test]
    fn canvas_ids_match_page() {
        let ids: Vec<_> = LoadKind::ALL.iter().map(|k| k.spec().canvas_id).collect();
        assert_eq!(ids, vec!["cpuChart", "ramChart", "memoryChart"]);
        assert_eq!(ChartSpec::FITNESS_TREND.canvas_id, "fitnessTrendChart");
    }

    #[test]
    fn tick_label_is_clock_time() {
        let t = chrono::Utc.with_ymd_and_hms(2024, 9, 2, 8, 5, 9).unwrap();
        assert_eq!(tick_label(&t), "08:05:09");
    }
}
