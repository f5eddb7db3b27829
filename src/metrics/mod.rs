//! Metrics returned by the scheduling backend and their rendered form.

pub mod interpretation;

use serde::{Deserialize, Serialize};

pub use interpretation::{FitnessBand, get_fitness_interpretation, parse_displayed_score};

/// A constraint percentage as reported by the backend.
///
/// The backend may not compute hard/soft satisfaction and then sends a
/// placeholder string such as `"-"` instead of a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Body of a successful `POST /generate_schedule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResponse {
    #[serde(rename = "fitnessScore")]
    pub fitness_score: f64,
    pub conflicts: u64,
    pub hard: MetricValue,
    pub soft: MetricValue,
    /// Elapsed generation time in seconds.
    pub time: f64,
    /// Raw per-generation fitness values, oldest first.
    #[serde(default)]
    pub fitness_progress: Vec<f64>,
}

/// Text targets the metrics are rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    FitnessScore,
    Conflicts,
    HardConstraints,
    SoftConstraints,
    GenerationTime,
}

impl MetricField {
    pub const ALL: [MetricField; 5] = [
        Self::FitnessScore,
        Self::Conflicts,
        Self::HardConstraints,
        Self::SoftConstraints,
        Self::GenerationTime,
    ];

    /// DOM id of the element showing this field.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::FitnessScore => "fitnessScore",
            Self::Conflicts => "conflictsCount",
            Self::HardConstraints => "hardConstraints",
            Self::SoftConstraints => "softConstraints",
            Self::GenerationTime => "genTime",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            Self::FitnessScore => "Fitness score",
            Self::Conflicts => "Conflicts",
            Self::HardConstraints => "Hard constraints",
            Self::SoftConstraints => "Soft constraints",
            Self::GenerationTime => "Generation time",
        }
    }
}

impl MetricsResponse {
    /// Rendered text for one field.
    pub fn field_text(&self, field: MetricField) -> String {
        match field {
            MetricField::FitnessScore => format!("{}%", self.fitness_score),
            MetricField::Conflicts => self.conflicts.to_string(),
            MetricField::HardConstraints => format!("{}%", self.hard),
            MetricField::SoftConstraints => format!("{}%", self.soft),
            MetricField::GenerationTime => format!("{}s", self.time),
        }
    }

    pub fn band(&self) -> FitnessBand {
        FitnessBand::from_score(self.fitness_score)
    }

    pub fn trend(&self) -> TrendSeries {
        TrendSeries::from_progress(&self.fitness_progress)
    }
}

/// Map a raw per-generation fitness value onto the trend chart's scale.
///
/// Rounds half up like `Math.round`.
pub fn rescale_progress(raw: f64) -> f64 {
    (10_000.0 / (1.0 + raw) + 0.5).floor()
}

/// Points plotted on the fitness-trend chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl TrendSeries {
    pub fn from_progress(progress: &[f64]) -> Self {
        Self {
            labels: (1..=progress.len()).map(|i| format!("Gen {i}")).collect(),
            values: progress.iter().copied().map(rescale_progress).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
