use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::metrics::MetricsResponse;
use crate::trimester::Trimester;

// ---------------------------------------------------------------------------
// Generate log entry (JSONL)
// ---------------------------------------------------------------------------

/// One line of `~/.timetable-dash/generate-log.jsonl`.
///
/// Written after every terminal `generate` run, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateLogEntry {
    pub timestamp: String,
    pub trimester: Trimester,
    /// File name of the uploaded input (no directory).
    pub file: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fitness_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub conflicts: Option<u64>,
    /// Backend-reported generation time in seconds.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub generation_secs: Option<f64>,
    /// Wall-clock time of the whole request.
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl GenerateLogEntry {
    pub fn from_outcome<E: std::fmt::Display>(
        trimester: Trimester,
        file: &str,
        outcome: &Result<MetricsResponse, E>,
        elapsed_ms: u64,
    ) -> Self {
        let (metrics, error) = match outcome {
            Ok(m) => (Some(m), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            timestamp: Utc::now().to_rfc3339(),
            trimester,
            file: file.to_string(),
            success: metrics.is_some(),
            fitness_score: metrics.map(|m| m.fitness_score),
            conflicts: metrics.map(|m| m.conflicts),
            generation_secs: metrics.map(|m| m.time),
            elapsed_ms,
            error,
        }
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Append an entry to the generate log. Best-effort.
pub fn log_generate(entry: &GenerateLogEntry) {
    if let Some(path) = generate_log_path() {
        let _ = append_entry(&path, entry);
    }
}

pub(crate) fn append_entry(path: &Path, entry: &GenerateLogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// All entries in the generate log; malformed lines are skipped.
pub fn read_all_entries() -> Vec<GenerateLogEntry> {
    generate_log_path()
        .map(|p| read_entries_from(&p))
        .unwrap_or_default()
}

pub(crate) fn read_entries_from(path: &Path) -> Vec<GenerateLogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<GenerateLogEntry>(&line).ok())
        .collect()
}

/// Entries from the last `days` days, or all entries when `None`.
pub fn read_entries_since_days(days: Option<u32>) -> Vec<GenerateLogEntry> {
    filter_since_days(read_all_entries(), days)
}

pub(crate) fn filter_since_days(
    entries: Vec<GenerateLogEntry>,
    days: Option<u32>,
) -> Vec<GenerateLogEntry> {
    let Some(days) = days else {
        return entries;
    };

    let Some(cutoff) = chrono::TimeDelta::try_days(i64::from(days))
        .and_then(|span| Utc::now().checked_sub_signed(span))
    else {
        return entries;
    };
    let cutoff = cutoff.to_rfc3339();
    entries
        .into_iter()
        .filter(|e| e.timestamp >= cutoff)
        .collect()
}

pub fn generate_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".timetable-dash").join("generate-log.jsonl"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;
    use crate::metrics::MetricValue;

    fn temp_log(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("timetable-dash-test-{}", std::process::id()))
            .join(name)
    }

    fn metrics() -> MetricsResponse {
        MetricsResponse {
            fitness_score: 91.2,
            conflicts: 1,
            hard: MetricValue::Text("-".into()),
            soft: MetricValue::Text("-".into()),
            time: 42.0,
            fitness_progress: Vec::new(),
        }
    }

    #[test]
    fn entry_from_success_carries_metrics() {
        let outcome: Result<_, GenerateError> = Ok(metrics());
        let e = GenerateLogEntry::from_outcome(Trimester::First, "GA_input.xlsx", &outcome, 900);
        assert!(e.success);
        assert_eq!(e.fitness_score, Some(91.2));
        assert_eq!(e.conflicts, Some(1));
        assert_eq!(e.generation_secs, Some(42.0));
        assert!(e.error.is_none());
    }

    #[test]
    fn entry_from_failure_carries_message() {
        let outcome: Result<MetricsResponse, _> = Err(GenerateError::HttpStatus(500));
        let e = GenerateLogEntry::from_outcome(Trimester::Second, "in.xlsx", &outcome, 10);
        assert!(!e.success);
        assert_eq!(e.error.as_deref(), Some("Failed to generate schedule!"));
        assert!(e.fitness_score.is_none());
    }

    #[test]
    fn append_then_read_skips_garbage() {
        let path = temp_log("append.jsonl");
        let _ = fs::remove_file(&path);

        let outcome: Result<_, GenerateError> = Ok(metrics());
        let entry = GenerateLogEntry::from_outcome(Trimester::Third, "a.xlsx", &outcome, 5);
        append_entry(&path, &entry).unwrap();
        {
            let mut f = OpenOptions::new().append(true).open(&path).unwrap();
            writeln!(f, "not json").unwrap();
        }
        append_entry(&path, &entry).unwrap();

        let read = read_entries_from(&path);
        assert_eq!(read.len(), 2);
        assert_eq!(read[0], entry);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn huge_day_window_keeps_everything() {
        let outcome: Result<_, GenerateError> = Ok(metrics());
        let mut old = GenerateLogEntry::from_outcome(Trimester::First, "a.xlsx", &outcome, 5);
        old.timestamp = "2001-01-01T00:00:00+00:00".to_string();

        let kept = filter_since_days(vec![old.clone()], Some(u32::MAX));
        assert_eq!(kept, vec![old.clone()]);
        assert!(filter_since_days(vec![old], Some(1)).is_empty());
    }

    #[test]
    fn missing_log_reads_empty() {
        assert!(read_entries_from(&temp_log("does-not-exist.jsonl")).is_empty());
    }

    #[test]
    fn day_filter_drops_old_entries() {
        let outcome: Result<_, GenerateError> = Ok(metrics());
        let fresh = GenerateLogEntry::from_outcome(Trimester::First, "a", &outcome, 1);
        let mut old = fresh.clone();
        old.timestamp = "2000-01-01T00:00:00+00:00".to_string();

        let kept = filter_since_days(vec![old.clone(), fresh.clone()], Some(7));
        assert_eq!(kept, vec![fresh]);
        assert_eq!(filter_since_days(vec![old], None).len(), 1);
    }
}
