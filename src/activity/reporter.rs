//! Aggregates the generate log for `timetable-dash history`.

use std::collections::BTreeMap;

use serde::Serialize;

use super::logger::{self, GenerateLogEntry};
use crate::trimester::Trimester;

/// Runs shown in the "recent" list.
const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub total_runs: usize,
    pub successful_runs: usize,
    pub best_fitness: Option<f64>,
    pub avg_fitness: Option<f64>,
    pub avg_elapsed_ms: Option<f64>,
    pub per_trimester: Vec<TrimesterStat>,
    /// Newest first.
    pub recent: Vec<GenerateLogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrimesterStat {
    pub trimester: Trimester,
    pub runs: usize,
    pub successes: usize,
    pub best_fitness: Option<f64>,
}

impl HistorySummary {
    pub fn success_pct(&self) -> f64 {
        if self.total_runs == 0 {
            0.0
        } else {
            self.successful_runs as f64 / self.total_runs as f64 * 100.0
        }
    }
}

/// Summarize the log entries of the last `days` days.
pub fn compute_history(days: Option<u32>) -> HistorySummary {
    summarize(&logger::read_entries_since_days(days))
}

pub fn summarize(entries: &[GenerateLogEntry]) -> HistorySummary {
    let scores: Vec<f64> = entries.iter().filter_map(|e| e.fitness_score).collect();

    let mut by_trimester: BTreeMap<&str, TrimesterStat> = BTreeMap::new();
    for e in entries {
        let stat = by_trimester
            .entry(e.trimester.as_str())
            .or_insert_with(|| TrimesterStat {
                trimester: e.trimester,
                runs: 0,
                successes: 0,
                best_fitness: None,
            });
        stat.runs += 1;
        if e.success {
            stat.successes += 1;
        }
        stat.best_fitness = max_opt(stat.best_fitness, e.fitness_score);
    }

    let mut recent: Vec<GenerateLogEntry> = entries.to_vec();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent.truncate(RECENT_LIMIT);

    HistorySummary {
        total_runs: entries.len(),
        successful_runs: entries.iter().filter(|e| e.success).count(),
        best_fitness: scores.iter().copied().fold(None, |acc, s| max_opt(acc, Some(s))),
        avg_fitness: mean(&scores),
        avg_elapsed_ms: mean(&entries.iter().map(|e| e.elapsed_ms as f64).collect::<Vec<_>>()),
        per_trimester: by_trimester.into_values().collect(),
        recent,
    }
}

fn max_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ts: &str, t: Trimester, score: Option<f64>, elapsed_ms: u64) -> GenerateLogEntry {
        GenerateLogEntry {
            timestamp: ts.to_string(),
            trimester: t,
            file: "GA_input.xlsx".to_string(),
            success: score.is_some(),
            fitness_score: score,
            conflicts: score.map(|_| 0),
            generation_secs: None,
            elapsed_ms,
            error: score.is_none().then(|| "Failed to generate schedule!".to_string()),
        }
    }

    #[test]
    fn empty_log_summarizes_to_zero() {
        let s = summarize(&[]);
        assert_eq!(s.total_runs, 0);
        assert_eq!(s.success_pct(), 0.0);
        assert!(s.best_fitness.is_none());
        assert!(s.avg_elapsed_ms.is_none());
        assert!(s.per_trimester.is_empty());
    }

    #[test]
    fn aggregates_runs_and_fitness() {
        let entries = vec![
            entry("2026-01-01T10:00:00+00:00", Trimester::First, Some(90.0), 1000),
            entry("2026-01-02T10:00:00+00:00", Trimester::First, None, 3000),
            entry("2026-01-03T10:00:00+00:00", Trimester::Third, Some(98.5), 2000),
        ];
        let s = summarize(&entries);
        assert_eq!(s.total_runs, 3);
        assert_eq!(s.successful_runs, 2);
        assert_eq!(s.best_fitness, Some(98.5));
        assert_eq!(s.avg_fitness, Some(94.25));
        assert_eq!(s.avg_elapsed_ms, Some(2000.0));
        assert_eq!(s.per_trimester.len(), 2);
        assert_eq!(s.per_trimester[0].trimester, Trimester::First);
        assert_eq!(s.per_trimester[0].runs, 2);
        assert_eq!(s.per_trimester[0].successes, 1);
        assert_eq!(s.per_trimester[1].best_fitness, Some(98.5));
        assert_eq!(s.recent[0].trimester, Trimester::Third);
    }

    #[test]
    fn recent_is_capped() {
        let entries: Vec<_> = (0..25)
            .map(|i| entry(&format!("2026-01-01T10:00:{i:02}+00:00"), Trimester::Second, Some(80.0), 1))
            .collect();
        let s = summarize(&entries);
        assert_eq!(s.recent.len(), RECENT_LIMIT);
        assert!(s.recent[0].timestamp.ends_with(":24+00:00"));
    }
}
