use std::collections::VecDeque;

/// Default number of points kept per live chart.
pub const DEFAULT_WINDOW_POINTS: usize = 11;

/// Capped sliding window of labelled samples.
///
/// Labels and values always have the same length. Pushing into a full
/// window drops the oldest label and value first.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesWindow {
    capacity: usize,
    labels: VecDeque<String>,
    values: VecDeque<f64>,
}

impl SeriesWindow {
    /// Create an empty window. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            labels: VecDeque::with_capacity(capacity),
            values: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        while self.values.len() >= self.capacity {
            self.labels.pop_front();
            self.values.pop_front();
        }
        self.labels.push_back(label.into());
        self.values.push_back(value);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Snapshot as owned vectors, oldest first.
    pub fn snapshot(&self) -> (Vec<String>, Vec<f64>) {
        (
            self.labels.iter().cloned().collect(),
            self.values.iter().copied().collect(),
        )
    }
}

impl Default for SeriesWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_POINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_capacity() {
        let mut w = SeriesWindow::default();
        for i in 0..100 {
            w.push(format!("t{i}"), i as f64);
            assert!(w.len() <= DEFAULT_WINDOW_POINTS);
        }
        assert_eq!(w.len(), DEFAULT_WINDOW_POINTS);
    }

    #[test]
    fn evicts_oldest_label_and_value_together() {
        let mut w = SeriesWindow::new(3);
        for (i, label) in ["a", "b", "c", "d"].iter().enumerate() {
            w.push(*label, i as f64);
        }
        let (labels, values) = w.snapshot();
        assert_eq!(labels, vec!["b", "c", "d"]);
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn zero_capacity_keeps_latest_point() {
        let mut w = SeriesWindow::new(0);
        w.push("a", 1.0);
        w.push("b", 2.0);
        assert_eq!(w.capacity(), 1);
        assert_eq!(w.labels().collect::<Vec<_>>(), vec!["b"]);
    }
}
