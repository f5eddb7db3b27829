/// Dashboard behavior tests.
///
/// Covers the pieces the page is built from: drop zones, the live load
/// charts, navbar behavior, metrics decoding and fitness interpretation.
/// Everything here runs natively against recording fakes.
use std::cell::RefCell;
use std::rc::Rc;

use timetable_dash::charts::{ChartSurface, DEFAULT_WINDOW_POINTS, LoadKind, LoadMonitor};
use timetable_dash::metrics::{
    FitnessBand, MetricField, MetricValue, MetricsResponse, TrendSeries,
    get_fitness_interpretation, parse_displayed_score,
};
use timetable_dash::ui::dropzone::{CHECK_ZONES, DATASET_ZONE, ZoneEffect, ZoneEvent};
use timetable_dash::ui::navigation::{
    NavAction, download_button_actions, generate_link_actions, menu_link_actions,
    releases_session_on_pagehide,
};

// ---------------------------------------------------------------------------
// Drop zones
// ---------------------------------------------------------------------------

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn dropping_files_assigns_them_and_labels_first() {
    let dropped = names(&["GA_input.xlsx", "other.xlsx", "third.xlsx"]);
    let effects = DATASET_ZONE.handle(ZoneEvent::Drop(&dropped));
    assert_eq!(
        effects,
        vec![
            ZoneEffect::PreventDefault,
            ZoneEffect::SetHighlight(false),
            ZoneEffect::AssignDroppedFiles,
            ZoneEffect::SetLabel("Selected: GA_input.xlsx".to_string()),
        ]
    );
}

#[test]
fn checker_zones_show_bare_names() {
    let dropped = names(&["timetable.json"]);
    for zone in CHECK_ZONES {
        let effects = zone.handle(ZoneEvent::Drop(&dropped));
        assert!(effects.contains(&ZoneEffect::SetLabel("timetable.json".to_string())));
    }
}

#[test]
fn empty_drop_only_clears_highlight() {
    let effects = DATASET_ZONE.handle(ZoneEvent::Drop(&[]));
    assert_eq!(
        effects,
        vec![ZoneEffect::PreventDefault, ZoneEffect::SetHighlight(false)]
    );
}

#[test]
fn drag_cycle_toggles_highlight() {
    let zone = CHECK_ZONES[0];
    assert!(zone.handle(ZoneEvent::DragOver).contains(&ZoneEffect::SetHighlight(true)));
    assert!(zone.handle(ZoneEvent::DragLeave).contains(&ZoneEffect::SetHighlight(false)));
    assert_eq!(zone.handle(ZoneEvent::Click), vec![ZoneEffect::OpenFileDialog]);
}

#[test]
fn clearing_selection_clears_label() {
    assert_eq!(
        DATASET_ZONE.handle(ZoneEvent::Selected(&[])),
        vec![ZoneEffect::SetLabel(String::new())]
    );
}

// ---------------------------------------------------------------------------
// Load charts
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Canvas(Rc<RefCell<Vec<(Vec<String>, Vec<f64>)>>>);

impl ChartSurface for Canvas {
    fn draw(&mut self, labels: &[String], values: &[f64]) {
        self.0.borrow_mut().push((labels.to_vec(), values.to_vec()));
    }
}

#[test]
fn ticker_never_exceeds_window() {
    let canvas = Canvas::default();
    let mut monitor = LoadMonitor::new(DEFAULT_WINDOW_POINTS, |_| Some(canvas.clone()));

    for i in 0..50 {
        monitor.tick(&format!("10:00:{i:02}"), || 0.5);
        for kind in LoadKind::ALL {
            let window = monitor.window(kind).unwrap();
            assert!(window.len() <= DEFAULT_WINDOW_POINTS);
        }
    }

    let draws = canvas.0.borrow();
    let (labels, values) = draws.last().unwrap();
    assert_eq!(values.len(), DEFAULT_WINDOW_POINTS);
    assert_eq!(labels.first().map(String::as_str), Some("10:00:39"));
    assert_eq!(labels.last().map(String::as_str), Some("10:00:49"));
}

#[test]
fn samples_follow_each_chart_range() {
    let canvas = Canvas::default();
    let mut monitor = LoadMonitor::new(5, |_| Some(canvas.clone()));
    let mut draws = [0.0, 0.999, 0.5].into_iter().cycle();
    monitor.tick("t", || draws.next().unwrap_or(0.0));

    let cpu: Vec<f64> = monitor.window(LoadKind::Cpu).unwrap().values().collect();
    let ram: Vec<f64> = monitor.window(LoadKind::Ram).unwrap().values().collect();
    let mem: Vec<f64> = monitor.window(LoadKind::Memory).unwrap().values().collect();
    assert_eq!(cpu, vec![0.0]);
    assert!((ram[0] - 49.95).abs() < 1e-9);
    assert_eq!(mem, vec![90.0]);
}

#[test]
fn page_without_canvases_ticks_nothing() {
    let mut monitor: LoadMonitor<Canvas> = LoadMonitor::new(11, |_| None);
    monitor.tick("t", || 0.5);
    assert_eq!(monitor.live_charts(), 0);
    assert!(monitor.window(LoadKind::Cpu).unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[test]
fn generate_link_scrolls_on_landing_page_only() {
    assert_eq!(
        generate_link_actions("/"),
        vec![
            NavAction::PreventDefault,
            NavAction::ScrollToContent,
            NavAction::CollapseMenu
        ]
    );
    assert!(generate_link_actions("/check").is_empty());
    assert_eq!(menu_link_actions(), vec![NavAction::CollapseMenu]);
}

#[test]
fn download_buttons_suppress_default_navigation() {
    assert_eq!(download_button_actions(), vec![NavAction::PreventDefault]);
}

#[test]
fn cached_page_keeps_its_session() {
    assert!(!releases_session_on_pagehide(true));
    assert!(releases_session_on_pagehide(false));
}

// ---------------------------------------------------------------------------
// Metrics and interpretation
// ---------------------------------------------------------------------------

#[test]
fn interpretation_bands_are_distinct_and_inclusive() {
    let messages: Vec<String> = [98.0, 90.0, 75.0, 50.0]
        .into_iter()
        .map(get_fitness_interpretation)
        .collect();
    for (i, a) in messages.iter().enumerate() {
        for b in &messages[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(messages[0].contains("Excellent schedule!"));
    assert!(messages[1].contains("Good schedule."));
    assert!(messages[2].contains("Average schedule."));
    assert!(messages[3].contains("Poor schedule!"));

    assert_eq!(FitnessBand::from_score(97.99), FitnessBand::Good);
    assert_eq!(FitnessBand::from_score(89.99), FitnessBand::Average);
    assert_eq!(FitnessBand::from_score(74.99), FitnessBand::Poor);
}

#[test]
fn displayed_score_round_trips_through_interpretation() {
    assert_eq!(
        get_fitness_interpretation(parse_displayed_score("93.4%")),
        FitnessBand::Good.html()
    );
    assert_eq!(
        get_fitness_interpretation(parse_displayed_score("-")),
        FitnessBand::Poor.html()
    );
}

#[test]
fn progress_is_rescaled_for_the_trend_chart() {
    let trend = TrendSeries::from_progress(&[0.0, 1.0, 4.0]);
    assert_eq!(trend.values, vec![10000.0, 5000.0, 2000.0]);
    assert_eq!(trend.labels, vec!["Gen 1", "Gen 2", "Gen 3"]);
}

#[test]
fn backend_response_decodes_with_placeholders() {
    let body = r#"{
        "fitnessScore": 96.5,
        "conflicts": 2,
        "hard": "-",
        "soft": 88.25,
        "time": 12.4,
        "fitness_progress": [3, 1, 0]
    }"#;
    let metrics: MetricsResponse = serde_json::from_str(body).unwrap();
    assert_eq!(metrics.hard, MetricValue::Text("-".into()));
    assert_eq!(metrics.field_text(MetricField::FitnessScore), "96.5%");
    assert_eq!(metrics.field_text(MetricField::Conflicts), "2");
    assert_eq!(metrics.field_text(MetricField::HardConstraints), "-%");
    assert_eq!(metrics.field_text(MetricField::SoftConstraints), "88.25%");
    assert_eq!(metrics.field_text(MetricField::GenerationTime), "12.4s");
    assert_eq!(metrics.band(), FitnessBand::Good);
    assert_eq!(metrics.trend().values, vec![2500.0, 5000.0, 10000.0]);
}

#[test]
fn missing_progress_defaults_to_empty_trend() {
    let body = r#"{"fitnessScore": 70, "conflicts": 9, "hard": 50, "soft": 40, "time": 1}"#;
    let metrics: MetricsResponse = serde_json::from_str(body).unwrap();
    assert!(metrics.trend().is_empty());
    assert_eq!(metrics.band(), FitnessBand::Poor);
}
