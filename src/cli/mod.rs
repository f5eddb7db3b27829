//! CLI command implementations for timetable-dash.
//!
//! Provides subcommand handlers for:
//! - `timetable-dash generate FILE --trimester N` - upload, render metrics, save artifacts
//! - `timetable-dash download excel|json --trimester N` - fetch one artifact
//! - `timetable-dash interpret SCORE` - band a fitness score
//! - `timetable-dash history --days N` - summary of past generate runs
//! - `timetable-dash config show|init|set|reset` - configuration management

pub mod terminal;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Result, bail};
use colored::Colorize;

use crate::activity::logger::{self, GenerateLogEntry};
use crate::activity::reporter::{self, HistorySummary};
use crate::client::{ScheduleClient, UploadFile};
use crate::config::{self, DashConfig};
use crate::endpoints::ArtifactKind;
use crate::metrics::{FitnessBand, parse_displayed_score};
use crate::trimester::Trimester;
use crate::ui::generate::GenerateFlow;

use terminal::TerminalView;

/// Output format for the history command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Per-invocation overrides shared by the commands that talk to the backend.
#[derive(Debug, Clone, Default)]
pub struct ClientArgs {
    pub backend: Option<String>,
    pub out_dir: Option<PathBuf>,
}

impl ClientArgs {
    fn client(&self, config: &DashConfig) -> ScheduleClient {
        let backend = self
            .backend
            .as_deref()
            .unwrap_or(&config.server.backend_url);
        ScheduleClient::new(backend, &config.client)
    }

    fn out_dir(&self, config: &DashConfig) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.client.out_dir))
    }
}

// ---------------------------------------------------------------------------
// timetable-dash generate
// ---------------------------------------------------------------------------

/// Upload a GA input file and render the resulting metrics.
pub fn run_generate(
    config: &DashConfig,
    args: &ClientArgs,
    file: Option<&Path>,
    trimester: Option<&str>,
) -> Result<()> {
    let client = args.client(config);
    let flow = GenerateFlow::new(client.endpoints().clone());
    let selection = Trimester::from_selection(trimester);
    let mut view = TerminalView::new(&client, args.out_dir(config), selection.clone().ok());

    let upload = match file {
        Some(path) => Some(UploadFile::read(path)?),
        None => None,
    };

    let Some(pending) = flow.begin(&mut view, selection, upload) else {
        bail!("generate aborted");
    };

    println!(
        "{} {} {} {}",
        "Uploading".bold(),
        pending.upload.name.cyan(),
        "for trimester".bold(),
        pending.trimester
    );
    println!();

    let started = Instant::now();
    let outcome = client.generate(&pending.url, &pending.upload, pending.trimester);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if config.logging.enabled {
        logger::log_generate(&GenerateLogEntry::from_outcome(
            pending.trimester,
            &pending.upload.name,
            &outcome,
            elapsed_ms,
        ));
    }

    let outcome = flow.finish(&mut view, pending.trimester, outcome);
    match outcome {
        Ok(_) => {
            println!();
            println!(
                "{} {} artifact(s) saved in {:.1}s",
                "✓".green().bold(),
                view.saved().len(),
                elapsed_ms as f64 / 1000.0
            );
            Ok(())
        }
        Err(e) => bail!("generate failed: {e}"),
    }
}

// ---------------------------------------------------------------------------
// timetable-dash download
// ---------------------------------------------------------------------------

/// Fetch one exported artifact for a trimester.
pub fn run_download(
    config: &DashConfig,
    args: &ClientArgs,
    kind: ArtifactKind,
    trimester: Option<&str>,
) -> Result<()> {
    let client = args.client(config);
    let flow = GenerateFlow::new(client.endpoints().clone());
    let selection = Trimester::from_selection(trimester);
    let failed = selection.is_err();

    let mut view = TerminalView::new(&client, args.out_dir(config), selection.clone().ok());
    flow.download(&mut view, selection, kind);

    if failed || view.saved().is_empty() {
        bail!("{kind} download failed");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// timetable-dash interpret
// ---------------------------------------------------------------------------

/// Print the quality band for a score such as `93.4` or `93.4%`.
pub fn run_interpret(score: &str) -> Result<()> {
    let value = parse_displayed_score(score);
    let band = FitnessBand::from_score(value);
    let headline = match band {
        FitnessBand::Excellent | FitnessBand::Good => band.headline().green(),
        FitnessBand::Average => band.headline().yellow(),
        FitnessBand::Poor => band.headline().red(),
    };
    println!("{} {} ({})", band.marker(), headline.bold(), band.detail());
    Ok(())
}

// ---------------------------------------------------------------------------
// timetable-dash history
// ---------------------------------------------------------------------------

/// Summarize previous generate runs from the activity log.
pub fn run_history(format: OutputFormat, days: Option<u32>) -> Result<()> {
    let summary = reporter::compute_history(days);

    if summary.total_runs == 0 {
        println!(
            "{}",
            "No runs recorded yet. Use `timetable-dash generate` to create one.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Csv => print_history_csv(&summary),
        OutputFormat::Table => print_history_table(&summary),
    }

    Ok(())
}

fn print_history_table(summary: &HistorySummary) {
    println!("{}", "Schedule Generation History".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();

    println!("  {} {}", "Total runs:  ".bold(), summary.total_runs);
    println!(
        "  {} {} ({:.0}%)",
        "Successful:  ".bold(),
        summary.successful_runs,
        summary.success_pct()
    );
    println!("  {} {}", "Best fitness:".bold(), format_score(summary.best_fitness));
    println!("  {} {}", "Avg fitness: ".bold(), format_score(summary.avg_fitness));
    if let Some(ms) = summary.avg_elapsed_ms {
        println!("  {} {:.1}s", "Avg duration:".bold(), ms / 1000.0);
    }
    println!();

    println!("{}", "By Trimester".bold().cyan());
    println!("  {:<10} {:>6} {:>10} {:>10}", "Trimester", "Runs", "Succeeded", "Best");
    println!("  {}", "-".repeat(40));
    for stat in &summary.per_trimester {
        println!(
            "  {:<10} {:>6} {:>10} {:>10}",
            stat.trimester.to_string(),
            stat.runs,
            stat.successes,
            format_score(stat.best_fitness),
        );
    }
    println!();

    println!("{}", "Recent Runs".bold().cyan());
    for entry in &summary.recent {
        let status = if entry.success {
            format_score(entry.fitness_score).green()
        } else {
            "failed".red()
        };
        println!(
            "  {}  T{}  {:<24} {}",
            short_timestamp(&entry.timestamp).dimmed(),
            entry.trimester,
            truncate(&entry.file, 24),
            status
        );
    }
}

fn print_history_csv(summary: &HistorySummary) {
    println!("timestamp,trimester,file,success,fitness_score,conflicts,elapsed_ms");
    for e in &summary.recent {
        println!(
            "{},{},{},{},{},{},{}",
            e.timestamp,
            e.trimester,
            e.file,
            e.success,
            e.fitness_score.map(|s| s.to_string()).unwrap_or_default(),
            e.conflicts.map(|c| c.to_string()).unwrap_or_default(),
            e.elapsed_ms,
        );
    }
}

// ---------------------------------------------------------------------------
// timetable-dash config
// ---------------------------------------------------------------------------

/// Print the effective (merged) configuration.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective timetable-dash Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.timetable-dash/config.toml", global_exists);
    print_source(".timetable-dash.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "TIMETABLE_DASH_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Write the annotated default config file.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("  {}", "Edit the file to point at your backend.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve an artifact name given on the command line.
pub fn parse_artifact_kind(s: &str) -> Option<ArtifactKind> {
    match s.to_ascii_lowercase().as_str() {
        "excel" | "xlsx" => Some(ArtifactKind::Excel),
        "json" => Some(ArtifactKind::Json),
        _ => None,
    }
}

fn format_score(score: Option<f64>) -> String {
    score.map(|s| format!("{s:.2}%")).unwrap_or_else(|| "-".to_string())
}

fn short_timestamp(ts: &str) -> String {
    ts.get(..19).unwrap_or(ts).replace('T', " ")
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
