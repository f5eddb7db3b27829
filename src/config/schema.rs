/// Configuration schema and defaults for timetable-dash.
///
/// Defines the TOML-serializable configuration structure with the
/// `[server]`, `[client]`, `[dashboard]` and `[logging]` sections.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use serde::{Deserialize, Serialize};

use crate::charts::{DEFAULT_TICK_INTERVAL_MS, DEFAULT_WINDOW_POINTS};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration.
///
/// Maps directly to `~/.timetable-dash/config.toml` and
/// `.timetable-dash.toml`. All sections and fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

/// Local dev server settings (`timetable-dash serve`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the dashboard is served on.
    pub listen: String,
    /// Origin of the scheduling backend that generate/download requests
    /// are forwarded to.
    pub backend_url: String,
    /// Directory holding the wasm-pack output served under `/pkg/`.
    pub pkg_dir: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8080".to_string(),
            backend_url: "http://127.0.0.1:5000".to_string(),
            pkg_dir: "pkg".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [client]
// ---------------------------------------------------------------------------

/// Terminal client settings (`timetable-dash generate` / `download`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Request timeout. Generation can take minutes on large inputs.
    pub timeout_ms: u64,
    /// Where downloaded artifacts are written.
    pub out_dir: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 120_000,
            out_dir: ".".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [dashboard]
// ---------------------------------------------------------------------------

/// Live chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Period of the simulated load samples.
    pub tick_interval_ms: u32,
    /// Points kept per load chart.
    pub window_points: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            window_points: DEFAULT_WINDOW_POINTS,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Activity log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Record every `generate` run to `~/.timetable-dash/generate-log.jsonl`.
    pub enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl DashConfig {
    /// Annotated default config file, written by `config init`.
    pub fn default_toml() -> String {
        r#"# timetable-dash configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (TIMETABLE_DASH_*)
#   2. Project config (.timetable-dash.toml in current directory)
#   3. User global config (~/.timetable-dash/config.toml)
#   4. Built-in defaults

[server]
listen = "127.0.0.1:8080"
backend_url = "http://127.0.0.1:5000"   # Scheduling backend
pkg_dir = "pkg"                         # wasm-pack output served under /pkg/
open_browser = true

[client]
timeout_ms = 120000
out_dir = "."

[dashboard]
tick_interval_ms = 2000
window_points = 11

[logging]
enabled = true                          # ~/.timetable-dash/generate-log.jsonl
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
