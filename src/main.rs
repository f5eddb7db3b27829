#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Result, bail};
#[cfg(not(target_arch = "wasm32"))]
use clap::{Parser, Subcommand};

#[cfg(not(target_arch = "wasm32"))]
use timetable_dash::cli::{self, ClientArgs};
#[cfg(not(target_arch = "wasm32"))]
use timetable_dash::config;
#[cfg(not(target_arch = "wasm32"))]
use timetable_dash::server::DevServer;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(name = "timetable-dash")]
#[command(about = "Dashboard, dev server and terminal client for the AITU timetable generator")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the dashboard and forward API calls to the backend
    Serve {
        /// Listen address (default from config: 127.0.0.1:8080)
        #[arg(long)]
        addr: Option<String>,
        /// Backend origin, e.g. http://127.0.0.1:5000
        #[arg(long)]
        backend: Option<String>,
        /// Do not open a browser window
        #[arg(long)]
        no_open: bool,
    },
    /// Upload a GA input file, print the metrics and save both exports
    Generate {
        /// GA input Excel file
        file: Option<PathBuf>,
        /// Trimester to generate for (1, 2 or 3)
        #[arg(long, short)]
        trimester: Option<String>,
        /// Directory the exports are written to
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Backend origin
        #[arg(long)]
        backend: Option<String>,
    },
    /// Download an exported timetable (excel or json)
    Download {
        /// Artifact kind: excel, json
        kind: String,
        /// Trimester to export (1, 2 or 3)
        #[arg(long, short)]
        trimester: Option<String>,
        /// Directory the export is written to
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Backend origin
        #[arg(long)]
        backend: Option<String>,
    },
    /// Explain a fitness score
    Interpret {
        /// Score, with or without a trailing %
        score: String,
    },
    /// Summarize past generate runs
    History {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a value, e.g. `server.backend_url http://host:5000`
    Set { key: String, value: String },
    /// Restore the default config file
    Reset,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Serve {
            addr,
            backend,
            no_open,
        } => {
            let mut cfg = config::load();
            if let Some(backend) = backend {
                cfg.server.backend_url = backend;
            }
            let addr = addr.unwrap_or_else(|| cfg.server.listen.clone());
            let open = cfg.server.open_browser && !no_open;
            DevServer::new(&cfg.server, &cfg.client).serve(&addr, open)
        }
        Commands::Generate {
            file,
            trimester,
            out_dir,
            backend,
        } => {
            let cfg = config::load();
            let args = ClientArgs { backend, out_dir };
            cli::run_generate(&cfg, &args, file.as_deref(), trimester.as_deref())
        }
        Commands::Download {
            kind,
            trimester,
            out_dir,
            backend,
        } => {
            let Some(kind) = cli::parse_artifact_kind(&kind) else {
                bail!("unknown artifact '{kind}', expected excel or json");
            };
            let cfg = config::load();
            let args = ClientArgs { backend, out_dir };
            cli::run_download(&cfg, &args, kind, trimester.as_deref())
        }
        Commands::Interpret { score } => cli::run_interpret(&score),
        Commands::History { format, days } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_history(fmt, days)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
