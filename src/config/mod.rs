/// Configuration system for timetable-dash.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: [`schema::DashConfig::default()`]
/// 2. **User global config**: `~/.timetable-dash/config.toml`
/// 3. **Project local config**: `.timetable-dash.toml` in the current directory
/// 4. **Environment variables**: `TIMETABLE_DASH_*` overrides (highest precedence)
///
/// Layers are merged key by key: a file that only sets
/// `server.backend_url` leaves every other value from the layer below.
///
/// The browser build only uses the schema defaults; file and environment
/// loading exist on native targets.
///
/// # Usage
///
/// ```rust,ignore
/// use timetable_dash::config;
///
/// let cfg = config::load();
/// println!("forwarding to {}", cfg.server.backend_url);
/// ```
pub mod schema;

#[cfg(not(target_arch = "wasm32"))]
mod loader;

#[cfg(not(target_arch = "wasm32"))]
pub use loader::{
    global_config_file, init_config, load, project_config_file, reset_config, set_config_value,
    show_effective_config,
};
pub use schema::{ClientConfig, DashConfig, DashboardConfig, LoggingConfig, ServerConfig};
