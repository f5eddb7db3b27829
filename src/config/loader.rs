use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::schema::DashConfig;

const APP_DIR: &str = ".timetable-dash";
const PROJECT_FILE: &str = ".timetable-dash.toml";

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges defaults → global TOML → project TOML → env vars. Unreadable or
/// malformed files are skipped so a broken config never blocks the tool.
pub fn load() -> DashConfig {
    let mut merged = defaults_value();

    for path in [global_config_path(), project_config_path()] {
        if let Some(layer) = read_toml_value(path) {
            merge_tables(&mut merged, layer);
        }
    }

    let mut config: DashConfig = merged.try_into().unwrap_or_default();
    apply_env_overrides(&mut config);
    config
}

fn defaults_value() -> toml::Value {
    toml::Value::try_from(DashConfig::default())
        .unwrap_or_else(|_| toml::Value::Table(toml::map::Map::new()))
}

fn read_toml_value(path: Option<PathBuf>) -> Option<toml::Value> {
    let content = fs::read_to_string(path?).ok()?;
    let value: toml::Value = toml::from_str(&content).ok()?;
    // Reject layers that do not fit the schema at all.
    value.clone().try_into::<DashConfig>().ok()?;
    Some(value)
}

/// Overlay `layer` onto `base`, descending into tables so only keys present
/// in `layer` are replaced.
fn merge_tables(base: &mut toml::Value, layer: toml::Value) {
    match (base, layer) {
        (toml::Value::Table(base_table), toml::Value::Table(layer_table)) => {
            for (key, value) in layer_table {
                let nested = value.is_table() && base_table.get(&key).is_some_and(toml::Value::is_table);
                match base_table.get_mut(&key) {
                    Some(existing) if nested => merge_tables(existing, value),
                    _ => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, layer) => *base = layer,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR).join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir().ok().map(|cwd| cwd.join(PROJECT_FILE))
}

/// Path to the global config file, for display and `config init`.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Path to the project config file, for display.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply `TIMETABLE_DASH_*` overrides.
///
/// - `TIMETABLE_DASH_BACKEND_URL` - scheduling backend origin
/// - `TIMETABLE_DASH_LISTEN` - dev server address
/// - `TIMETABLE_DASH_PKG_DIR` - wasm-pack output directory
/// - `TIMETABLE_DASH_TIMEOUT_MS` - client request timeout
/// - `TIMETABLE_DASH_LOG` - activity log on/off
fn apply_env_overrides(config: &mut DashConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

fn apply_overrides(config: &mut DashConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(val) = var("TIMETABLE_DASH_BACKEND_URL")
        && !val.is_empty()
    {
        config.server.backend_url = val;
    }
    if let Some(val) = var("TIMETABLE_DASH_LISTEN")
        && !val.is_empty()
    {
        config.server.listen = val;
    }
    if let Some(val) = var("TIMETABLE_DASH_PKG_DIR")
        && !val.is_empty()
    {
        config.server.pkg_dir = val;
    }
    if let Some(val) = var("TIMETABLE_DASH_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.client.timeout_ms = ms;
    }
    if let Some(val) = var("TIMETABLE_DASH_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
}

fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to the global config path.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_config_file(&path, &DashConfig::default_toml())?;
    Ok(path)
}

/// Reset the global config to defaults.
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Set a dotted key (e.g. `server.backend_url`) in the global config file.
///
/// Starts from the defaults when no file exists yet. The value is parsed
/// according to the type of the key it replaces.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(&path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config file")?
    } else {
        defaults_value()
    };

    set_toml_value(&mut root, key, value)?;

    // Validate before writing so a bad value never lands on disk.
    root.clone()
        .try_into::<DashConfig>()
        .with_context(|| format!("'{value}' is not valid for '{key}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize config")?;
    write_config_file(&path, &output)
}

/// Effective (fully resolved) configuration as TOML.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

fn write_config_file(path: &std::path::Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, content).context("failed to write config file")
}

fn set_toml_value(root: &mut toml::Value, key: &str, raw: &str) -> Result<()> {
    let Some((section_path, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be 'section.key', got '{key}'");
    };

    let mut table = root
        .as_table_mut()
        .context("config root is not a table")?;
    for section in section_path.split('.') {
        table = table
            .get_mut(section)
            .and_then(toml::Value::as_table_mut)
            .with_context(|| format!("unknown config section '{section}' in '{key}'"))?;
    }

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw)),
        Some(toml::Value::Integer(_)) => toml::Value::Integer(
            raw.parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw}'"))?,
        ),
        Some(toml::Value::Float(_)) => toml::Value::Float(
            raw.parse()
                .with_context(|| format!("expected number for '{key}', got '{raw}'"))?,
        ),
        Some(toml::Value::String(_)) => toml::Value::String(raw.to_string()),
        Some(_) => anyhow::bail!("'{key}' cannot be set from the command line"),
        None => anyhow::bail!("unknown config key '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> toml::Value {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn merge_keeps_unset_keys_from_lower_layer() {
        let mut base = defaults_value();
        merge_tables(&mut base, table("[server]\nbackend_url = \"http://x:1\"\n"));
        let cfg: DashConfig = base.try_into().unwrap();
        assert_eq!(cfg.server.backend_url, "http://x:1");
        assert_eq!(cfg.server.listen, "127.0.0.1:8080");
        assert_eq!(cfg.dashboard.window_points, 11);
    }

    #[test]
    fn later_layer_wins() {
        let mut base = defaults_value();
        merge_tables(&mut base, table("[client]\ntimeout_ms = 10\n"));
        merge_tables(&mut base, table("[client]\ntimeout_ms = 20\n"));
        let cfg: DashConfig = base.try_into().unwrap();
        assert_eq!(cfg.client.timeout_ms, 20);
    }

    #[test]
    fn overrides_apply_from_lookup() {
        let mut cfg = DashConfig::default();
        apply_overrides(&mut cfg, |key| match key {
            "TIMETABLE_DASH_BACKEND_URL" => Some("http://sched:9000".to_string()),
            "TIMETABLE_DASH_TIMEOUT_MS" => Some("5000".to_string()),
            "TIMETABLE_DASH_LOG" => Some("off".to_string()),
            "TIMETABLE_DASH_LISTEN" => Some(String::new()),
            _ => None,
        });
        assert_eq!(cfg.server.backend_url, "http://sched:9000");
        assert_eq!(cfg.client.timeout_ms, 5000);
        assert!(!cfg.logging.enabled);
        assert_eq!(cfg.server.listen, "127.0.0.1:8080");
    }

    #[test]
    fn bad_timeout_override_is_ignored() {
        let mut cfg = DashConfig::default();
        apply_overrides(&mut cfg, |key| {
            (key == "TIMETABLE_DASH_TIMEOUT_MS").then(|| "soon".to_string())
        });
        assert_eq!(cfg.client.timeout_ms, 120_000);
    }

    #[test]
    fn is_truthy_accepts_variants() {
        for v in ["1", "true", "TRUE", "yes", "on"] {
            assert!(is_truthy(v), "{v}");
        }
        for v in ["0", "false", "no", "off", ""] {
            assert!(!is_truthy(v), "{v}");
        }
    }

    #[test]
    fn set_toml_value_respects_types() {
        let mut root = defaults_value();
        set_toml_value(&mut root, "server.open_browser", "no").unwrap();
        set_toml_value(&mut root, "dashboard.tick_interval_ms", "500").unwrap();
        set_toml_value(&mut root, "server.backend_url", "http://b:2").unwrap();
        let cfg: DashConfig = root.try_into().unwrap();
        assert!(!cfg.server.open_browser);
        assert_eq!(cfg.dashboard.tick_interval_ms, 500);
        assert_eq!(cfg.server.backend_url, "http://b:2");
    }

    #[test]
    fn set_toml_value_rejects_bad_input() {
        let mut root = defaults_value();
        assert!(set_toml_value(&mut root, "nonexistent.key", "v").is_err());
        assert!(set_toml_value(&mut root, "server.nope", "v").is_err());
        assert!(set_toml_value(&mut root, "client.timeout_ms", "fast").is_err());
        assert!(set_toml_value(&mut root, "toplevel", "v").is_err());
    }

    #[test]
    fn show_effective_config_round_trips() {
        let text = show_effective_config().unwrap();
        let _: DashConfig = toml::from_str(&text).unwrap();
    }
}
