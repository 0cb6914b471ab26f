//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navgraph/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::SampleApp;
use crate::core::location::{Coordinate, DEFAULT_MAP_ZOOM, FALLBACK_COORDINATE};
use crate::core::splash::DEFAULT_SPLASH_DURATION_MS;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavgraphConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub crane: GraphConfig,
    #[serde(default)]
    pub jetsnack: GraphConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_app: Option<SampleApp>,
    pub splash_duration_ms: Option<u64>,
    pub restore_session: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocationConfig {
    pub fallback_latitude: Option<f64>,
    pub fallback_longitude: Option<f64>,
    pub zoom: Option<f32>,
    /// Simulated device fix, `"lat,lon"`.
    pub device: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GraphConfig {
    pub initial_tab: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub app: SampleApp,
    pub splash_duration: Duration,
    pub restore_session: bool,
    pub log_level: LevelFilter,
    pub fallback_location: Coordinate,
    pub map_zoom: f32,
    pub device_location: Option<Coordinate>,
    pub crane_initial_tab: Option<String>,
    pub jetsnack_initial_tab: Option<String>,
}

impl ResolvedConfig {
    /// Configured initial tab name for a graph, if any.
    pub fn initial_tab_for(&self, app: SampleApp) -> Option<&str> {
        match app {
            SampleApp::Crane => self.crane_initial_tab.as_deref(),
            SampleApp::Jetsnack => self.jetsnack_initial_tab.as_deref(),
        }
    }
}

/// Built-in defaults only. No file or environment is consulted.
impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with_env(&NavgraphConfig::default(), &CliOverrides::default(), |_| None)
    }
}

/// Values taken from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub app: Option<SampleApp>,
    pub location: Option<Coordinate>,
    pub fresh: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.navgraph`.
pub fn navgraph_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navgraph"))
}

/// Returns the path to `~/.navgraph/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    navgraph_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.navgraph/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NavgraphConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NavgraphConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NavgraphConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<NavgraphConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(NavgraphConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NavgraphConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Navgraph Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_app = "crane"              # "crane" or "jetsnack" (NAVGRAPH_APP, --app)
# splash_duration_ms = 2000          # NAVGRAPH_SPLASH_MS
# restore_session = true             # --fresh skips restoring
# log_level = "debug"                # NAVGRAPH_LOG

# [location]
# fallback_latitude = 51.145529
# fallback_longitude = 5.740863
# zoom = 6.0
# device = "40.4168,-3.7038"         # NAVGRAPH_DEVICE_LOCATION, --location

# [crane]
# initial_tab = "here"               # "sleep", "eat" or "here"

# [jetsnack]
# initial_tab = "feed"               # "feed", "search", "cart" or "profile"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NavgraphConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with the environment supplied as a lookup function.
fn resolve_with_env(
    config: &NavgraphConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // App: CLI → env → config → default
    let app = cli
        .app
        .or_else(|| env_parse(&env, "NAVGRAPH_APP", parse_app))
        .or(config.general.default_app)
        .unwrap_or_default();

    // Splash duration: env → config → default
    let splash_ms = env_parse(&env, "NAVGRAPH_SPLASH_MS", |s| s.parse().ok())
        .or(config.general.splash_duration_ms)
        .unwrap_or(DEFAULT_SPLASH_DURATION_MS);

    // Log level: env → config → Debug
    let log_level = env_parse(&env, "NAVGRAPH_LOG", |s| s.parse().ok())
        .or_else(|| {
            config
                .general
                .log_level
                .as_deref()
                .and_then(|s| s.parse().ok())
        })
        .unwrap_or(LevelFilter::Debug);

    // Device location: CLI → env → config
    let device_location = cli
        .location
        .or_else(|| env_parse(&env, "NAVGRAPH_DEVICE_LOCATION", |s| s.parse().ok()))
        .or_else(|| config_device_location(config));

    let fallback_location = Coordinate::new(
        config
            .location
            .fallback_latitude
            .unwrap_or(FALLBACK_COORDINATE.latitude),
        config
            .location
            .fallback_longitude
            .unwrap_or(FALLBACK_COORDINATE.longitude),
    )
    .unwrap_or_else(|e| {
        warn!("Ignoring configured fallback location: {}", e);
        FALLBACK_COORDINATE
    });

    ResolvedConfig {
        app,
        splash_duration: Duration::from_millis(splash_ms),
        restore_session: !cli.fresh && config.general.restore_session.unwrap_or(true),
        log_level,
        fallback_location,
        map_zoom: config.location.zoom.unwrap_or(DEFAULT_MAP_ZOOM),
        device_location,
        crane_initial_tab: config.crane.initial_tab.clone(),
        jetsnack_initial_tab: config.jetsnack.initial_tab.clone(),
    }
}

fn parse_app(s: &str) -> Option<SampleApp> {
    match s.to_ascii_lowercase().as_str() {
        "crane" => Some(SampleApp::Crane),
        "jetsnack" => Some(SampleApp::Jetsnack),
        _ => None,
    }
}

fn env_parse<T>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let raw = env(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!("Ignoring unparseable {}={:?}", key, raw);
    }
    parsed
}

fn config_device_location(config: &NavgraphConfig) -> Option<Coordinate> {
    let raw = config.location.device.as_deref()?;
    match raw.parse() {
        Ok(c) => Some(c),
        Err(e) => {
            warn!("Ignoring configured device location: {}", e);
            None
        }
    }
}
