// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub app: AppConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Worker threads for the runtime (CPU core count if not set)
    #[serde(default)]
    pub workers: Option<usize>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_log_level() -> String {
    "info".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            access_log: default_true(),
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Performance configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PerformanceConfig {
    /// Keep-alive timeout in seconds (0 disables keep-alive)
    #[serde(default = "default_keep_alive_timeout")]
    pub keep_alive_timeout: u64,
    #[serde(default = "default_io_timeout")]
    pub read_timeout: u64,
    #[serde(default = "default_io_timeout")]
    pub write_timeout: u64,
    /// Concurrent connection cap (unlimited if not set)
    #[serde(default)]
    pub max_connections: Option<u64>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_keep_alive_timeout() -> u64 {
    75
}

#[allow(clippy::missing_const_for_fn)]
fn default_io_timeout() -> u64 {
    30
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive_timeout: default_keep_alive_timeout(),
            read_timeout: default_io_timeout(),
            write_timeout: default_io_timeout(),
            max_connections: None,
        }
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    #[serde(default)]
    pub enable_cors: bool,
    /// Largest request body accepted, in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: u64,
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_body_size() -> u64 {
    16 * 1024
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enable_cors: false,
            max_body_size: default_max_body_size(),
        }
    }
}

/// Routes configuration
///
/// Each asset answers on every path in its list, so the canonical route and
/// the conventional aliases (`/sw.js`, `/manifest.json`) resolve alike.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoutesConfig {
    #[serde(default = "default_service_worker_paths")]
    pub service_worker_paths: Vec<String>,
    #[serde(default = "default_manifest_paths")]
    pub manifest_paths: Vec<String>,
    #[serde(default = "default_icon_paths")]
    pub icon_paths: Vec<String>,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
}

#[allow(clippy::missing_const_for_fn)]
fn default_service_worker_paths() -> Vec<String> {
    vec![
        "/service_worker".to_string(),
        "/serviceworker.js".to_string(),
        "/sw.js".to_string(),
    ]
}

#[allow(clippy::missing_const_for_fn)]
fn default_manifest_paths() -> Vec<String> {
    vec![
        "/manifest".to_string(),
        "/manifest.json".to_string(),
        "/manifest.webmanifest".to_string(),
    ]
}

#[allow(clippy::missing_const_for_fn)]
fn default_icon_paths() -> Vec<String> {
    vec!["/icon.svg".to_string(), "/favicon.svg".to_string()]
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            service_worker_paths: default_service_worker_paths(),
            manifest_paths: default_manifest_paths(),
            icon_paths: default_icon_paths(),
            health: HealthConfig::default(),
        }
    }
}

/// Health check configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

/// Web-app metadata, the source for every generated asset
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_short_name")]
    pub short_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_root_path")]
    pub start_url: String,
    #[serde(default = "default_root_path")]
    pub scope: String,
    #[serde(default)]
    pub display: DisplayMode,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
    /// Offline cache generation. Bumping it makes every installed worker
    /// discard its old cache on the next activation.
    #[serde(default = "default_cache_version")]
    pub cache_version: u32,
    /// URLs the worker caches at install time
    #[serde(default = "default_precache")]
    pub precache: Vec<String>,
    /// Serve this file instead of the generated service worker
    #[serde(default)]
    pub service_worker_file: Option<String>,
    /// Serve this file instead of the generated manifest
    #[serde(default)]
    pub manifest_file: Option<String>,
    /// Serve this file instead of the generated icon
    #[serde(default)]
    pub icon_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_app_name() -> String {
    "Progressive Web App".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_app_short_name() -> String {
    "pwad".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_root_path() -> String {
    "/".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_background_color() -> String {
    "#111827".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_theme_color() -> String {
    "#2563eb".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_cache_version() -> u32 {
    1
}

#[allow(clippy::missing_const_for_fn)]
fn default_precache() -> Vec<String> {
    vec![
        "/".to_string(),
        "/manifest.json".to_string(),
        "/icon.svg".to_string(),
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            short_name: default_app_short_name(),
            description: None,
            start_url: default_root_path(),
            scope: default_root_path(),
            display: DisplayMode::default(),
            orientation: None,
            background_color: default_background_color(),
            theme_color: default_theme_color(),
            cache_version: default_cache_version(),
            precache: default_precache(),
            service_worker_file: None,
            manifest_file: None,
            icon_file: None,
        }
    }
}

/// Manifest `display` member
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    Fullscreen,
    #[default]
    Standalone,
    MinimalUi,
    Browser,
}

/// Manifest `orientation` member
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    Any,
    Natural,
    Landscape,
    LandscapePrimary,
    LandscapeSecondary,
    Portrait,
    PortraitPrimary,
    PortraitSecondary,
}
