// Configuration module entry point
// Layers defaults, an optional TOML file and PWAD_* environment variables

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    AppConfig, Config, DisplayMode, HealthConfig, HttpConfig, LoggingConfig, Orientation,
    PerformanceConfig, RoutesConfig, ServerConfig,
};

/// Environment variable naming the config file (without extension)
const CONFIG_PATH_VAR: &str = "PWAD_CONFIG";

impl Config {
    /// Load configuration from the default location
    ///
    /// Reads the file named by `PWAD_CONFIG`, falling back to `config` in
    /// the working directory. A missing file is not an error: every field
    /// has a default, so an empty environment yields a runnable config.
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config".to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Environment variables override file values, nested keys separated by
    /// double underscores: `PWAD_SERVER__PORT=9090` sets `server.port`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        // Without an explicit prefix separator the nesting separator would
        // apply to the prefix too, requiring PWAD__SERVER__PORT.
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("PWAD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Parse configuration from a TOML string
    ///
    /// Field defaults apply exactly as in `load_from`, so partial documents
    /// are fine.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
