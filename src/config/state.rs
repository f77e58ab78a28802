// Application state module
// Immutable snapshot shared by every connection

use crate::assets::PwaAssets;

use super::types::Config;

/// Shared application state
///
/// Built once at startup and never mutated, so the request path reads it
/// without locks. Changing configuration means restarting the process.
pub struct AppState {
    pub config: Config,
    /// Payloads rendered from `config.app`, with precomputed validators
    pub assets: PwaAssets,
}

impl AppState {
    /// Render the asset set and freeze the configuration
    pub fn new(config: Config) -> Result<Self, serde_json::Error> {
        let assets = PwaAssets::build(&config)?;
        Ok(Self { config, assets })
    }
}
