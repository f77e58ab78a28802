// Asset module entry point
// Renders and holds the payloads this server exists to serve

pub mod icon;
pub mod manifest;
pub mod service_worker;

pub use manifest::{ManifestIcon, WebAppManifest};

use hyper::body::Bytes;

use crate::config::Config;
use crate::http::cache;

/// One prebuilt payload with its precomputed validator
#[derive(Debug, Clone)]
pub struct Asset {
    pub bytes: Bytes,
    pub etag: String,
    /// Operator override; when set, handlers read this file per request
    /// instead of the prebuilt bytes
    pub override_file: Option<String>,
}

impl Asset {
    fn new(bytes: Vec<u8>, override_file: Option<String>) -> Self {
        let etag = cache::generate_etag(&bytes);
        Self {
            bytes: Bytes::from(bytes),
            etag,
            override_file,
        }
    }
}

/// The fixed asset set, rendered once from configuration
#[derive(Debug, Clone)]
pub struct PwaAssets {
    pub service_worker: Asset,
    pub manifest: Asset,
    pub icon: Asset,
}

impl PwaAssets {
    /// Render all three assets from the app section
    pub fn build(config: &Config) -> Result<Self, serde_json::Error> {
        let app = &config.app;
        let manifest_bytes = WebAppManifest::from_config(app, &config.routes).to_bytes()?;
        let worker_script = service_worker::render(app).into_bytes();
        let icon_svg = icon::render(app).into_bytes();

        Ok(Self {
            service_worker: Asset::new(worker_script, app.service_worker_file.clone()),
            manifest: Asset::new(manifest_bytes, app.manifest_file.clone()),
            icon: Asset::new(icon_svg, app.icon_file.clone()),
        })
    }
}
