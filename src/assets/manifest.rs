// Web-app manifest module
// Typed rendition of the manifest members this server emits

use serde::Serialize;

use crate::config::{AppConfig, DisplayMode, Orientation, RoutesConfig};

/// Web-app manifest document, serialized as the `/manifest` payload
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct WebAppManifest {
    pub name: String,
    pub short_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_url: String,
    pub scope: String,
    pub display: DisplayMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

/// Single entry of the manifest `icons` array
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl WebAppManifest {
    /// Build the manifest from configuration
    ///
    /// The icon entry points at the first configured icon route so the
    /// manifest stays consistent with the routing table.
    pub fn from_config(app: &AppConfig, routes: &RoutesConfig) -> Self {
        let icon_src = routes
            .icon_paths
            .first()
            .cloned()
            .unwrap_or_else(|| "/icon.svg".to_string());

        Self {
            name: app.name.clone(),
            short_name: app.short_name.clone(),
            description: app.description.clone(),
            start_url: app.start_url.clone(),
            scope: app.scope.clone(),
            display: app.display,
            orientation: app.orientation,
            background_color: app.background_color.clone(),
            theme_color: app.theme_color.clone(),
            icons: vec![ManifestIcon {
                src: icon_src,
                // an SVG icon scales to any size
                sizes: "any".to_string(),
                media_type: "image/svg+xml".to_string(),
                purpose: Some("any maskable".to_string()),
            }],
        }
    }

    /// Serialize to the JSON bytes served on the wire
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_manifest() -> WebAppManifest {
        let app = AppConfig {
            name: "Example App".to_string(),
            short_name: "example".to_string(),
            description: Some("Example description".to_string()),
            ..AppConfig::default()
        };
        WebAppManifest::from_config(&app, &RoutesConfig::default())
    }

    #[test]
    fn test_manifest_members() {
        let manifest = sample_manifest();
        let value: serde_json::Value =
            serde_json::from_slice(&manifest.to_bytes().expect("serialization should succeed"))
                .expect("output should be valid JSON");

        assert_eq!(value["name"], "Example App");
        assert_eq!(value["short_name"], "example");
        assert_eq!(value["start_url"], "/");
        assert_eq!(value["display"], "standalone");
        assert_eq!(value["icons"][0]["src"], "/icon.svg");
        assert_eq!(value["icons"][0]["type"], "image/svg+xml");
        assert_eq!(value["icons"][0]["purpose"], "any maskable");
    }

    #[test]
    fn test_display_mode_serializes_kebab_case() {
        let app = AppConfig {
            display: DisplayMode::MinimalUi,
            ..AppConfig::default()
        };
        let manifest = WebAppManifest::from_config(&app, &RoutesConfig::default());
        let value: serde_json::Value =
            serde_json::from_slice(&manifest.to_bytes().expect("serialization should succeed"))
                .expect("output should be valid JSON");

        assert_eq!(value["display"], "minimal-ui");
    }

    #[test]
    fn test_absent_members_are_omitted() {
        let manifest = WebAppManifest::from_config(&AppConfig::default(), &RoutesConfig::default());
        let value: serde_json::Value =
            serde_json::from_slice(&manifest.to_bytes().expect("serialization should succeed"))
                .expect("output should be valid JSON");

        assert!(value.get("description").is_none());
        assert!(value.get("orientation").is_none());
    }

    #[test]
    fn test_icon_src_follows_route_config() {
        let routes = RoutesConfig {
            icon_paths: vec!["/static/app-icon.svg".to_string()],
            ..RoutesConfig::default()
        };
        let manifest = WebAppManifest::from_config(&AppConfig::default(), &routes);

        assert_eq!(manifest.icons[0].src, "/static/app-icon.svg");
    }
}
