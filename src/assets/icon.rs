// App icon module
// Renders the maskable SVG icon from the configured colours

use crate::config::AppConfig;

/// Render the app icon
///
/// A rounded tile in the background colour carrying the app's initial in
/// the theme colour. Maskable launchers crop to a circle, so the glyph
/// stays inside the safe zone at the centre.
pub fn render(app: &AppConfig) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 192 192">
  <rect width="192" height="192" rx="36" fill="{background}"/>
  <circle cx="96" cy="96" r="72" fill="{theme}" opacity="0.18"/>
  <text x="96" y="122" text-anchor="middle" font-family="system-ui, sans-serif" font-size="96" font-weight="700" fill="{theme}">{initial}</text>
</svg>
"#,
        background = xml_attr(&app.background_color),
        theme = xml_attr(&app.theme_color),
        initial = initial(&app.short_name),
    )
}

/// First alphanumeric character of the name, uppercased
fn initial(name: &str) -> String {
    name.chars()
        .find(|c| c.is_alphanumeric())
        .map_or_else(|| "P".to_string(), |c| c.to_uppercase().collect())
}

/// Escape an attribute value for inline SVG
fn xml_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_uses_configured_colours() {
        let app = AppConfig {
            background_color: "#101010".to_string(),
            theme_color: "#ff8800".to_string(),
            ..AppConfig::default()
        };
        let svg = render(&app);
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r##"fill="#101010""##));
        assert!(svg.contains(r##"fill="#ff8800""##));
    }

    #[test]
    fn test_initial_glyph() {
        assert_eq!(initial("kitchen"), "K");
        assert_eq!(initial("  7up"), "7");
        assert_eq!(initial("---"), "P");
    }

    #[test]
    fn test_xml_attr_escaping() {
        assert_eq!(xml_attr(r#"a"&<b"#), "a&quot;&amp;&lt;b");
    }
}
