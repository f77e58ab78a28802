//! PWA asset handlers
//!
//! Serve the service-worker script, the web-app manifest and the app icon
//! with the headers browsers expect for each, from the payloads rendered
//! at startup.

use crate::assets::Asset;
use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, CachePolicy};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::sync::Arc;

/// Content type for the service-worker script
const SERVICE_WORKER_CONTENT_TYPE: &str = "application/javascript; charset=utf-8";
/// Content type for the web-app manifest
const MANIFEST_CONTENT_TYPE: &str = "application/manifest+json";
/// Content type for the SVG icon
const ICON_CONTENT_TYPE: &str = "image/svg+xml";

/// How long launchers may cache the icon, in seconds
const ICON_MAX_AGE: u32 = 86_400;

/// Serve the service-worker script
///
/// `Service-Worker-Allowed: /` widens the permitted registration scope to
/// the origin root even when the script route is not at the root itself.
/// Served `no-cache` so a deployment reaches clients on their next update
/// check instead of after a heuristic cache expiry.
pub async fn serve_service_worker(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let (data, etag) = resolve_asset(&state.assets.service_worker).await;
    serve_asset(
        ctx,
        data,
        &etag,
        SERVICE_WORKER_CONTENT_TYPE,
        CachePolicy::NoCache,
        Some(("Service-Worker-Allowed", "/")),
    )
}

/// Serve the web-app manifest
pub async fn serve_manifest(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let (data, etag) = resolve_asset(&state.assets.manifest).await;
    serve_asset(
        ctx,
        data,
        &etag,
        MANIFEST_CONTENT_TYPE,
        CachePolicy::NoCache,
        None,
    )
}

/// Serve the app icon
pub async fn serve_icon(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let (data, etag) = resolve_asset(&state.assets.icon).await;
    serve_asset(
        ctx,
        data,
        &etag,
        ICON_CONTENT_TYPE,
        CachePolicy::Public(ICON_MAX_AGE),
        None,
    )
}

/// Serve the install shell
///
/// A minimal page that links the manifest, sets the theme colour and
/// registers the service worker, enough for a browser to offer install.
pub fn serve_landing_page(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    http::response::build_html_response(landing_page(state), ctx.is_head)
}

/// Prebuilt bytes, or the operator's override file when configured
///
/// An override that cannot be read falls back to the generated payload, so
/// the route keeps answering while the operator fixes the path.
async fn resolve_asset(asset: &Asset) -> (Bytes, String) {
    match &asset.override_file {
        Some(path) => match tokio::fs::read(path).await {
            Ok(content) => {
                let etag = cache::generate_etag(&content);
                (Bytes::from(content), etag)
            }
            Err(e) => {
                logger::log_warning(&format!(
                    "Cannot read override file '{path}': {e}, serving generated payload"
                ));
                (asset.bytes.clone(), asset.etag.clone())
            }
        },
        None => (asset.bytes.clone(), asset.etag.clone()),
    }
}

/// Assemble the asset response: conditional GET, HEAD handling, headers
fn serve_asset(
    ctx: &RequestContext<'_>,
    data: Bytes,
    etag: &str,
    content_type: &str,
    policy: CachePolicy,
    extra_header: Option<(&'static str, &'static str)>,
) -> Response<Full<Bytes>> {
    if cache::check_etag_match(ctx.if_none_match.as_deref(), etag) {
        return http::build_304_response(etag, policy);
    }

    let content_length = data.len();
    let body = if ctx.is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", policy.to_header_value());

    if let Some((name, value)) = extra_header {
        builder = builder.header(name, value);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to build asset response: {e}"));
        Response::new(Full::new(Bytes::new()))
    })
}

fn landing_page(state: &Arc<AppState>) -> String {
    let app = &state.config.app;
    let routes = &state.config.routes;
    let manifest_href = routes
        .manifest_paths
        .first()
        .map_or("/manifest.json", String::as_str);
    let worker_src = routes
        .service_worker_paths
        .first()
        .map_or("/service_worker", String::as_str);
    let icon_href = routes.icon_paths.first().map_or("/icon.svg", String::as_str);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="theme-color" content="{theme}">
  <link rel="manifest" href="{manifest}">
  <link rel="icon" type="image/svg+xml" href="{icon}">
  <title>{name}</title>
  <style>
    body {{ font-family: system-ui, sans-serif; background: {background}; color: #e5e7eb; display: grid; place-items: center; min-height: 100vh; margin: 0; }}
    main {{ text-align: center; }}
    img {{ width: 96px; height: 96px; }}
  </style>
</head>
<body>
  <main>
    <img src="{icon}" alt="">
    <h1>{name}</h1>
    <p>{description}</p>
  </main>
  <script>
    if ('serviceWorker' in navigator) {{
      navigator.serviceWorker.register('{worker}', {{ scope: '{scope}' }});
    }}
  </script>
</body>
</html>
"#,
        theme = html_escape(&app.theme_color),
        background = html_escape(&app.background_color),
        manifest = html_escape(manifest_href),
        icon = html_escape(icon_href),
        worker = js_escape(worker_src),
        scope = js_escape(&app.scope),
        name = html_escape(&app.name),
        description = html_escape(app.description.as_deref().unwrap_or("Installable web app")),
    )
}

/// Escape text for inline HTML
fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape a value for a single-quoted string inside the inline script
///
/// Entities are not decoded inside a script element, so these values need
/// JS string escapes rather than `html_escape`. `\x3C` keeps `</script`
/// out of the literal.
fn js_escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('<', "\\x3C")
}
