//! End-to-end route tests driving the request handler directly.

use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};

use pwad::config::{AppState, Config};
use pwad::handler;

fn state_with(toml: &str) -> Arc<AppState> {
    let config = Config::from_toml_str(toml).expect("config should parse");
    Arc::new(AppState::new(config).expect("assets should build"))
}

fn default_state() -> Arc<AppState> {
    state_with("")
}

fn remote() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 40400))
}

async fn send(state: &Arc<AppState>, method: Method, path: &str) -> Response<Full<Bytes>> {
    let req = Request::builder()
        .method(method)
        .uri(path)
        .body(())
        .expect("request should build");
    handler::handle_request(req, Arc::clone(state), remote())
        .await
        .expect("handler is infallible")
}

async fn get(state: &Arc<AppState>, path: &str) -> Response<Full<Bytes>> {
    send(state, Method::GET, path).await
}

async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
    resp.into_body()
        .collect()
        .await
        .expect("body collect is infallible")
        .to_bytes()
}

fn header<'a>(resp: &'a Response<Full<Bytes>>, name: &str) -> &'a str {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn service_worker_route_returns_success() {
    let state = default_state();
    let resp = get(&state, "/service_worker").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn manifest_route_returns_success() {
    let state = default_state();
    let resp = get(&state, "/manifest").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn service_worker_has_worker_headers() {
    let state = default_state();
    let resp = get(&state, "/service_worker").await;

    assert!(header(&resp, "content-type").starts_with("application/javascript"));
    assert_eq!(header(&resp, "service-worker-allowed"), "/");
    assert_eq!(header(&resp, "cache-control"), "no-cache");
    assert!(!header(&resp, "etag").is_empty());

    let body = body_bytes(resp).await;
    let script = std::str::from_utf8(&body).expect("script should be UTF-8");
    assert!(script.contains("addEventListener('install'"));
    assert!(script.contains("addEventListener('fetch'"));
}

#[tokio::test]
async fn manifest_reflects_configured_name_and_colours() {
    let state = state_with(
        r##"
        [app]
        name = "Kitchen Planner"
        short_name = "kitchen"
        background_color = "#0b132b"
        theme_color = "#5bc0be"
        "##,
    );
    let resp = get(&state, "/manifest").await;
    assert_eq!(header(&resp, "content-type"), "application/manifest+json");
    assert_eq!(header(&resp, "cache-control"), "no-cache");

    let body = body_bytes(resp).await;
    let value: serde_json::Value =
        serde_json::from_slice(&body).expect("manifest should be valid JSON");
    assert_eq!(value["name"], "Kitchen Planner");
    assert_eq!(value["short_name"], "kitchen");
    assert_eq!(value["display"], "standalone");
    assert_eq!(value["background_color"], "#0b132b");
    assert_eq!(value["theme_color"], "#5bc0be");
    assert!(value["icons"].is_array());
}

#[tokio::test]
async fn all_default_aliases_answer() {
    let state = default_state();
    for path in [
        "/service_worker",
        "/serviceworker.js",
        "/sw.js",
        "/manifest",
        "/manifest.json",
        "/manifest.webmanifest",
        "/icon.svg",
        "/favicon.svg",
    ] {
        let resp = get(&state, path).await;
        assert_eq!(resp.status(), StatusCode::OK, "path {path}");
    }
}

#[tokio::test]
async fn icon_is_cacheable_svg() {
    let state = default_state();
    let resp = get(&state, "/icon.svg").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "content-type"), "image/svg+xml");
    assert_eq!(header(&resp, "cache-control"), "public, max-age=86400");

    let body = body_bytes(resp).await;
    assert!(body.starts_with(b"<svg"));
}

#[tokio::test]
async fn landing_page_registers_worker() {
    let state = default_state();
    let resp = get(&state, "/").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header(&resp, "content-type").starts_with("text/html"));

    let body = body_bytes(resp).await;
    let html = std::str::from_utf8(&body).expect("page should be UTF-8");
    assert!(html.contains(r#"<link rel="manifest" href="/manifest">"#));
    assert!(html.contains("navigator.serviceWorker.register('/service_worker'"));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let state = default_state();
    let resp = get(&state, "/no-such-asset").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_is_rejected_with_allow_header() {
    let state = default_state();
    let resp = send(&state, Method::POST, "/manifest").await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(header(&resp, "allow"), "GET, HEAD, OPTIONS");
}

#[tokio::test]
async fn options_preflight_without_cors() {
    let state = default_state();
    let resp = send(&state, Method::OPTIONS, "/manifest").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(header(&resp, "access-control-allow-origin").is_empty());
}

#[tokio::test]
async fn options_preflight_with_cors() {
    let state = state_with(
        r"
        [http]
        enable_cors = true
        ",
    );
    let resp = send(&state, Method::OPTIONS, "/manifest").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(header(&resp, "access-control-allow-origin"), "*");
}

#[tokio::test]
async fn head_keeps_headers_drops_body() {
    let state = default_state();
    let resp = send(&state, Method::HEAD, "/icon.svg").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_length: usize = header(&resp, "content-length")
        .parse()
        .expect("content-length should be numeric");
    assert!(content_length > 0);

    let body = body_bytes(resp).await;
    assert!(body.is_empty());
}

#[tokio::test]
async fn conditional_get_revalidates() {
    let state = default_state();

    let first = get(&state, "/manifest").await;
    let etag = header(&first, "etag").to_string();
    assert!(!etag.is_empty());

    let req = Request::builder()
        .method(Method::GET)
        .uri("/manifest")
        .header("if-none-match", &etag)
        .body(())
        .expect("request should build");
    let revalidated = handler::handle_request(req, Arc::clone(&state), remote())
        .await
        .expect("handler is infallible");
    assert_eq!(revalidated.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(header(&revalidated, "etag"), etag);

    let stale = Request::builder()
        .method(Method::GET)
        .uri("/manifest")
        .header("if-none-match", "\"0-stale\"")
        .body(())
        .expect("request should build");
    let refreshed = handler::handle_request(stale, Arc::clone(&state), remote())
        .await
        .expect("handler is infallible");
    assert_eq!(refreshed.status(), StatusCode::OK);
}

#[tokio::test]
async fn oversized_declared_body_is_rejected() {
    let state = default_state();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/manifest")
        .header("content-length", "99999999")
        .body(())
        .expect("request should build");
    let resp = handler::handle_request(req, state, remote())
        .await
        .expect("handler is infallible");
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn health_probes_answer() {
    let state = default_state();
    for path in ["/healthz", "/readyz"] {
        let resp = get(&state, path).await;
        assert_eq!(resp.status(), StatusCode::OK, "path {path}");
        assert_eq!(header(&resp, "content-type"), "application/json");
        assert_eq!(header(&resp, "cache-control"), "no-store");

        let body = body_bytes(resp).await;
        assert_eq!(&body[..], br#"{"status":"ok"}"#);
    }
}

#[tokio::test]
async fn custom_route_config_replaces_defaults() {
    let state = state_with(
        r#"
        [app]
        name = "Docs Reader"
        short_name = "docs"

        [routes]
        service_worker_paths = ["/assets/sw.js"]
        manifest_paths = ["/assets/site.webmanifest"]
        "#,
    );

    let resp = get(&state, "/assets/sw.js").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header(&resp, "content-type").starts_with("application/javascript"));

    // the default path is no longer routed
    let gone = get(&state, "/service_worker").await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let manifest = get(&state, "/assets/site.webmanifest").await;
    let body = body_bytes(manifest).await;
    let value: serde_json::Value =
        serde_json::from_slice(&body).expect("manifest should be valid JSON");
    assert_eq!(value["name"], "Docs Reader");
}
