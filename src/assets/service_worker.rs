// Service-worker script module
// Renders the offline-caching worker served to browsers

use crate::config::AppConfig;

/// Cache name the generated worker uses
///
/// Derived from the app short name and the cache version, so bumping
/// `cache_version` makes the activate handler drop the previous cache.
///
/// # Examples
///
/// ```
/// use pwad::assets::service_worker::cache_name;
/// use pwad::config::AppConfig;
///
/// let app = AppConfig::default();
/// assert_eq!(cache_name(&app), "pwad-v1");
/// ```
pub fn cache_name(app: &AppConfig) -> String {
    format!("{}-v{}", slug(&app.short_name), app.cache_version)
}

/// Render the service-worker script
///
/// The worker precaches the configured URLs at install time, prunes stale
/// caches on activation, and answers GET requests cache-first with a
/// background refresh. When both the cache and the network miss it answers
/// 503 so the page can show its own offline state.
pub fn render(app: &AppConfig) -> String {
    format!(
        r"const CACHE_NAME = '{cache}';
const PRECACHE_URLS = [{precache}];

self.addEventListener('install', (event) => {{
  event.waitUntil(
    caches.open(CACHE_NAME)
      .then((cache) => cache.addAll(PRECACHE_URLS))
      .then(() => self.skipWaiting())
  );
}});

self.addEventListener('activate', (event) => {{
  event.waitUntil(
    caches.keys()
      .then((names) => Promise.all(
        names
          .filter((name) => name !== CACHE_NAME)
          .map((name) => caches.delete(name))
      ))
      .then(() => self.clients.claim())
  );
}});

self.addEventListener('fetch', (event) => {{
  if (event.request.method !== 'GET') {{
    return;
  }}
  event.respondWith(
    caches.match(event.request).then((cached) => {{
      const refreshed = fetch(event.request)
        .then((response) => {{
          if (response.ok) {{
            const copy = response.clone();
            caches.open(CACHE_NAME).then((cache) => cache.put(event.request, copy));
          }}
          return response;
        }})
        .catch(() => cached);
      return cached || refreshed;
    }}).then((response) => response || new Response('offline', {{
      status: 503,
      headers: {{ 'Content-Type': 'text/plain' }}
    }}))
  );
}});
",
        cache = js_string(&cache_name(app)),
        precache = precache_array(&app.precache),
    )
}

/// Render the precache URLs as a JS array body
fn precache_array(urls: &[String]) -> String {
    urls.iter()
        .map(|url| format!("'{}'", js_string(url)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape a value for a single-quoted JS string literal
fn js_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Lowercase alphanumeric slug, runs of other characters become one dash
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "app".to_string()
    } else {
        trimmed.to_string()
    }
}
