//! pwad - progressive web app asset daemon
//!
//! A small standalone HTTP server that serves the assets a browser needs to
//! install and run a web app offline: the service-worker script, the
//! web-app manifest and the app icon. Payloads are rendered once at startup
//! from configuration and served from memory with validator-based caching.

pub mod assets;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
