//! Request handler module
//!
//! Responsible for request routing dispatch and the asset handlers behind
//! the routes.

pub mod pwa;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
