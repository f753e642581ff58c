//! Application state for the API server

use crate::service::VideoService;
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone). Everything behind it is
/// read-only, so handlers never contend with each other.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Parse and download operations, plus the configuration they run with
    pub service: Arc<VideoService>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service: Arc<VideoService>) -> Self {
        Self { service }
    }
}
