//! Application state for the HTTP server.

use std::sync::Arc;

use super::auth::AccessPolicy;
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Token authorization policy
    pub access: Arc<AccessPolicy>,
}

impl AppState {
    /// Create a new application state with the given repository and policy.
    pub fn new(repository: Arc<dyn FullRepository>, access: Arc<AccessPolicy>) -> Self {
        Self { repository, access }
    }
}
