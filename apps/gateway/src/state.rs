use crate::backend::BackendClient;
use crate::config::Config;
use crate::storage::Storage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The only handle through which the backend API is reached.
    pub backend: BackendClient,
    pub storage: Storage,
    pub config: Config,
}
