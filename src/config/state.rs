// Application state module
// Immutable per-process state shared by the serve loop and request handler

use std::path::PathBuf;
use std::sync::Arc;

use super::types::Config;
use crate::error::ServerError;
use crate::http::isolation::{CrossOriginIsolation, ResponseHook};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical form of `config.server.root`
    pub root: PathBuf,
    /// Applied to every response before it is written
    pub hook: Arc<dyn ResponseHook>,
}

impl AppState {
    /// Create `AppState` with the cross-origin isolation hook installed
    pub fn new(config: Config) -> Result<Self, ServerError> {
        Self::with_hook(config, Arc::new(CrossOriginIsolation))
    }

    /// Create `AppState` with a caller-supplied response hook
    pub fn with_hook(config: Config, hook: Arc<dyn ResponseHook>) -> Result<Self, ServerError> {
        let root = PathBuf::from(&config.server.root)
            .canonicalize()
            .map_err(|source| ServerError::Root {
                path: config.server.root.clone(),
                source,
            })?;

        Ok(Self { config, root, hook })
    }
}
