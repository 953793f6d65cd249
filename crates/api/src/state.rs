use std::sync::Arc;

use villa_core::logging::Logging;
use villa_db::store::VillaStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Villa persistence (PostgreSQL or in-memory, chosen at startup).
    pub store: Arc<dyn VillaStore>,
    /// Leveled message sink for handler events.
    pub logger: Arc<dyn Logging>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
