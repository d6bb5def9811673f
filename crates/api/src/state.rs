use std::sync::Arc;

use comicd_core::registry::TaskRegistry;
use comicd_dispatch::WorkflowDispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// In-memory task table; the only mutable state in the process.
    pub registry: Arc<TaskRegistry>,
    /// Outbound workflow trigger (GitHub Actions in production, a stub in
    /// integration tests).
    pub dispatcher: Arc<dyn WorkflowDispatcher>,
}
