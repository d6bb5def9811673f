pub mod downloads;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /downloads                GET list, POST submit
/// /downloads/{task_id}      GET single task (polled by the front end)
/// /callback                 POST workflow completion report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/downloads", downloads::download_router())
        .merge(downloads::callback_router())
}
