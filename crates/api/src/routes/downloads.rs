//! Route definitions for download tasks and the workflow callback.
//!
//! Mounted by `api_routes()`:
//! - `/downloads` -> `download_router()`
//! - `/callback`  -> `callback_router()`

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{callback, downloads};
use crate::state::AppState;

/// Download task routes.
///
/// ```text
/// GET    /                  -> list_downloads
/// POST   /                  -> create_download
/// GET    /{task_id}         -> get_download
/// ```
pub fn download_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(downloads::list_downloads).post(downloads::create_download),
        )
        .route("/{task_id}", get(downloads::get_download))
}

/// Workflow callback route.
///
/// ```text
/// POST   /callback          -> workflow_callback
/// ```
pub fn callback_router() -> Router<AppState> {
    Router::new().route("/callback", post(callback::workflow_callback))
}
