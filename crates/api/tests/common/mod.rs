use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use comicd_api::config::ServerConfig;
use comicd_api::routes;
use comicd_api::state::AppState;
use comicd_core::registry::TaskRegistry;
use comicd_dispatch::{DispatchError, GithubConfig, WorkflowDispatcher};

/// Stand-in for the GitHub Actions client.
///
/// Records every dispatch call and can be switched to fail, so tests can
/// cover both the happy path and the dispatch-failure rollback.
pub struct StubDispatcher {
    /// When true, every dispatch returns a 502-style API error.
    pub fail: bool,
    /// `(album_id, task_id)` pairs, in call order.
    pub calls: Mutex<Vec<(String, String)>>,
}

impl StubDispatcher {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl WorkflowDispatcher for StubDispatcher {
    async fn dispatch(&self, album_id: &str, task_id: &str) -> Result<(), DispatchError> {
        self.calls
            .lock()
            .await
            .push((album_id.to_string(), task_id.to_string()));
        if self.fail {
            return Err(DispatchError::Api {
                status: 502,
                body: "stub failure".to_string(),
            });
        }
        Ok(())
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        static_dir: "does-not-exist".to_string(),
        github: GithubConfig {
            api_base: "http://127.0.0.1:0".to_string(),
            token: "test-token".to_string(),
            repo: "someone/comic-crawler".to_string(),
            workflow: "download.yml".to_string(),
            ref_name: "main".to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given dispatcher stub.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(dispatcher: Arc<dyn WorkflowDispatcher>) -> Router {
    let config = test_config();

    let state = AppState {
        config: Arc::new(config),
        registry: Arc::new(TaskRegistry::new()),
        dispatcher,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body to the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
