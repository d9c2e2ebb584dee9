use crate::app::dto::*;
use crate::app::engine::DependencyEngine;
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct HttpState {
    pub engine: DependencyEngine,
}

#[derive(Debug, Clone, Deserialize)]
struct CyclesQuery {
    limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
struct ApiErrorBody {
    error: String,
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ApiErrorBody { error: msg.into() })).into_response()
}

pub fn build_router(engine: DependencyEngine) -> Router {
    let state = Arc::new(HttpState { engine });

    Router::new()
        .route("/health", get(health))
        .route("/chain", post(chain))
        .route("/dependencies", post(dependencies))
        .route("/cycles", get(cycles))
        .route("/reload", post(reload))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(engine: DependencyEngine, addr: SocketAddr) -> Result<()> {
    let app = build_router(engine);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "http server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Run a blocking engine call and map its outcome to a response.
///
/// Engine errors become `failure_status`; a panicked task becomes 500.
async fn run_blocking<T, F>(f: F, failure_status: StatusCode) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    match spawn_blocking(f).await {
        Ok(Ok(res)) => Json(res).into_response(),
        Ok(Err(e)) => api_error(failure_status, e.to_string()),
        Err(e) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("task join error: {e}"),
        ),
    }
}

async fn health(State(state): State<Arc<HttpState>>) -> Response {
    match state.engine.health() {
        Ok(res) => Json(res).into_response(),
        Err(e) => api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

async fn reload(State(state): State<Arc<HttpState>>) -> Response {
    let engine = state.engine.clone();
    run_blocking(move || engine.reload(), StatusCode::INTERNAL_SERVER_ERROR).await
}

async fn chain(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<ChainRequest>,
) -> Response {
    let engine = state.engine.clone();
    run_blocking(move || engine.chain(req), StatusCode::BAD_REQUEST).await
}

async fn dependencies(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<DependenciesRequest>,
) -> Response {
    let engine = state.engine.clone();
    run_blocking(move || engine.dependencies(req), StatusCode::BAD_REQUEST).await
}

async fn cycles(
    State(state): State<Arc<HttpState>>,
    Query(q): Query<CyclesQuery>,
) -> Response {
    let engine = state.engine.clone();
    run_blocking(move || engine.cycles(q.limit), StatusCode::INTERNAL_SERVER_ERROR).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fs::reader::JsonFileSource;
    use crate::config::AppConfig;
    use crate::domain::dependency_map::DependencyMap;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn make_engine() -> DependencyEngine {
        let map: DependencyMap = vec![
            ("Api1.data", vec!["Text1.text"]),
            ("Text1.text", vec!["Api1.data"]),
        ]
        .into_iter()
        .collect();
        DependencyEngine::from_prebuilt(
            Arc::new(JsonFileSource::new("map.json")),
            map,
            &AppConfig::default(),
        )
    }

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_http_health_and_chain() {
        let app = build_router(make_engine());

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let health = body_json(res).await;
        assert_eq!(health["path_count"], 2);
        assert_eq!(health["cycle_count"], 1);

        let res = app
            .oneshot(post_json(
                "/chain",
                serde_json::json!({ "paths": ["Api1.data"] }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["chain"], serde_json::json!(["Text1.text", "Api1.data"]));
    }

    #[tokio::test]
    async fn test_http_chain_without_paths_is_bad_request() {
        let app = build_router(make_engine());
        let res = app
            .oneshot(post_json("/chain", serde_json::json!({ "paths": [] })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert!(body["error"].as_str().unwrap().contains("property path"));
    }

    #[tokio::test]
    async fn test_http_dependencies_and_cycles() {
        let app = build_router(make_engine());

        let res = app
            .clone()
            .oneshot(post_json(
                "/dependencies",
                serde_json::json!({ "entity": "Api1" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(
            body["dependencies"]["inverse_dependencies"],
            serde_json::json!(["Text1"])
        );
        assert_eq!(
            body["dependencies"]["direct_dependencies"],
            serde_json::json!(["Text1"])
        );

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/cycles?limit=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["total"], 1);
    }

    #[tokio::test]
    async fn test_http_reload_missing_file_is_internal_error() {
        let app = build_router(make_engine());
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/reload")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
