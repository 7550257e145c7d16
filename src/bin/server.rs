//! Thin HTTP transport exposing [`sce_core::analyze`] over JSON.
//!
//! `GET /health` and `POST /parse` are the whole surface (SPEC_FULL.md
//! §4.10 / §6). The handlers own no analysis state of their own: they
//! deserialize, call into the core, and serialize the result.
use std::net::SocketAddr;
use std::panic;

use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use sce_core::{analyze, AnalyzeError, AstDescriptor, Summary};

#[derive(Debug, Deserialize)]
struct ParseRequest {
    #[serde(default)]
    language: String,
    #[serde(default)]
    code: String,
}

#[derive(Debug, Serialize)]
struct ParseResponse {
    ast: AstDescriptor,
    summary: Summary,
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn parse(body: axum::body::Bytes) -> Response {
    let request: ParseRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            log::warn!("rejecting malformed /parse body: {}", err);
            return AnalyzeError::InvalidJson.into_response();
        }
    };

    // analyze() is documented infallible, but a panic partway through the
    // walk must not leak a partially built Summary to the caller (SPEC_FULL
    // §7's InternalAllocationFailure). catch_unwind turns that into a 500
    // instead of a half-formed 200.
    let result = panic::catch_unwind(|| analyze(&request.language, &request.code));
    match result {
        Ok((ast, summary)) => Json(ParseResponse { ast, summary }).into_response(),
        Err(_) => {
            log::error!(
                "analyze panicked for language {:?}; returning 500 instead of a partial summary",
                request.language
            );
            AnalyzeError::Internal.into_response()
        }
    }
}

async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

fn app() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/parse", post(parse))
        .fallback(fallback)
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    log::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app().into_make_service())
        .await
        .expect("server failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn parse_returns_ast_and_summary() {
        let payload = serde_json::json!({
            "language": "c",
            "code": "int g(int n){ if(n<2) return 1; return g(n/2)+g(n/2); }",
        });

        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/parse")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ast"]["language"], "c");
        assert_eq!(body["summary"]["recurrence"]["b"], 2);
    }

    #[tokio::test]
    async fn parse_rejects_malformed_json() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/parse")
                    .header("content-type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "invalid JSON");
    }

    #[tokio::test]
    async fn unsupported_language_is_not_an_error() {
        let payload = serde_json::json!({ "language": "python", "code": "def f(): pass" });

        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/parse")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["summary"]["functions"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn unmatched_route_is_404() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "not found");
    }
}
