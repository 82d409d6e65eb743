//! HTTP surface: request validation, job dispatch, and outcome mapping.
//!
//! A single endpoint handles every path. A request becomes a job only
//! after validation and parsing succeed; each job produces exactly one
//! response.

use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use log::{info, warn};

use crate::engine::RenderOutcome;
use crate::job::Job;
use crate::renderer::Renderer;

const BAD_REQUEST_BODY: &str = "Bad Request";
const LOAD_FAILED_BODY: &str = "Could not open URL";

/// Shared state for the HTTP surface.
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<Renderer>,
    pub max_body_bytes: usize,
}

/// Build the service router. Every path falls through to the job handler;
/// the service has never routed on paths.
pub fn router(state: AppState) -> Router {
    Router::new().fallback(render_job).with_state(state)
}

/// Serve render jobs on an already-bound listener until the server fails.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("rfrenderd listening on {}", addr);
    }
    axum::serve(listener, router(state)).await
}

async fn render_job(State(state): State<AppState>, req: Request) -> Response {
    // Protocol validation: POST + JSON body, or the job is never created
    if req.method() != Method::POST || !is_json(req.headers().get(header::CONTENT_TYPE)) {
        return bad_request();
    }

    let body = match to_bytes(req.into_body(), state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("failed to read request body: {}", err);
            return bad_request();
        }
    };

    let job = match Job::parse(&body) {
        Ok(job) => job,
        Err(err) => {
            warn!("rejected job payload: {}", err);
            return bad_request();
        }
    };

    match state.renderer.render(&job.url).await {
        RenderOutcome::Success { content } => {
            info!("job for {} completed ({} bytes)", job.url, content.len());
            Json(job.complete(content)).into_response()
        }
        RenderOutcome::Failure { reason } => {
            // The reason stays internal; callers get a generic message
            warn!("job for {} failed: {}", job.url, reason);
            (StatusCode::INTERNAL_SERVER_ERROR, LOAD_FAILED_BODY).into_response()
        }
    }
}

/// Accepts `application/json` with optional parameters such as
/// `; charset=utf-8`. Anything else, including a missing header, fails
/// validation.
fn is_json(value: Option<&HeaderValue>) -> bool {
    match value.and_then(|v| v.to_str().ok()) {
        Some(v) => v
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .eq_ignore_ascii_case("application/json"),
        None => false,
    }
}

fn bad_request() -> Response {
    (StatusCode::BAD_REQUEST, BAD_REQUEST_BODY).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(value: &str) -> HeaderValue {
        HeaderValue::from_str(value).unwrap()
    }

    #[test]
    fn test_is_json_exact_match() {
        assert!(is_json(Some(&header("application/json"))));
    }

    #[test]
    fn test_is_json_tolerates_parameters_and_case() {
        assert!(is_json(Some(&header("application/json; charset=utf-8"))));
        assert!(is_json(Some(&header("Application/JSON"))));
    }

    #[test]
    fn test_is_json_rejects_other_types() {
        assert!(!is_json(Some(&header("text/plain"))));
        assert!(!is_json(Some(&header("application/jsonp"))));
        assert!(!is_json(None));
    }
}
