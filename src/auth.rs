//! Bearer token check in front of the bookmark routes.
//!
//! Requests must carry `Authorization: Bearer <token>`. Anything else gets
//! 401 with `{"error": "Unauthorized request"}` and never reaches a handler.

use std::sync::Arc;

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized request";

#[derive(Debug, Serialize)]
struct UnauthorizedBody {
    error: &'static str,
}

/// Precomputes the full header value so the check is a plain comparison.
pub fn expected_header(token: &str) -> Arc<str> {
    Arc::from(format!("Bearer {}", token))
}

pub async fn validate_bearer(expected: Arc<str>, req: Request, next: Next) -> Response {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match auth {
        Some(h) if h == expected.as_ref() => next.run(req).await,
        _ => {
            tracing::warn!(
                path = %req.uri().path(),
                method = %req.method(),
                "unauthorized request - missing or invalid token"
            );
            (
                StatusCode::UNAUTHORIZED,
                Json(UnauthorizedBody {
                    error: UNAUTHORIZED_MESSAGE,
                }),
            )
                .into_response()
        }
    }
}
