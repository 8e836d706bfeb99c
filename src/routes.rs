use axum::{
    Router,
    extract::Request,
    http::Method,
    middleware::{self, Next},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{expected_header, validate_bearer};
use crate::handler::{
    AppState, create_bookmark, delete_bookmark, get_bookmark, healthcheck, list_bookmarks,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route("/bookmarks/:id", get(get_bookmark).delete(delete_bookmark))
}

/// The full service: health check, authenticated bookmark routes, CORS and
/// request tracing.
pub fn app(state: AppState, api_token: &str) -> Router {
    let expected = expected_header(api_token);
    let auth_layer = middleware::from_fn(move |req: Request, next: Next| {
        let expected = expected.clone();
        async move { validate_bearer(expected, req, next).await }
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/", get(healthcheck))
        .merge(routes().route_layer(auth_layer))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}
