use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequestParts, Path, State, rejection::JsonRejection},
    http::request::Parts,
    response::{IntoResponse, Response},
};

use async_trait::async_trait;
use tracing::info;

use crate::api::{StatusResponse, created, no_content, success};
use crate::error::ApiError;
use crate::model::{Bookmark, BookmarkPayload};
use crate::serialize::{serialize, serialize_all};
use crate::store::BookmarkStore;
use crate::validate::validate;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookmarkStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        AppState { store }
    }
}

/// The bookmark named by the `:id` path segment.
///
/// Resolution happens here, once per request. A missing id rejects with 404
/// before the handler body runs.
#[derive(Debug, Clone)]
pub struct ResolvedBookmark(pub Bookmark);

#[async_trait]
impl FromRequestParts<AppState> for ResolvedBookmark {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "bookmark id missing from path");
                ApiError::NotFound
            })?;

        match state.store.get_by_id(&id).await? {
            Some(bookmark) => Ok(ResolvedBookmark(bookmark)),
            None => {
                tracing::warn!(id = %id, "bookmark not found");
                Err(ApiError::NotFound)
            }
        }
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(StatusResponse::new_from_msg("ok"))
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Response, ApiError> {
    let bookmarks = state.store.list_all().await?;
    tracing::debug!(count = bookmarks.len(), "listed bookmarks");
    Ok(success(serialize_all(&bookmarks)))
}

pub async fn get_bookmark(ResolvedBookmark(bookmark): ResolvedBookmark) -> Response {
    success(serialize(&bookmark))
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    payload: Result<Json<BookmarkPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!(error = %e, "rejected bookmark body");
        ApiError::MalformedBody(e.body_text())
    })?;

    let candidate = validate(payload).map_err(|reason| {
        tracing::warn!(reason = %reason, "rejected bookmark");
        reason
    })?;

    let bookmark = state.store.insert(candidate).await?;
    info!(id = %bookmark.id, "bookmark created");

    let location = format!("/bookmarks/{}", bookmark.id);
    Ok(created(&location, serialize(&bookmark)))
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    ResolvedBookmark(bookmark): ResolvedBookmark,
) -> Result<Response, ApiError> {
    // A concurrent delete may win between resolution and removal.
    if state.store.delete_by_id(&bookmark.id).await? == 0 {
        tracing::warn!(id = %bookmark.id, "bookmark vanished before delete");
        return Err(ApiError::NotFound);
    }

    info!(id = %bookmark.id, "bookmark deleted");
    Ok(no_content())
}
