//! HTTP server mode for REST API access to user pagination

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerSettings;
use crate::error::{Error, Result};
use crate::pagination::{
    Pager, RawCursorPagination, RawDiscriminator, RawOffsetPagination, RawPaginationRequest,
};
use crate::store::RecordStore;
use crate::types::User;

/// Pager over whichever user store the service was configured with
pub type UserPager = Pager<dyn RecordStore<Record = User>>;

/// Query string for `GET /api/users/getusers`.
///
/// Field names carry their payload prefix. A payload counts as present
/// when any of its fields is supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserPageQuery {
    #[serde(rename = "paginationType")]
    pub pagination_type: Option<String>,

    #[serde(rename = "offsetPagination.page")]
    pub offset_page: Option<i64>,

    #[serde(rename = "offsetPagination.pageSize")]
    pub offset_page_size: Option<i64>,

    #[serde(rename = "cursorPagination.cursor")]
    pub cursor: Option<i64>,

    #[serde(rename = "cursorPagination.pageSize")]
    pub cursor_page_size: Option<i64>,

    #[serde(
        rename = "cursorPagination.isPreviousPage",
        alias = "cursorPagination.isQueryPreviousPage"
    )]
    pub is_previous_page: Option<bool>,

    #[serde(
        rename = "cursorPagination.includeTotalCount",
        alias = "cursorPagination.isIncludeTotalCount"
    )]
    pub include_total_count: Option<bool>,
}

impl From<UserPageQuery> for RawPaginationRequest {
    fn from(query: UserPageQuery) -> Self {
        let offset = RawOffsetPagination {
            page: query.offset_page,
            page_size: query.offset_page_size,
        };
        let cursor = RawCursorPagination {
            cursor: query.cursor,
            page_size: query.cursor_page_size,
            is_previous_page: query.is_previous_page,
            include_total_count: query.include_total_count,
        };
        Self {
            pagination_type: query.pagination_type.map(RawDiscriminator::Name),
            offset_pagination: (offset != RawOffsetPagination::default()).then_some(offset),
            cursor_pagination: (cursor != RawCursorPagination::default()).then_some(cursor),
        }
    }
}

/// Error body
#[derive(Debug, Serialize)]
struct ApiError {
    success: bool,
    error: String,
}

impl ApiError {
    fn new(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

/// Build the application router
pub fn router(pager: Arc<UserPager>) -> Router {
    // Allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/users/getusers", get(get_users))
        .route("/api/users/page", post(post_users_page))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(pager)
}

/// Start the HTTP server
pub async fn serve(settings: &ServerSettings, pager: Arc<UserPager>) -> Result<()> {
    let addr = settings.socket_addr()?;
    let app = router(pager);

    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Page through users (query string form)
async fn get_users(
    State(pager): State<Arc<UserPager>>,
    query: std::result::Result<Query<UserPageQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => paginate(&pager, query.into()).await,
        Err(rejection) => bad_request(rejection.body_text()),
    }
}

/// Page through users (JSON body form)
async fn post_users_page(
    State(pager): State<Arc<UserPager>>,
    body: std::result::Result<Json<RawPaginationRequest>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(raw)) => paginate(&pager, raw).await,
        Err(rejection) => bad_request(rejection.body_text()),
    }
}

async fn paginate(pager: &UserPager, raw: RawPaginationRequest) -> Response {
    match pager.paginate_raw(raw).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(e) if e.is_client_error() => bad_request(e.public_message()),
        // Already logged with its pagination type by the pager
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new(e.public_message())),
        )
            .into_response(),
    }
}

fn bad_request(msg: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ApiError::new(msg))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_without_payload_fields() {
        let raw: RawPaginationRequest = UserPageQuery {
            pagination_type: Some("offset".into()),
            ..UserPageQuery::default()
        }
        .into();
        assert!(raw.offset_pagination.is_none());
        assert!(raw.cursor_pagination.is_none());
    }

    #[test]
    fn test_query_splits_payloads() {
        let raw: RawPaginationRequest = UserPageQuery {
            pagination_type: Some("cursor".into()),
            cursor: Some(10),
            include_total_count: Some(true),
            ..UserPageQuery::default()
        }
        .into();
        assert!(raw.offset_pagination.is_none());
        assert_eq!(
            raw.cursor_pagination,
            Some(RawCursorPagination {
                cursor: Some(10),
                page_size: None,
                is_previous_page: None,
                include_total_count: Some(true),
            })
        );
    }
}
