//! Book HTTP API
//!
//! JSON endpoints over [`BookService`]. Failures are rendered as
//! [`ErrorResponse`] bodies whose `code` is the [`error::ErrorKind`] code.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use book_service::{BookError, BookService, BookView, NewBook};
use error::ErrorResponse;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<BookService>,
    pub version: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
}

/// HTTP rendering of a [`BookError`]
#[derive(Debug)]
pub struct ApiError(BookError);

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            BookError::NotFound(_) => StatusCode::NOT_FOUND,
            BookError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BookError::UnknownAuthor(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookError::AuthorUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            BookError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self.0 {
            // Storage details stay in the logs.
            BookError::RepositoryError(reason) => {
                warn!(error = %reason, "book repository failure");
                ErrorResponse::new(self.0.kind().code(), "internal error")
            }
            BookError::AuthorUnavailable(cause) => {
                ErrorResponse::new(self.0.kind().code(), "author service unavailable")
                    .with_details(cause.detail())
            }
            other => ErrorResponse::new(other.kind().code(), other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the book API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/books", get(list_books).post(create_book))
        .route("/books/:id", get(get_book))
        .with_state(state)
}

/// GET /healthz
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version,
    })
}

/// GET /books
async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookView>>, ApiError> {
    let books = state.books.list_books().await?;
    debug!(count = books.len(), "books listed");
    Ok(Json(books))
}

/// GET /books/:id
async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookView>, ApiError> {
    let book = state.books.get_book(&id).await?;
    Ok(Json(book))
}

/// POST /books
async fn create_book(
    State(state): State<AppState>,
    Json(request): Json<NewBook>,
) -> Result<(StatusCode, Json<BookView>), ApiError> {
    info!(title = %request.title, author_id = %request.author_id, "create book request");
    let book = state.books.create_book(request).await?;
    Ok((StatusCode::CREATED, Json(book)))
}
