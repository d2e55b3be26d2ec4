use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::models::book::Book;
use crate::models::responses::{BookListResponse, BookResponse, MessageResponse};
use crate::models::storage::BookStore;
use crate::services::validation::validate_book;

type Store = Arc<dyn BookStore + Send + Sync>;

fn book_from_payload(payload: Value) -> Result<Book, ApiError> {
    serde_json::from_value(payload)
        .map_err(|e| ApiError::Internal(format!("validated payload failed to deserialize: {}", e)))
}

pub async fn list_books(State(store): State<Store>) -> Result<Json<BookListResponse>, ApiError> {
    let books = store.list_all().await?;
    Ok(Json(BookListResponse { books }))
}

pub async fn get_book(
    Path(isbn): Path<String>,
    State(store): State<Store>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = store.get_by_isbn(&isbn).await?;
    Ok(Json(BookResponse { book }))
}

pub async fn create_book(
    State(store): State<Store>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    validate_book(&payload).map_err(ApiError::Validation)?;

    let book = book_from_payload(payload)?;
    let book = store.create(book).await?;
    info!("Created book {}", book.isbn);

    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

pub async fn update_book(
    Path(isbn): Path<String>,
    State(store): State<Store>,
    Json(payload): Json<Value>,
) -> Result<Json<BookResponse>, ApiError> {
    validate_book(&payload).map_err(ApiError::Validation)?;

    let book = book_from_payload(payload)?;
    let book = store.update_by_isbn(&isbn, book).await?;
    info!("Updated book {}", isbn);

    Ok(Json(BookResponse { book }))
}

pub async fn delete_book(
    Path(isbn): Path<String>,
    State(store): State<Store>,
) -> Result<Json<MessageResponse>, ApiError> {
    store.delete_by_isbn(&isbn).await?;
    info!("Deleted book {}", isbn);

    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}
