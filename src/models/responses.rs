use serde::{Deserialize, Serialize};

use crate::models::book::Book;

#[derive(Deserialize, Serialize, Debug)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub book: Book,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookListResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
