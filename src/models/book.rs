use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}
