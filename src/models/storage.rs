use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use std::sync::Mutex;
use thiserror::Error;

use crate::models::book::Book;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("book {0} not found")]
    NotFound(String),
    #[error("book {0} already exists")]
    Conflict(String),
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),
}

#[async_trait]
pub trait BookStore {
    async fn list_all(&self) -> Result<Vec<Book>, StoreError>;
    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, StoreError>;
    async fn create(&self, book: Book) -> Result<Book, StoreError>;
    async fn update_by_isbn(&self, isbn: &str, book: Book) -> Result<Book, StoreError>;
    async fn delete_by_isbn(&self, isbn: &str) -> Result<(), StoreError>;
    async fn test_connection(&self) -> Result<(), StoreError>;
    async fn close(&self);
}

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                isbn TEXT PRIMARY KEY,
                amazon_url TEXT NOT NULL,
                author TEXT NOT NULL,
                language TEXT NOT NULL,
                pages INTEGER NOT NULL,
                publisher TEXT NOT NULL,
                title TEXT NOT NULL,
                year INTEGER NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

fn book_from_row(row: &PgRow) -> Book {
    Book {
        isbn: row.get("isbn"),
        amazon_url: row.get("amazon_url"),
        author: row.get("author"),
        language: row.get("language"),
        pages: row.get("pages"),
        publisher: row.get("publisher"),
        title: row.get("title"),
        year: row.get("year"),
    }
}

#[async_trait]
impl BookStore for PostgresStore {
    async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        let rows = sqlx::query(
            "SELECT isbn, amazon_url, author, language, pages, publisher, title, year \
             FROM books ORDER BY isbn",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(book_from_row).collect())
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, StoreError> {
        let row = sqlx::query(
            "SELECT isbn, amazon_url, author, language, pages, publisher, title, year \
             FROM books WHERE isbn = $1",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(book_from_row(&row)),
            None => Err(StoreError::NotFound(isbn.to_string())),
        }
    }

    async fn create(&self, book: Book) -> Result<Book, StoreError> {
        let result = sqlx::query(
            "INSERT INTO books (isbn, amazon_url, author, language, pages, publisher, title, year) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&book.isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(book),
            Err(sqlx::Error::Database(db))
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                Err(StoreError::Conflict(book.isbn))
            }
            Err(e) => Err(StoreError::Postgres(e)),
        }
    }

    async fn update_by_isbn(&self, isbn: &str, book: Book) -> Result<Book, StoreError> {
        // isbn is the immutable key; only the remaining columns are replaced
        let row = sqlx::query(
            "UPDATE books \
             SET amazon_url = $2, author = $3, language = $4, pages = $5, \
                 publisher = $6, title = $7, year = $8 \
             WHERE isbn = $1 \
             RETURNING isbn, amazon_url, author, language, pages, publisher, title, year",
        )
        .bind(isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(book_from_row(&row)),
            None => Err(StoreError::NotFound(isbn.to_string())),
        }
    }

    async fn delete_by_isbn(&self, isbn: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(isbn.to_string()));
        }

        Ok(())
    }

    async fn test_connection(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

pub struct MemoryStore {
    books: Mutex<BTreeMap<String, Book>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            books: Mutex::new(BTreeMap::new()),
        }
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        let books = self.books.lock().unwrap();
        Ok(books.values().cloned().collect())
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, StoreError> {
        let books = self.books.lock().unwrap();
        books
            .get(isbn)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(isbn.to_string()))
    }

    async fn create(&self, book: Book) -> Result<Book, StoreError> {
        let mut books = self.books.lock().unwrap();
        if books.contains_key(&book.isbn) {
            return Err(StoreError::Conflict(book.isbn));
        }
        books.insert(book.isbn.clone(), book.clone());
        Ok(book)
    }

    async fn update_by_isbn(&self, isbn: &str, book: Book) -> Result<Book, StoreError> {
        let mut books = self.books.lock().unwrap();
        match books.get_mut(isbn) {
            Some(stored) => {
                *stored = Book {
                    isbn: isbn.to_string(),
                    ..book
                };
                Ok(stored.clone())
            }
            None => Err(StoreError::NotFound(isbn.to_string())),
        }
    }

    async fn delete_by_isbn(&self, isbn: &str) -> Result<(), StoreError> {
        let mut books = self.books.lock().unwrap();
        match books.remove(isbn) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(isbn.to_string())),
        }
    }

    async fn test_connection(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}
