//! Catalog management service

use async_trait::async_trait;
use chrono::{Datelike, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{BookDetails, BookHit, BookInput, BookQuery, BookSummary},
        category::Category,
    },
    repository::Repository,
    search::{SearchBackend, MIN_QUERY_LEN},
};

/// Most rows a quick search will return
const QUICK_SEARCH_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books with filters
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<BookSummary>, i64)> {
        self.repository.books.search(query).await
    }

    /// Quick title/ISBN search for type-ahead.
    ///
    /// Queries below the minimum length are never dispatched to the
    /// store; the caller gets an empty result and clears its display.
    pub async fn quick_search(&self, term: &str) -> AppResult<Vec<BookHit>> {
        let term = term.trim();
        if term.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        self.repository.books.quick_search(term, QUICK_SEARCH_LIMIT).await
    }

    /// Availability gate: a read-only, idempotent check consulted before
    /// a borrow request is submitted. The authoritative decision is
    /// re-made at commit time.
    pub async fn availability(&self, book_id: i32) -> AppResult<bool> {
        self.repository
            .books
            .availability(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))
    }

    /// Get book with full display context
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.repository.books.get_by_id(id).await?;
        let category = self.repository.books.get_category(book.category_id).await?;
        let authors = self.repository.books.get_authors(id).await?;
        let pending_reservations = self.repository.books.count_pending_reservations(id).await?;
        let available = book.is_available();

        Ok(BookDetails {
            id: book.id,
            title: book.title,
            isbn: book.isbn,
            publisher: book.publisher,
            publication_year: book.publication_year,
            pages: book.pages,
            description: book.description,
            status: book.status,
            total_copies: book.total_copies,
            available_copies: book.available_copies,
            price: book.price,
            category,
            authors,
            available,
            pending_reservations,
            created_at: book.created_at,
            updated_at: book.updated_at,
        })
    }

    /// Create a catalog entry
    pub async fn create_book(&self, input: &BookInput) -> AppResult<BookDetails> {
        self.check_references(input, None).await?;
        let book = self.repository.books.create(input).await?;
        tracing::info!("Catalog: created book id={} isbn={}", book.id, book.isbn);
        self.get_book(book.id).await
    }

    /// Update a catalog entry
    pub async fn update_book(&self, id: i32, input: &BookInput) -> AppResult<BookDetails> {
        self.repository.books.get_by_id(id).await?;
        self.check_references(input, Some(id)).await?;
        let book = self.repository.books.update(id, input).await?;
        self.get_book(book.id).await
    }

    /// Delete a catalog entry
    pub async fn delete_book(&self, id: i32, force: bool) -> AppResult<()> {
        self.repository.books.delete(id, force).await
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repository.books.list_categories().await
    }

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.books.list_authors().await
    }

    /// Referential checks the field validators cannot express
    async fn check_references(&self, input: &BookInput, exclude_id: Option<i32>) -> AppResult<()> {
        if self.repository.books.isbn_exists(&input.isbn, exclude_id).await? {
            return Err(AppError::Conflict(format!(
                "A book with ISBN {} already exists",
                input.isbn
            )));
        }
        let current_year = Utc::now().year();
        if input.publication_year > current_year {
            return Err(AppError::Validation(format!(
                "Publication year must be between 1000 and {}",
                current_year
            )));
        }
        self.repository.books.get_category(input.category_id).await?;
        if !input.author_ids.is_empty() {
            let found = self.repository.books.count_authors(&input.author_ids).await?;
            if found != input.author_ids.len() as i64 {
                return Err(AppError::Validation("One or more authors do not exist".to_string()));
            }
        }
        Ok(())
    }
}

/// The quick search doubles as the backend of the debounced search
/// supervisor, so type-ahead consumers share the same minimum-length and
/// row-limit rules as the plain endpoint.
#[async_trait]
impl SearchBackend for CatalogService {
    type Hit = BookHit;

    async fn search(&self, query: &str) -> AppResult<Vec<BookHit>> {
        self.quick_search(query).await
    }
}
