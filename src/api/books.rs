//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        author::Author,
        book::{BookDetails, BookHit, BookInput, BookQuery, BookSummary},
        category::Category,
    },
};

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// List of items
    pub items: Vec<T>,
    /// Total number of items
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

/// Availability gate verdict
#[derive(Serialize, ToSchema)]
pub struct AvailabilityResponse {
    /// Whether the book may currently be borrowed
    pub available: bool,
}

/// Quick-search parameters
#[derive(Deserialize, IntoParams)]
pub struct QuickSearchParams {
    /// Query text; fewer than 2 characters returns an empty list
    pub q: Option<String>,
}

/// Quick-search response
#[derive(Serialize, ToSchema)]
pub struct QuickSearchResponse {
    pub books: Vec<BookHit>,
}

/// List books with search and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("search" = Option<String>, Query, description = "Match on title, ISBN, publisher or author"),
        ("category" = Option<i32>, Query, description = "Filter by category ID"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of books", body = PaginatedResponse<BookSummary>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<PaginatedResponse<BookSummary>>> {
    let (items, total) = state.services.catalog.search_books(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Quick title/ISBN search for type-ahead
#[utoipa::path(
    get,
    path = "/search/books",
    tag = "books",
    params(QuickSearchParams),
    responses(
        (status = 200, description = "Matching books (at most 10)", body = QuickSearchResponse)
    )
)]
pub async fn quick_search(
    State(state): State<crate::AppState>,
    Query(params): Query<QuickSearchParams>,
) -> AppResult<Json<QuickSearchResponse>> {
    let books = state
        .services
        .catalog
        .quick_search(params.q.as_deref().unwrap_or(""))
        .await?;
    Ok(Json(QuickSearchResponse { books }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Availability gate: consulted before a borrow request is submitted.
/// Read-only and side-effect free; the authoritative check is re-made at
/// borrow time.
#[utoipa::path(
    get,
    path = "/books/{id}/availability",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Current availability", body = AvailabilityResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AvailabilityResponse>> {
    let available = state.services.catalog.availability(id).await?;
    Ok(Json(AvailabilityResponse { available }))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = BookDetails),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Book with this ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(input): Json<BookInput>,
) -> AppResult<(StatusCode, Json<BookDetails>)> {
    input.validate()?;

    let created = state.services.catalog.create_book(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(input): Json<BookInput>,
) -> AppResult<Json<BookDetails>> {
    input.validate()?;

    let updated = state.services.catalog.update_book(id, &input).await?;
    Ok(Json(updated))
}

#[derive(Deserialize)]
pub struct DeleteBookParams {
    pub force: Option<bool>,
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID"),
        ("force" = Option<bool>, Query, description = "Delete even with outstanding borrowings")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book has outstanding borrowings")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(params): Query<DeleteBookParams>,
) -> AppResult<StatusCode> {
    state
        .services
        .catalog
        .delete_book(id, params.force.unwrap_or(false))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "books",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.catalog.list_categories().await?;
    Ok(Json(categories))
}

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "books",
    responses(
        (status = 200, description = "All authors", body = Vec<Author>)
    )
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.catalog.list_authors().await?;
    Ok(Json(authors))
}
