//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;
use super::category::Category;
use crate::validation::{validate_isbn, validate_required};

/// Lifecycle status of a book.
///
/// `available_copies` is owned and mutated exclusively by the borrowing
/// workflow; everything else only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "book_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Borrowed,
    Reserved,
    Maintenance,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
            BookStatus::Reserved => "reserved",
            BookStatus::Maintenance => "maintenance",
        }
    }
}

/// Book row as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub category_id: i32,
    pub publisher: String,
    pub publication_year: i32,
    pub pages: i32,
    pub description: String,
    pub status: BookStatus,
    pub total_copies: i32,
    pub available_copies: i32,
    pub price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// A book may be borrowed iff a copy is on the shelf and it is not
    /// reserved or under maintenance.
    pub fn is_available(&self) -> bool {
        self.available_copies > 0 && self.status == BookStatus::Available
    }
}

/// Compact row for list/search results
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub publisher: String,
    pub publication_year: i32,
    pub status: BookStatus,
    pub total_copies: i32,
    pub available_copies: i32,
    pub category: String,
    pub authors: Vec<String>,
}

/// Full book detail for the catalog page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub publisher: String,
    pub publication_year: i32,
    pub pages: i32,
    pub description: String,
    pub status: BookStatus,
    pub total_copies: i32,
    pub available_copies: i32,
    pub price: Option<Decimal>,
    pub category: Category,
    pub authors: Vec<Author>,
    /// Current availability-gate verdict for this book
    pub available: bool,
    pub pending_reservations: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Quick-search hit (title/ISBN lookup)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookHit {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub authors: Vec<String>,
    pub available: bool,
    pub url: String,
}

/// Catalog list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Substring match on title, ISBN, publisher or author name
    pub search: Option<String>,
    pub category: Option<i32>,
    pub status: Option<BookStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Create/update payload for a catalog entry
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    #[validate(custom(function = validate_required))]
    pub title: String,
    #[validate(custom(function = validate_isbn))]
    pub isbn: String,
    pub category_id: i32,
    pub author_ids: Vec<i32>,
    #[validate(custom(function = validate_required))]
    pub publisher: String,
    #[validate(range(min = 1000, message = "Publication year must be 1000 or later"))]
    pub publication_year: i32,
    #[validate(range(min = 1, message = "Page count must be at least 1"))]
    pub pages: i32,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "At least one copy is required"))]
    pub total_copies: i32,
    pub price: Option<Decimal>,
}
