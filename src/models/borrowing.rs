//! Borrowing (loan) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrowing record as stored. `return_date` is unset while the loan is
/// outstanding.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrowing {
    pub id: i32,
    pub borrower_id: i32,
    pub book_id: i32,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl Borrowing {
    pub fn is_outstanding(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Borrowing with book context for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowingDetails {
    pub id: i32,
    pub book_id: i32,
    pub book_title: String,
    pub book_isbn: String,
    pub borrower_id: i32,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub is_overdue: bool,
    /// Fine the borrower would owe if the book came back now. Present
    /// only for outstanding loans; derived, never persisted here.
    pub projected_fine: Option<Decimal>,
    pub notes: Option<String>,
}

/// Borrow request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBorrowing {
    pub borrower_id: i32,
    pub book_id: i32,
    pub notes: Option<String>,
}
