//! Borrowings repository: the borrow/return commit path.
//!
//! The availability decision made here is the authoritative one. The
//! pre-submit gate the caller consulted may be stale by the time the
//! request lands; the book row is locked and re-checked inside the
//! transaction, and stale attempts are rejected with a conflict rather
//! than double-lending.

use chrono::{Duration, Utc};
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    fines::{self, FinePolicy},
    models::{
        borrowing::{Borrowing, BorrowingDetails, CreateBorrowing},
        fine::Fine,
    },
};

/// Outcome of returning a loan
pub struct ReturnOutcome {
    pub borrowing: Borrowing,
    pub book_title: String,
    /// Assessed fine, present when the loan came back overdue
    pub fine: Option<Fine>,
}

#[derive(Clone)]
pub struct BorrowingsRepository {
    pool: Pool<Postgres>,
}

impl BorrowingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrowing by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Borrowing> {
        sqlx::query_as::<_, Borrowing>("SELECT * FROM borrowings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrowing with id {} not found", id)))
    }

    /// Create a borrowing. The book row is locked for the duration of the
    /// transaction; availability is re-validated under that lock.
    pub async fn create(&self, request: &CreateBorrowing, loan_period_days: i64) -> AppResult<Borrowing> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let book_row = sqlx::query(
            "SELECT title, status::TEXT AS status, available_copies FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(request.book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", request.book_id)))?;

        let title: String = book_row.get("title");
        let status: String = book_row.get("status");
        let available_copies: i32 = book_row.get("available_copies");

        if status != "available" || available_copies == 0 {
            return Err(AppError::NotAvailable(format!(
                "\"{}\" is no longer available for borrowing",
                title
            )));
        }

        sqlx::query(
            r#"
            UPDATE books SET
                available_copies = available_copies - 1,
                status = CASE WHEN available_copies - 1 = 0 THEN 'borrowed'::book_status ELSE status END,
                updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(request.book_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let due_date = now + Duration::days(loan_period_days);
        let borrowing = sqlx::query_as::<_, Borrowing>(
            r#"
            INSERT INTO borrowings (borrower_id, book_id, borrow_date, due_date, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(request.borrower_id)
        .bind(request.book_id)
        .bind(now)
        .bind(due_date)
        .bind(&request.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(borrowing)
    }

    /// Return a loan, put the copy back on the shelf, and assess the fine
    /// for an overdue return in the same transaction.
    pub async fn return_loan(&self, loan_id: i32, policy: &FinePolicy) -> AppResult<ReturnOutcome> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT b.*, bk.title AS book_title
            FROM borrowings b
            JOIN books bk ON bk.id = b.book_id
            WHERE b.id = $1
            FOR UPDATE OF b
            "#,
        )
        .bind(loan_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrowing with id {} not found", loan_id)))?;

        let book_title: String = row.get("book_title");
        if row.get::<Option<chrono::DateTime<Utc>>, _>("return_date").is_some() {
            return Err(AppError::AlreadyReturned(format!(
                "\"{}\" has already been returned",
                book_title
            )));
        }

        let borrowing = sqlx::query_as::<_, Borrowing>(
            "UPDATE borrowings SET return_date = $2 WHERE id = $1 RETURNING *",
        )
        .bind(loan_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE books SET
                available_copies = available_copies + 1,
                status = CASE WHEN status = 'borrowed'::book_status THEN 'available'::book_status ELSE status END,
                updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(borrowing.book_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let amount = fines::compute_fine(borrowing.due_date, now, policy);
        let fine = if amount > rust_decimal::Decimal::ZERO {
            let fine = sqlx::query_as::<_, Fine>(
                "INSERT INTO fines (borrowing_id, amount, created_at) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(borrowing.id)
            .bind(amount)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;
            Some(fine)
        } else {
            None
        };

        tx.commit().await?;
        Ok(ReturnOutcome {
            borrowing,
            book_title,
            fine,
        })
    }

    /// Borrowings for a borrower, newest first, with book context.
    /// `projected_fine` is left for the caller to fill from the policy.
    pub async fn list_for_borrower(&self, borrower_id: i32) -> AppResult<Vec<BorrowingDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT b.*, bk.title AS book_title, bk.isbn AS book_isbn
            FROM borrowings b
            JOIN books bk ON bk.id = b.book_id
            WHERE b.borrower_id = $1
            ORDER BY b.borrow_date DESC
            "#,
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();
        Ok(rows.into_iter().map(|row| details_from_row(&row, now)).collect())
    }

    /// Single borrowing with book context
    pub async fn get_details(&self, id: i32) -> AppResult<BorrowingDetails> {
        let row = sqlx::query(
            r#"
            SELECT b.*, bk.title AS book_title, bk.isbn AS book_isbn
            FROM borrowings b
            JOIN books bk ON bk.id = b.book_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrowing with id {} not found", id)))?;

        Ok(details_from_row(&row, Utc::now()))
    }
}

fn details_from_row(row: &sqlx::postgres::PgRow, now: chrono::DateTime<Utc>) -> BorrowingDetails {
    let due_date: chrono::DateTime<Utc> = row.get("due_date");
    let return_date: Option<chrono::DateTime<Utc>> = row.get("return_date");
    BorrowingDetails {
        id: row.get("id"),
        book_id: row.get("book_id"),
        book_title: row.get("book_title"),
        book_isbn: row.get("book_isbn"),
        borrower_id: row.get("borrower_id"),
        borrow_date: row.get("borrow_date"),
        due_date,
        return_date,
        is_overdue: return_date.is_none() && now > due_date,
        projected_fine: None,
        notes: row.get("notes"),
    }
}
