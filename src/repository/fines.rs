//! Fines repository for database operations

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::fine::{Fine, FineDetails, FineStatus},
};

#[derive(Clone)]
pub struct FinesRepository {
    pool: Pool<Postgres>,
}

impl FinesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get fine by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Fine> {
        sqlx::query_as::<_, Fine>("SELECT * FROM fines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Fine with id {} not found", id)))
    }

    /// Fine ledger for a borrower, newest first
    pub async fn list_for_borrower(&self, borrower_id: i32) -> AppResult<Vec<FineDetails>> {
        let fines = sqlx::query_as::<_, FineDetails>(
            r#"
            SELECT f.id, f.borrowing_id, bk.title AS book_title, b.due_date,
                   f.amount, f.status, f.created_at, f.paid_at, f.notes
            FROM fines f
            JOIN borrowings b ON b.id = f.borrowing_id
            JOIN books bk ON bk.id = b.book_id
            WHERE b.borrower_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(fines)
    }

    /// Overall and still-pending fine totals for a borrower
    pub async fn totals_for_borrower(&self, borrower_id: i32) -> AppResult<(Decimal, Decimal)> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(f.amount), 0) AS total,
                   COALESCE(SUM(f.amount) FILTER (WHERE f.status = 'pending'), 0) AS pending_total
            FROM fines f
            JOIN borrowings b ON b.id = f.borrowing_id
            WHERE b.borrower_id = $1
            "#,
        )
        .bind(borrower_id)
        .fetch_one(&self.pool)
        .await?;
        Ok((row.get("total"), row.get("pending_total")))
    }

    /// Settle a pending fine as paid or waived. Settling twice is a
    /// conflict, not an update.
    pub async fn settle(
        &self,
        id: i32,
        status: FineStatus,
        notes: Option<String>,
    ) -> AppResult<Fine> {
        debug_assert!(matches!(status, FineStatus::Paid | FineStatus::Waived));
        let mut tx = self.pool.begin().await?;

        let current: FineStatus = sqlx::query_scalar("SELECT status FROM fines WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Fine with id {} not found", id)))?;

        if current != FineStatus::Pending {
            return Err(AppError::AlreadySettled(format!(
                "Fine {} has already been settled",
                id
            )));
        }

        let paid_at = if status == FineStatus::Paid {
            Some(Utc::now())
        } else {
            None
        };

        let fine = sqlx::query_as::<_, Fine>(
            r#"
            UPDATE fines SET status = $2, paid_at = $3, notes = COALESCE($4, notes)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(paid_at)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(fine)
    }
}
