//! Reservations repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::reservation::{Reservation, ReservationDetails, ReservationStatus},
};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get reservation by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Whether the borrower already holds a live pending reservation for
    /// this book
    pub async fn has_pending(&self, borrower_id: i32, book_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE borrower_id = $1 AND book_id = $2
                  AND status = 'pending' AND expiry_date > NOW()
            )
            "#,
        )
        .bind(borrower_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create(
        &self,
        borrower_id: i32,
        book_id: i32,
        expiry_date: DateTime<Utc>,
        notes: Option<&str>,
    ) -> AppResult<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (borrower_id, book_id, expiry_date, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(borrower_id)
        .bind(book_id)
        .bind(expiry_date)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(reservation)
    }

    /// Cancel a pending reservation
    pub async fn cancel(&self, id: i32) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let current: ReservationStatus =
            sqlx::query_scalar("SELECT status FROM reservations WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Reservation with id {} not found", id))
                })?;

        if current != ReservationStatus::Pending {
            return Err(AppError::NotCancellable(format!(
                "Reservation {} is not pending",
                id
            )));
        }

        let reservation = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = 'cancelled' WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(reservation)
    }

    /// Reservations for a borrower, newest first, with the expiry applied
    /// to the reported status
    pub async fn list_for_borrower(&self, borrower_id: i32) -> AppResult<Vec<ReservationDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT r.*, bk.title AS book_title
            FROM reservations r
            JOIN books bk ON bk.id = r.book_id
            WHERE r.borrower_id = $1
            ORDER BY r.request_date DESC
            "#,
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();
        Ok(rows
            .into_iter()
            .map(|row| {
                let reservation = Reservation {
                    id: row.get("id"),
                    borrower_id: row.get("borrower_id"),
                    book_id: row.get("book_id"),
                    request_date: row.get("request_date"),
                    expiry_date: row.get("expiry_date"),
                    status: row.get("status"),
                    notes: row.get("notes"),
                };
                ReservationDetails {
                    id: reservation.id,
                    book_id: reservation.book_id,
                    book_title: row.get("book_title"),
                    request_date: reservation.request_date,
                    expiry_date: reservation.expiry_date,
                    status: reservation.effective_status(now),
                    notes: reservation.notes,
                }
            })
            .collect())
    }
}
