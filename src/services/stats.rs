//! Statistics service

use rust_decimal::Decimal;
use sqlx::Row;

use crate::{
    api::stats::{PopularBook, RecentBorrowing, StatsResponse},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Shared pool handle, used by the readiness probe
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.repository.pool
    }

    /// Library overview: the home/dashboard numbers
    pub async fn overview(&self) -> AppResult<StatsResponse> {
        let pool = &self.repository.pool;

        let total_books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(pool)
            .await?;

        let total_borrowers: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM borrowers WHERE is_active")
                .fetch_one(pool)
                .await?;

        let borrowed_now: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM borrowings WHERE return_date IS NULL")
                .fetch_one(pool)
                .await?;

        let overdue_now: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrowings WHERE return_date IS NULL AND due_date < NOW()",
        )
        .fetch_one(pool)
        .await?;

        let pending_fines: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM fines WHERE status = 'pending'",
        )
        .fetch_one(pool)
        .await?;

        let popular_books = sqlx::query(
            r#"
            SELECT b.id, b.title, COUNT(br.id) AS borrow_count
            FROM books b
            LEFT JOIN borrowings br ON br.book_id = b.id
            GROUP BY b.id, b.title
            ORDER BY borrow_count DESC, b.title
            LIMIT 10
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| PopularBook {
            id: row.get("id"),
            title: row.get("title"),
            borrow_count: row.get("borrow_count"),
        })
        .collect();

        let recent_borrowings = sqlx::query(
            r#"
            SELECT br.id, bk.title AS book_title,
                   bo.first_name || ' ' || bo.last_name AS borrower_name,
                   br.borrow_date, br.due_date, br.return_date IS NOT NULL AS returned
            FROM borrowings br
            JOIN books bk ON bk.id = br.book_id
            JOIN borrowers bo ON bo.id = br.borrower_id
            ORDER BY br.borrow_date DESC
            LIMIT 10
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| RecentBorrowing {
            id: row.get("id"),
            book_title: row.get("book_title"),
            borrower_name: row.get("borrower_name"),
            borrow_date: row.get("borrow_date"),
            due_date: row.get("due_date"),
            returned: row.get("returned"),
        })
        .collect();

        Ok(StatsResponse {
            total_books,
            total_borrowers,
            borrowed_now,
            overdue_now,
            pending_fines,
            popular_books,
            recent_borrowings,
        })
    }
}
