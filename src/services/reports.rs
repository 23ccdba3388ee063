//! Report generation service.
//!
//! Each report is a query rendered into an export [`Table`]: cells are
//! pre-formatted strings in display order, and the API layer serializes
//! the table to CSV.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::Row;

use crate::{
    error::{AppError, AppResult},
    export::Table,
    fines, format,
    repository::Repository,
};

/// Available report types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Borrowings,
    Overdue,
    Fines,
    Popular,
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Build the requested report over an optional date range
    pub async fn build(
        &self,
        kind: ReportKind,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Table> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(AppError::BadRequest(
                    "Start date cannot be after end date".to_string(),
                ));
            }
        }

        let range_start = start
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or(DateTime::from_timestamp(0, 0).unwrap());
        // End bound is exclusive at the following midnight so the whole
        // end day is included.
        let range_end = end
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc() + Duration::days(1))
            .unwrap_or_else(Utc::now);

        match kind {
            ReportKind::Borrowings => self.borrowings(range_start, range_end).await,
            ReportKind::Overdue => self.overdue().await,
            ReportKind::Fines => self.fines(range_start, range_end).await,
            ReportKind::Popular => self.popular(range_start, range_end).await,
        }
    }

    async fn borrowings(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Table> {
        let rows = sqlx::query(
            r#"
            SELECT bo.first_name || ' ' || bo.last_name AS borrower,
                   bk.title, bk.isbn, br.borrow_date, br.due_date, br.return_date
            FROM borrowings br
            JOIN books bk ON bk.id = br.book_id
            JOIN borrowers bo ON bo.id = br.borrower_id
            WHERE br.borrow_date >= $1 AND br.borrow_date < $2
            ORDER BY br.borrow_date DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.repository.pool)
        .await?;

        let mut table = Table::new(vec!["Borrower", "Book", "ISBN", "Borrowed", "Due", "Returned"]);
        for row in rows {
            let returned: Option<DateTime<Utc>> = row.get("return_date");
            table.push_row(vec![
                row.get::<String, _>("borrower"),
                row.get::<String, _>("title"),
                row.get::<String, _>("isbn"),
                format::date(row.get("borrow_date")),
                format::date(row.get("due_date")),
                returned.map(format::date).unwrap_or_default(),
            ]);
        }
        Ok(table)
    }

    /// Outstanding overdue loans with the fine each would incur today
    async fn overdue(&self) -> AppResult<Table> {
        let policy = self.repository.settings.get().await?.fine_policy();
        let now = Utc::now();

        let rows = sqlx::query(
            r#"
            SELECT bo.first_name || ' ' || bo.last_name AS borrower,
                   bk.title, br.due_date
            FROM borrowings br
            JOIN books bk ON bk.id = br.book_id
            JOIN borrowers bo ON bo.id = br.borrower_id
            WHERE br.return_date IS NULL AND br.due_date < NOW()
            ORDER BY br.due_date
            "#,
        )
        .fetch_all(&self.repository.pool)
        .await?;

        let mut table = Table::new(vec!["Borrower", "Book", "Due", "Days overdue", "Projected fine"]);
        for row in rows {
            let due: DateTime<Utc> = row.get("due_date");
            table.push_row(vec![
                row.get::<String, _>("borrower"),
                row.get::<String, _>("title"),
                format::date(due),
                fines::overdue_days(due, now).to_string(),
                format::currency(fines::compute_fine(due, now, &policy)),
            ]);
        }
        Ok(table)
    }

    async fn fines(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Table> {
        let rows = sqlx::query(
            r#"
            SELECT bo.first_name || ' ' || bo.last_name AS borrower,
                   bk.title, f.amount, f.status::TEXT AS status, f.created_at
            FROM fines f
            JOIN borrowings br ON br.id = f.borrowing_id
            JOIN books bk ON bk.id = br.book_id
            JOIN borrowers bo ON bo.id = br.borrower_id
            WHERE f.created_at >= $1 AND f.created_at < $2
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.repository.pool)
        .await?;

        let mut table = Table::new(vec!["Borrower", "Book", "Amount", "Status", "Assessed"]);
        for row in rows {
            table.push_row(vec![
                row.get::<String, _>("borrower"),
                row.get::<String, _>("title"),
                format::currency(row.get::<Decimal, _>("amount")),
                row.get::<String, _>("status"),
                format::date(row.get("created_at")),
            ]);
        }
        Ok(table)
    }

    async fn popular(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Table> {
        let rows = sqlx::query(
            r#"
            SELECT bk.title, bk.isbn, COUNT(br.id) AS borrow_count
            FROM books bk
            JOIN borrowings br ON br.book_id = bk.id
            WHERE br.borrow_date >= $1 AND br.borrow_date < $2
            GROUP BY bk.id, bk.title, bk.isbn
            ORDER BY borrow_count DESC, bk.title
            LIMIT 50
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.repository.pool)
        .await?;

        let mut table = Table::new(vec!["Title", "ISBN", "Times borrowed"]);
        for row in rows {
            table.push_row(vec![
                row.get::<String, _>("title"),
                row.get::<String, _>("isbn"),
                row.get::<i64, _>("borrow_count").to_string(),
            ]);
        }
        Ok(table)
    }
}
