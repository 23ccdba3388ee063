//! Borrowers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrower::{Borrower, CreateBorrower, UpdateBorrower},
};

#[derive(Clone)]
pub struct BorrowersRepository {
    pool: Pool<Postgres>,
}

impl BorrowersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrower by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Borrower> {
        sqlx::query_as::<_, Borrower>("SELECT * FROM borrowers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrower with id {} not found", id)))
    }

    /// List borrowers with pagination
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<Borrower>, i64)> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, 100);
        let offset = (page - 1) * per_page;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrowers")
            .fetch_one(&self.pool)
            .await?;

        let borrowers = sqlx::query_as::<_, Borrower>(
            "SELECT * FROM borrowers ORDER BY last_name, first_name LIMIT $1 OFFSET $2",
        )
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((borrowers, total))
    }

    /// Register a borrower. `phone` arrives already normalized;
    /// `max_books_allowed` comes from the circulation policy in force.
    pub async fn create(
        &self,
        input: &CreateBorrower,
        phone: Option<String>,
        max_books_allowed: i32,
    ) -> AppResult<Borrower> {
        let borrower = sqlx::query_as::<_, Borrower>(
            r#"
            INSERT INTO borrowers (
                library_id, first_name, last_name, email, phone, address,
                date_of_birth, max_books_allowed
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&input.library_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(phone)
        .bind(&input.address)
        .bind(input.date_of_birth)
        .bind(max_books_allowed)
        .fetch_one(&self.pool)
        .await?;
        Ok(borrower)
    }

    /// Update a borrower profile; absent fields keep their current value
    pub async fn update(
        &self,
        id: i32,
        input: &UpdateBorrower,
        phone: Option<String>,
    ) -> AppResult<Borrower> {
        sqlx::query_as::<_, Borrower>(
            r#"
            UPDATE borrowers SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address),
                date_of_birth = COALESCE($7, date_of_birth),
                is_active = COALESCE($8, is_active),
                max_books_allowed = COALESCE($9, max_books_allowed)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(phone)
        .bind(&input.address)
        .bind(input.date_of_birth)
        .bind(input.is_active)
        .bind(input.max_books_allowed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrower with id {} not found", id)))
    }

    pub async fn library_id_exists(&self, library_id: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM borrowers WHERE library_id = $1)")
                .bind(library_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM borrowers WHERE email = $1 AND ($2::INTEGER IS NULL OR id != $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Number of books the borrower currently has out
    pub async fn count_outstanding(&self, borrower_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrowings WHERE borrower_id = $1 AND return_date IS NULL",
        )
        .bind(borrower_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
