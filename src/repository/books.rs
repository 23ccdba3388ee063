//! Books repository for catalog database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookHit, BookInput, BookQuery, BookSummary},
        category::Category,
    },
};

/// Sub-select rendering a book's author names in display order
const AUTHOR_NAMES: &str = r#"
    COALESCE((
        SELECT ARRAY_AGG(a.first_name || ' ' || a.last_name ORDER BY ba.position, a.id)
        FROM book_authors ba
        JOIN authors a ON a.id = ba.author_id
        WHERE ba.book_id = b.id
    ), ARRAY[]::TEXT[])
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Availability-gate read: `None` when the book does not exist.
    pub async fn availability(&self, id: i32) -> AppResult<Option<bool>> {
        let available = sqlx::query_scalar::<_, bool>(
            "SELECT available_copies > 0 AND status = 'available' FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(available)
    }

    /// Search books with filters and pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<BookSummary>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        // Conditions reference numbered binds; binds are applied in the
        // same order below for both the count and the page query.
        let mut conditions = vec!["1=1".to_string()];
        let mut next_param = 1;

        let search_pattern = query.search.as_ref().map(|s| format!("%{}%", s.to_lowercase()));
        if search_pattern.is_some() {
            conditions.push(format!(
                "(LOWER(b.title) LIKE ${n} OR LOWER(b.isbn) LIKE ${n} OR LOWER(b.publisher) LIKE ${n} \
                 OR EXISTS (SELECT 1 FROM book_authors ba JOIN authors a ON a.id = ba.author_id \
                            WHERE ba.book_id = b.id \
                              AND (LOWER(a.first_name) LIKE ${n} OR LOWER(a.last_name) LIKE ${n})))",
                n = next_param
            ));
            next_param += 1;
        }
        if query.category.is_some() {
            conditions.push(format!("b.category_id = ${}", next_param));
            next_param += 1;
        }
        if query.status.is_some() {
            conditions.push(format!("b.status = ${}", next_param));
        }

        let where_clause = conditions.join(" AND ");

        let count_query = format!("SELECT COUNT(*) FROM books b WHERE {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref pattern) = search_pattern {
            count = count.bind(pattern);
        }
        if let Some(category) = query.category {
            count = count.bind(category);
        }
        if let Some(status) = query.status {
            count = count.bind(status);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            r#"
            SELECT b.id, b.title, b.isbn, b.publisher, b.publication_year, b.status,
                   b.total_copies, b.available_copies,
                   c.name AS category,
                   {authors} AS authors
            FROM books b
            JOIN categories c ON c.id = b.category_id
            WHERE {where_clause}
            ORDER BY b.title
            LIMIT {per_page} OFFSET {offset}
            "#,
            authors = AUTHOR_NAMES,
        );
        let mut select = sqlx::query_as::<_, BookSummary>(&select_query);
        if let Some(ref pattern) = search_pattern {
            select = select.bind(pattern);
        }
        if let Some(category) = query.category {
            select = select.bind(category);
        }
        if let Some(status) = query.status {
            select = select.bind(status);
        }
        let books = select.fetch_all(&self.pool).await?;

        Ok((books, total))
    }

    /// Title/ISBN quick search for type-ahead, capped at `limit` rows
    pub async fn quick_search(&self, term: &str, limit: i64) -> AppResult<Vec<BookHit>> {
        let pattern = format!("%{}%", term.to_lowercase());
        let rows = sqlx::query(&format!(
            r#"
            SELECT b.id, b.title, b.isbn,
                   {AUTHOR_NAMES} AS authors,
                   (b.available_copies > 0 AND b.status = 'available') AS available
            FROM books b
            WHERE LOWER(b.title) LIKE $1 OR b.isbn LIKE $1
            ORDER BY b.title
            LIMIT $2
            "#
        ))
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id: i32 = row.get("id");
                BookHit {
                    id,
                    title: row.get("title"),
                    isbn: row.get("isbn"),
                    authors: row.get("authors"),
                    available: row.get("available"),
                    url: format!("/books/{}", id),
                }
            })
            .collect())
    }

    /// Create a new book with its author links
    pub async fn create(&self, input: &BookInput) -> AppResult<Book> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (
                title, isbn, category_id, publisher, publication_year, pages,
                description, status, total_copies, available_copies, price,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, 'available', $8, $8, $9, $10, $10)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.isbn)
        .bind(input.category_id)
        .bind(&input.publisher)
        .bind(input.publication_year)
        .bind(input.pages)
        .bind(input.description.as_deref().unwrap_or(""))
        .bind(input.total_copies)
        .bind(input.price)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for (position, author_id) in input.author_ids.iter().enumerate() {
            sqlx::query("INSERT INTO book_authors (book_id, author_id, position) VALUES ($1, $2, $3)")
                .bind(book.id)
                .bind(author_id)
                .bind(position as i16)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    /// Update a book. Copies on the shelf are clamped to the new total;
    /// status is owned by the borrowing workflow and left untouched.
    pub async fn update(&self, id: i32, input: &BookInput) -> AppResult<Book> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = $2, isbn = $3, category_id = $4, publisher = $5,
                publication_year = $6, pages = $7, description = $8,
                total_copies = $9,
                available_copies = LEAST(available_copies, $9),
                price = $10, updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.isbn)
        .bind(input.category_id)
        .bind(&input.publisher)
        .bind(input.publication_year)
        .bind(input.pages)
        .bind(input.description.as_deref().unwrap_or(""))
        .bind(input.total_copies)
        .bind(input.price)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for (position, author_id) in input.author_ids.iter().enumerate() {
            sqlx::query("INSERT INTO book_authors (book_id, author_id, position) VALUES ($1, $2, $3)")
                .bind(id)
                .bind(author_id)
                .bind(position as i16)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    /// Delete a book. Refused while borrowings are outstanding unless
    /// forced, in which case the loan history goes with it.
    pub async fn delete(&self, id: i32, force: bool) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        let outstanding: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrowings WHERE book_id = $1 AND return_date IS NULL",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if outstanding > 0 && !force {
            return Err(AppError::Conflict(format!(
                "Book has {} outstanding borrowing(s)",
                outstanding
            )));
        }

        sqlx::query(
            "DELETE FROM fines WHERE borrowing_id IN (SELECT id FROM borrowings WHERE book_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM borrowings WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM reservations WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Check whether another book already carries this ISBN
    pub async fn isbn_exists(&self, isbn: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1 AND ($2::INTEGER IS NULL OR id != $2))",
        )
        .bind(isbn)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Load the authors of a book in display order
    pub async fn get_authors(&self, book_id: i32) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.*
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = $1
            ORDER BY ba.position, a.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    pub async fn get_category(&self, id: i32) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let authors =
            sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY last_name, first_name")
                .fetch_all(&self.pool)
                .await?;
        Ok(authors)
    }

    /// Number of authors among `ids` that actually exist
    pub async fn count_authors(&self, ids: &[i32]) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_pending_reservations(&self, book_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE book_id = $1 AND status = 'pending' AND expiry_date > NOW()",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
