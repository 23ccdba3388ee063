//! Borrower account service

use crate::{
    error::{AppError, AppResult},
    models::borrower::{Borrower, CreateBorrower, UpdateBorrower},
    repository::Repository,
    validation,
};

#[derive(Clone)]
pub struct BorrowersService {
    repository: Repository,
}

impl BorrowersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i32) -> AppResult<Borrower> {
        self.repository.borrowers.get_by_id(id).await
    }

    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<Borrower>, i64)> {
        self.repository.borrowers.list(page, per_page).await
    }

    /// Register a borrower. The loan limit defaults from the circulation
    /// policy in force at registration time.
    pub async fn register(&self, input: CreateBorrower) -> AppResult<Borrower> {
        if self.repository.borrowers.library_id_exists(&input.library_id).await? {
            return Err(AppError::Conflict(format!(
                "A borrower with library id {} already exists",
                input.library_id
            )));
        }
        if self.repository.borrowers.email_exists(&input.email, None).await? {
            return Err(AppError::Conflict("A borrower with this email already exists".to_string()));
        }

        let settings = self.repository.settings.get().await?;
        let phone = input.phone.as_deref().map(validation::format_phone);
        let borrower = self
            .repository
            .borrowers
            .create(&input, phone, settings.max_books_allowed)
            .await?;

        tracing::info!(
            "Borrowers: registered {} ({})",
            borrower.library_id,
            borrower.full_name()
        );
        Ok(borrower)
    }

    /// Update a borrower profile
    pub async fn update(&self, id: i32, input: UpdateBorrower) -> AppResult<Borrower> {
        self.repository.borrowers.get_by_id(id).await?;
        if let Some(ref email) = input.email {
            if self.repository.borrowers.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict(
                    "A borrower with this email already exists".to_string(),
                ));
            }
        }
        let phone = input.phone.as_deref().map(validation::format_phone);
        self.repository.borrowers.update(id, &input, phone).await
    }
}
