//! Borrow/return workflow service.
//!
//! Owns the business rules around lending: borrower standing, the
//! per-borrower loan limit, and the authoritative availability re-check
//! delegated to the repository's locked transaction.

use crate::{
    error::{AppError, AppResult},
    fines,
    models::borrowing::{Borrowing, BorrowingDetails, CreateBorrowing},
    repository::{borrowings::ReturnOutcome, Repository},
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
}

impl CirculationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book.
    ///
    /// The gate check the caller ran earlier is advisory only; the
    /// repository re-validates availability under a row lock and a stale
    /// attempt comes back as a conflict, not a second loan.
    pub async fn borrow(&self, request: CreateBorrowing) -> AppResult<Borrowing> {
        let borrower = self.repository.borrowers.get_by_id(request.borrower_id).await?;
        if !borrower.is_active {
            return Err(AppError::BorrowerInactive(format!(
                "Borrower {} is not an active member",
                borrower.library_id
            )));
        }

        let outstanding = self
            .repository
            .borrowers
            .count_outstanding(borrower.id)
            .await?;
        if outstanding >= borrower.max_books_allowed as i64 {
            return Err(AppError::BorrowLimit(format!(
                "Maximum of {} borrowed books reached",
                borrower.max_books_allowed
            )));
        }

        let settings = self.repository.settings.get().await?;
        let borrowing = self
            .repository
            .borrowings
            .create(&request, settings.loan_period_days as i64)
            .await?;

        tracing::info!(
            "Circulation: borrower {} borrowed book {} (loan {}, due {})",
            borrowing.borrower_id,
            borrowing.book_id,
            borrowing.id,
            borrowing.due_date
        );
        Ok(borrowing)
    }

    /// Return a loan. An overdue return assesses a fine under the policy
    /// in force, inside the same transaction as the return itself.
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<ReturnOutcome> {
        let settings = self.repository.settings.get().await?;
        let outcome = self
            .repository
            .borrowings
            .return_loan(loan_id, &settings.fine_policy())
            .await?;

        if let Some(ref fine) = outcome.fine {
            tracing::info!(
                "Circulation: loan {} returned overdue, fine {} assessed",
                loan_id,
                fine.amount
            );
        }
        Ok(outcome)
    }

    /// Single borrowing with its projected fine filled in
    pub async fn get_borrowing(&self, id: i32) -> AppResult<BorrowingDetails> {
        let mut details = self.repository.borrowings.get_details(id).await?;
        self.project_fines(std::slice::from_mut(&mut details)).await?;
        Ok(details)
    }

    /// A borrower's loans, newest first, with projected fines
    pub async fn borrowings_for(&self, borrower_id: i32) -> AppResult<Vec<BorrowingDetails>> {
        self.repository.borrowers.get_by_id(borrower_id).await?;
        let mut details = self.repository.borrowings.list_for_borrower(borrower_id).await?;
        self.project_fines(&mut details).await?;
        Ok(details)
    }

    /// Fill `projected_fine` for outstanding loans from the live policy.
    /// Returned loans keep `None`; their fine, if any, is in the ledger.
    async fn project_fines(&self, details: &mut [BorrowingDetails]) -> AppResult<()> {
        let policy = self.repository.settings.get().await?.fine_policy();
        let now = chrono::Utc::now();
        for d in details.iter_mut() {
            if d.return_date.is_none() {
                d.projected_fine = Some(fines::compute_fine(d.due_date, now, &policy));
            }
        }
        Ok(())
    }
}
