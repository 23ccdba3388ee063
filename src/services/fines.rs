//! Fine ledger service

use crate::{
    error::AppResult,
    models::fine::{Fine, FinesLedger, FineStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct FinesService {
    repository: Repository,
}

impl FinesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// A borrower's fine ledger with running totals
    pub async fn ledger_for(&self, borrower_id: i32) -> AppResult<FinesLedger> {
        self.repository.borrowers.get_by_id(borrower_id).await?;
        let fines = self.repository.fines.list_for_borrower(borrower_id).await?;
        let (total, pending_total) = self.repository.fines.totals_for_borrower(borrower_id).await?;
        Ok(FinesLedger {
            fines,
            total,
            pending_total,
        })
    }

    /// Mark a pending fine as paid
    pub async fn pay(&self, fine_id: i32, notes: Option<String>) -> AppResult<Fine> {
        let fine = self.repository.fines.settle(fine_id, FineStatus::Paid, notes).await?;
        tracing::info!("Fines: fine {} paid ({})", fine.id, fine.amount);
        Ok(fine)
    }

    /// Waive a pending fine
    pub async fn waive(&self, fine_id: i32, notes: Option<String>) -> AppResult<Fine> {
        let fine = self.repository.fines.settle(fine_id, FineStatus::Waived, notes).await?;
        tracing::info!("Fines: fine {} waived ({})", fine.id, fine.amount);
        Ok(fine)
    }
}
