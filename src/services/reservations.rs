//! Reservation service

use chrono::{Duration, Utc};

use crate::{
    error::{AppError, AppResult},
    models::reservation::{CreateReservation, Reservation, ReservationDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Place a reservation. One live pending reservation per
    /// borrower/book pair.
    pub async fn reserve(&self, request: CreateReservation) -> AppResult<Reservation> {
        let borrower = self.repository.borrowers.get_by_id(request.borrower_id).await?;
        if !borrower.is_active {
            return Err(AppError::BorrowerInactive(format!(
                "Borrower {} is not an active member",
                borrower.library_id
            )));
        }
        let book = self.repository.books.get_by_id(request.book_id).await?;

        if self
            .repository
            .reservations
            .has_pending(request.borrower_id, request.book_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "A pending reservation for \"{}\" already exists",
                book.title
            )));
        }

        let settings = self.repository.settings.get().await?;
        let expiry = Utc::now() + Duration::days(settings.reservation_period_days as i64);
        let reservation = self
            .repository
            .reservations
            .create(request.borrower_id, request.book_id, expiry, request.notes.as_deref())
            .await?;

        tracing::info!(
            "Reservations: borrower {} reserved book {} until {}",
            reservation.borrower_id,
            reservation.book_id,
            reservation.expiry_date
        );
        Ok(reservation)
    }

    /// Cancel a pending reservation
    pub async fn cancel(&self, reservation_id: i32) -> AppResult<Reservation> {
        self.repository.reservations.cancel(reservation_id).await
    }

    /// A borrower's reservations, newest first
    pub async fn reservations_for(&self, borrower_id: i32) -> AppResult<Vec<ReservationDetails>> {
        self.repository.borrowers.get_by_id(borrower_id).await?;
        self.repository.reservations.list_for_borrower(borrower_id).await
    }
}
