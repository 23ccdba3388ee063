//! Reservation model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Fulfilled,
    Cancelled,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub borrower_id: i32,
    pub book_id: i32,
    pub request_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub status: ReservationStatus,
    pub notes: Option<String>,
}

impl Reservation {
    /// Effective status: a pending reservation past its expiry date reads
    /// as expired without waiting for a sweep to persist it.
    pub fn effective_status(&self, now: DateTime<Utc>) -> ReservationStatus {
        if self.status == ReservationStatus::Pending && now > self.expiry_date {
            ReservationStatus::Expired
        } else {
            self.status
        }
    }
}

/// Reservation with book context for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReservationDetails {
    pub id: i32,
    pub book_id: i32,
    pub book_title: String,
    pub request_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub status: ReservationStatus,
    pub notes: Option<String>,
}

/// Reservation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservation {
    pub borrower_id: i32,
    pub book_id: i32,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn pending_past_expiry_reads_as_expired() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let r = Reservation {
            id: 1,
            borrower_id: 1,
            book_id: 1,
            request_date: now - Duration::days(10),
            expiry_date: now - Duration::days(3),
            status: ReservationStatus::Pending,
            notes: None,
        };
        assert_eq!(r.effective_status(now), ReservationStatus::Expired);
    }

    #[test]
    fn cancelled_never_turns_expired() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let r = Reservation {
            id: 1,
            borrower_id: 1,
            book_id: 1,
            request_date: now - Duration::days(10),
            expiry_date: now - Duration::days(3),
            status: ReservationStatus::Cancelled,
            notes: None,
        };
        assert_eq!(r.effective_status(now), ReservationStatus::Cancelled);
    }

    #[test]
    fn pending_before_expiry_stays_pending() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let r = Reservation {
            id: 1,
            borrower_id: 1,
            book_id: 1,
            request_date: now,
            expiry_date: now + Duration::days(7),
            status: ReservationStatus::Pending,
            notes: None,
        };
        assert_eq!(r.effective_status(now), ReservationStatus::Pending);
    }
}
