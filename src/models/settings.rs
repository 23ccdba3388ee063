//! Circulation policy settings model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::fines::FinePolicy;

/// The single authoritative circulation policy row.
///
/// Fine rate and cap are read from here by everything that touches
/// money; clients display what this store says, they never carry their
/// own copy of the numbers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CirculationSettings {
    pub loan_period_days: i32,
    pub max_books_allowed: i32,
    pub daily_fine_rate: Decimal,
    pub max_fine_days: i32,
    pub reservation_period_days: i32,
}

impl CirculationSettings {
    pub fn fine_policy(&self) -> FinePolicy {
        FinePolicy {
            daily_rate: self.daily_fine_rate,
            max_chargeable_days: self.max_fine_days as i64,
        }
    }
}

/// Settings update; absent fields keep their current value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCirculationSettings {
    #[validate(range(min = 1, message = "Loan period must be at least 1 day"))]
    pub loan_period_days: Option<i32>,
    #[validate(range(min = 1, message = "Borrow limit must be at least 1"))]
    pub max_books_allowed: Option<i32>,
    pub daily_fine_rate: Option<Decimal>,
    #[validate(range(min = 0, message = "Fine cap cannot be negative"))]
    pub max_fine_days: Option<i32>,
    #[validate(range(min = 1, message = "Reservation period must be at least 1 day"))]
    pub reservation_period_days: Option<i32>,
}
