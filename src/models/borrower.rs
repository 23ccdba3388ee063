//! Borrower (library member) model and request types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{validate_email_shape, validate_required};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrower {
    pub id: i32,
    pub library_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub membership_date: DateTime<Utc>,
    pub is_active: bool,
    pub max_books_allowed: i32,
}

impl Borrower {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Registration payload. Phone is stored normalized when it carries at
/// least ten digits.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrower {
    #[validate(custom(function = validate_required))]
    pub library_id: String,
    #[validate(custom(function = validate_required))]
    pub first_name: String,
    #[validate(custom(function = validate_required))]
    pub last_name: String,
    #[validate(custom(function = validate_email_shape))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Profile update payload; absent fields are left untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBorrower {
    #[validate(custom(function = validate_required))]
    pub first_name: Option<String>,
    #[validate(custom(function = validate_required))]
    pub last_name: Option<String>,
    #[validate(custom(function = validate_email_shape))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1, message = "Borrow limit must be at least 1"))]
    pub max_books_allowed: Option<i32>,
}
