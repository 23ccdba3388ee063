//! Fine ledger model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "fine_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FineStatus {
    Pending,
    Paid,
    Waived,
}

/// Assessed fine, created when an overdue loan is returned
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fine {
    pub id: i32,
    pub borrowing_id: i32,
    pub amount: Decimal,
    pub status: FineStatus,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Fine with loan context for the borrower's ledger
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FineDetails {
    pub id: i32,
    pub borrowing_id: i32,
    pub book_title: String,
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
    pub status: FineStatus,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// A borrower's fine ledger with aggregates
#[derive(Debug, Serialize, ToSchema)]
pub struct FinesLedger {
    pub fines: Vec<FineDetails>,
    pub total: Decimal,
    pub pending_total: Decimal,
}

/// Payload for paying or waiving a fine
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SettleFine {
    pub notes: Option<String>,
}
