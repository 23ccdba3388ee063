//! Statistics endpoints

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Library overview statistics
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub total_books: i64,
    /// Active members
    pub total_borrowers: i64,
    /// Loans currently outstanding
    pub borrowed_now: i64,
    /// Outstanding loans past their due date
    pub overdue_now: i64,
    /// Sum of unpaid fines
    pub pending_fines: Decimal,
    pub popular_books: Vec<PopularBook>,
    pub recent_borrowings: Vec<RecentBorrowing>,
}

#[derive(Serialize, ToSchema)]
pub struct PopularBook {
    pub id: i32,
    pub title: String,
    pub borrow_count: i64,
}

#[derive(Serialize, ToSchema)]
pub struct RecentBorrowing {
    pub id: i32,
    pub book_title: String,
    pub borrower_name: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned: bool,
}

/// Get library overview statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Library statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.overview().await?;
    Ok(Json(stats))
}
