//! Borrower account endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        borrower::{Borrower, CreateBorrower, UpdateBorrower},
        borrowing::BorrowingDetails,
        fine::FinesLedger,
        reservation::ReservationDetails,
    },
};

use super::books::PaginatedResponse;

#[derive(Deserialize, IntoParams)]
pub struct ListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// List borrowers
#[utoipa::path(
    get,
    path = "/borrowers",
    tag = "borrowers",
    params(ListParams),
    responses(
        (status = 200, description = "List of borrowers", body = PaginatedResponse<Borrower>)
    )
)]
pub async fn list_borrowers(
    State(state): State<crate::AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<PaginatedResponse<Borrower>>> {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(20);
    let (items, total) = state.services.borrowers.list(page, per_page).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page,
    }))
}

/// Register a borrower
#[utoipa::path(
    post,
    path = "/borrowers",
    tag = "borrowers",
    request_body = CreateBorrower,
    responses(
        (status = 201, description = "Borrower registered", body = Borrower),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Library ID or email already in use")
    )
)]
pub async fn register_borrower(
    State(state): State<crate::AppState>,
    Json(input): Json<CreateBorrower>,
) -> AppResult<(StatusCode, Json<Borrower>)> {
    input.validate()?;

    let borrower = state.services.borrowers.register(input).await?;
    Ok((StatusCode::CREATED, Json(borrower)))
}

/// Get borrower profile
#[utoipa::path(
    get,
    path = "/borrowers/{id}",
    tag = "borrowers",
    params(
        ("id" = i32, Path, description = "Borrower ID")
    ),
    responses(
        (status = 200, description = "Borrower profile", body = Borrower),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn get_borrower(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Borrower>> {
    let borrower = state.services.borrowers.get(id).await?;
    Ok(Json(borrower))
}

/// Update borrower profile
#[utoipa::path(
    put,
    path = "/borrowers/{id}",
    tag = "borrowers",
    params(
        ("id" = i32, Path, description = "Borrower ID")
    ),
    request_body = UpdateBorrower,
    responses(
        (status = 200, description = "Profile updated", body = Borrower),
        (status = 404, description = "Borrower not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_borrower(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateBorrower>,
) -> AppResult<Json<Borrower>> {
    input.validate()?;

    let borrower = state.services.borrowers.update(id, input).await?;
    Ok(Json(borrower))
}

/// A borrower's loans, current and past, with projected fines
#[utoipa::path(
    get,
    path = "/borrowers/{id}/borrowings",
    tag = "borrowers",
    params(
        ("id" = i32, Path, description = "Borrower ID")
    ),
    responses(
        (status = 200, description = "Borrowings, newest first", body = Vec<BorrowingDetails>),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn list_borrowings(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<BorrowingDetails>>> {
    let borrowings = state.services.circulation.borrowings_for(id).await?;
    Ok(Json(borrowings))
}

/// A borrower's fine ledger
#[utoipa::path(
    get,
    path = "/borrowers/{id}/fines",
    tag = "borrowers",
    params(
        ("id" = i32, Path, description = "Borrower ID")
    ),
    responses(
        (status = 200, description = "Fine ledger with totals", body = FinesLedger),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn list_fines(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<FinesLedger>> {
    let ledger = state.services.fines.ledger_for(id).await?;
    Ok(Json(ledger))
}

/// A borrower's reservations
#[utoipa::path(
    get,
    path = "/borrowers/{id}/reservations",
    tag = "borrowers",
    params(
        ("id" = i32, Path, description = "Borrower ID")
    ),
    responses(
        (status = 200, description = "Reservations, newest first", body = Vec<ReservationDetails>),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<ReservationDetails>>> {
    let reservations = state.services.reservations.reservations_for(id).await?;
    Ok(Json(reservations))
}
