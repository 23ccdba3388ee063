//! Borrowing (loan) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        borrowing::{Borrowing, BorrowingDetails, CreateBorrowing},
        fine::Fine,
    },
};

/// Borrow response with the calculated due date
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    /// Borrowing ID
    pub id: i32,
    /// Due date (ISO 8601 format)
    pub due_date: DateTime<Utc>,
    /// Status message
    pub message: String,
}

/// Return response with the closed loan and any assessed fine
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    /// The closed borrowing record
    pub borrowing: Borrowing,
    /// Fine assessed for an overdue return
    pub fine: Option<Fine>,
    /// Status message
    pub message: String,
}

/// Borrow a book.
///
/// Availability is re-validated server-side under a lock: a book lent out
/// between the caller's gate check and this commit is rejected with a
/// conflict naming the book, never double-lent.
#[utoipa::path(
    post,
    path = "/borrowings",
    tag = "borrowings",
    request_body = CreateBorrowing,
    responses(
        (status = 201, description = "Book borrowed", body = BorrowResponse),
        (status = 404, description = "Book or borrower not found"),
        (status = 409, description = "Book no longer available"),
        (status = 422, description = "Borrow limit reached or borrower inactive")
    )
)]
pub async fn create_borrowing(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBorrowing>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let borrowing = state.services.circulation.borrow(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            id: borrowing.id,
            due_date: borrowing.due_date,
            message: "Book borrowed successfully".to_string(),
        }),
    ))
}

/// Get a borrowing with its projected fine
#[utoipa::path(
    get,
    path = "/borrowings/{id}",
    tag = "borrowings",
    params(
        ("id" = i32, Path, description = "Borrowing ID")
    ),
    responses(
        (status = 200, description = "Borrowing details", body = BorrowingDetails),
        (status = 404, description = "Borrowing not found")
    )
)]
pub async fn get_borrowing(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowingDetails>> {
    let borrowing = state.services.circulation.get_borrowing(id).await?;
    Ok(Json(borrowing))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/borrowings/{id}/return",
    tag = "borrowings",
    params(
        ("id" = i32, Path, description = "Borrowing ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 404, description = "Borrowing not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn return_borrowing(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ReturnResponse>> {
    let outcome = state.services.circulation.return_loan(id).await?;

    let message = match outcome.fine {
        Some(ref fine) => format!(
            "Returned \"{}\" with a fine of {}",
            outcome.book_title, fine.amount
        ),
        None => format!("Returned \"{}\"", outcome.book_title),
    };

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        borrowing: outcome.borrowing,
        fine: outcome.fine,
        message,
    }))
}
