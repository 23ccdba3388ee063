//! Fine settlement endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::fine::{Fine, SettleFine},
};

/// Pay a pending fine
#[utoipa::path(
    post,
    path = "/fines/{id}/pay",
    tag = "fines",
    params(
        ("id" = i32, Path, description = "Fine ID")
    ),
    request_body = SettleFine,
    responses(
        (status = 200, description = "Fine paid", body = Fine),
        (status = 404, description = "Fine not found"),
        (status = 409, description = "Fine already settled")
    )
)]
pub async fn pay_fine(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    body: Option<Json<SettleFine>>,
) -> AppResult<Json<Fine>> {
    let notes = body.and_then(|Json(b)| b.notes);
    let fine = state.services.fines.pay(id, notes).await?;
    Ok(Json(fine))
}

/// Waive a pending fine
#[utoipa::path(
    post,
    path = "/fines/{id}/waive",
    tag = "fines",
    params(
        ("id" = i32, Path, description = "Fine ID")
    ),
    request_body = SettleFine,
    responses(
        (status = 200, description = "Fine waived", body = Fine),
        (status = 404, description = "Fine not found"),
        (status = 409, description = "Fine already settled")
    )
)]
pub async fn waive_fine(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    body: Option<Json<SettleFine>>,
) -> AppResult<Json<Fine>> {
    let notes = body.and_then(|Json(b)| b.notes);
    let fine = state.services.fines.waive(id, notes).await?;
    Ok(Json(fine))
}
