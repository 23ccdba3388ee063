//! Circulation settings endpoints.
//!
//! The fine rate and cap are served from here; clients display these
//! values rather than carrying their own copy.

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::settings::{CirculationSettings, UpdateCirculationSettings},
};

/// Get the circulation policy
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Current circulation policy", body = CirculationSettings)
    )
)]
pub async fn get_settings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<CirculationSettings>> {
    let settings = state.services.settings.get_settings().await?;
    Ok(Json(settings))
}

/// Update the circulation policy
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    request_body = UpdateCirculationSettings,
    responses(
        (status = 200, description = "Policy updated", body = CirculationSettings),
        (status = 400, description = "Invalid policy values")
    )
)]
pub async fn update_settings(
    State(state): State<crate::AppState>,
    Json(update): Json<UpdateCirculationSettings>,
) -> AppResult<Json<CirculationSettings>> {
    update.validate()?;

    let settings = state.services.settings.update_settings(update).await?;
    Ok(Json(settings))
}
