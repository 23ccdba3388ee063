//! CSV report endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::AppResult, services::reports::ReportKind};

#[derive(Deserialize, IntoParams)]
pub struct ReportParams {
    /// Inclusive range start (YYYY-MM-DD)
    pub start: Option<NaiveDate>,
    /// Inclusive range end (YYYY-MM-DD)
    pub end: Option<NaiveDate>,
}

/// Download a report as CSV.
///
/// Kinds: `borrowings`, `overdue`, `fines`, `popular`.
#[utoipa::path(
    get,
    path = "/reports/{kind}",
    tag = "reports",
    params(
        ("kind" = String, Path, description = "Report kind: borrowings, overdue, fines or popular"),
        ReportParams
    ),
    responses(
        (status = 200, description = "CSV report", content_type = "text/csv"),
        (status = 400, description = "Invalid report kind or date range")
    )
)]
pub async fn get_report(
    State(state): State<crate::AppState>,
    Path(kind): Path<ReportKind>,
    Query(params): Query<ReportParams>,
) -> AppResult<Response> {
    let table = state
        .services
        .reports
        .build(kind, params.start, params.end)
        .await?;

    let filename = format!("{}-report.csv", format!("{:?}", kind).to_lowercase());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        table.to_csv(),
    )
        .into_response())
}
