//! Circulation settings repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::settings::{CirculationSettings, UpdateCirculationSettings},
};

const SETTINGS_COLUMNS: &str =
    "loan_period_days, max_books_allowed, daily_fine_rate, max_fine_days, reservation_period_days";

#[derive(Clone)]
pub struct SettingsRepository {
    pool: Pool<Postgres>,
}

impl SettingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// The policy row is seeded by the migrations and never deleted.
    pub async fn get(&self) -> AppResult<CirculationSettings> {
        let settings = sqlx::query_as::<_, CirculationSettings>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM circulation_settings WHERE id = 1"
        ))
        .fetch_one(&self.pool)
        .await?;
        Ok(settings)
    }

    pub async fn update(
        &self,
        update: &UpdateCirculationSettings,
    ) -> AppResult<CirculationSettings> {
        let settings = sqlx::query_as::<_, CirculationSettings>(&format!(
            r#"
            UPDATE circulation_settings SET
                loan_period_days = COALESCE($1, loan_period_days),
                max_books_allowed = COALESCE($2, max_books_allowed),
                daily_fine_rate = COALESCE($3, daily_fine_rate),
                max_fine_days = COALESCE($4, max_fine_days),
                reservation_period_days = COALESCE($5, reservation_period_days)
            WHERE id = 1
            RETURNING {SETTINGS_COLUMNS}
            "#
        ))
        .bind(update.loan_period_days)
        .bind(update.max_books_allowed)
        .bind(update.daily_fine_rate)
        .bind(update.max_fine_days)
        .bind(update.reservation_period_days)
        .fetch_one(&self.pool)
        .await?;
        Ok(settings)
    }
}
