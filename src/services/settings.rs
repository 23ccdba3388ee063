//! Circulation settings service

use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::settings::{CirculationSettings, UpdateCirculationSettings},
    repository::Repository,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get the current circulation policy
    pub async fn get_settings(&self) -> AppResult<CirculationSettings> {
        self.repository.settings.get().await
    }

    /// Update the circulation policy
    pub async fn update_settings(
        &self,
        update: UpdateCirculationSettings,
    ) -> AppResult<CirculationSettings> {
        if let Some(rate) = update.daily_fine_rate {
            if rate < Decimal::ZERO {
                return Err(AppError::Validation(
                    "Daily fine rate cannot be negative".to_string(),
                ));
            }
        }
        let settings = self.repository.settings.update(&update).await?;
        tracing::info!(
            "Settings: circulation policy updated (rate {}, cap {} days)",
            settings.daily_fine_rate,
            settings.max_fine_days
        );
        Ok(settings)
    }
}
