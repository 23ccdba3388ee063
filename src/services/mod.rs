//! Business logic services

pub mod borrowers;
pub mod catalog;
pub mod circulation;
pub mod fines;
pub mod reports;
pub mod reservations;
pub mod settings;
pub mod stats;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub borrowers: borrowers::BorrowersService,
    pub catalog: catalog::CatalogService,
    pub circulation: circulation::CirculationService,
    pub fines: fines::FinesService,
    pub reservations: reservations::ReservationsService,
    pub settings: settings::SettingsService,
    pub stats: stats::StatsService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            borrowers: borrowers::BorrowersService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            circulation: circulation::CirculationService::new(repository.clone()),
            fines: fines::FinesService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository.clone()),
            settings: settings::SettingsService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            reports: reports::ReportsService::new(repository),
        }
    }
}
