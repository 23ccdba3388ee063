//! Repository layer for database operations

pub mod books;
pub mod borrowers;
pub mod borrowings;
pub mod fines;
pub mod reservations;
pub mod settings;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub borrowers: borrowers::BorrowersRepository,
    pub borrowings: borrowings::BorrowingsRepository,
    pub fines: fines::FinesRepository,
    pub reservations: reservations::ReservationsRepository,
    pub settings: settings::SettingsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            borrowers: borrowers::BorrowersRepository::new(pool.clone()),
            borrowings: borrowings::BorrowingsRepository::new(pool.clone()),
            fines: fines::FinesRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            settings: settings::SettingsRepository::new(pool.clone()),
            pool,
        }
    }
}
