//! API handlers for Readify REST endpoints

pub mod books;
pub mod borrowers;
pub mod borrowings;
pub mod fines;
pub mod health;
pub mod openapi;
pub mod reports;
pub mod reservations;
pub mod settings;
pub mod stats;
