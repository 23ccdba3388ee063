//! Readify Library Management System
//!
//! A Rust implementation of the Readify library management server,
//! providing a REST JSON API for catalog browsing, the borrow/return
//! workflow, overdue fine assessment and reservations.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod fines;
pub mod format;
pub mod models;
pub mod repository;
pub mod search;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
