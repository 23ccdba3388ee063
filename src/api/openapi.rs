//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrowers, borrowings, fines, health, reports, reservations, settings, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Readify API",
        version = "1.0.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::quick_search,
        books::get_book,
        books::check_availability,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::list_categories,
        books::list_authors,
        // Borrowers
        borrowers::list_borrowers,
        borrowers::register_borrower,
        borrowers::get_borrower,
        borrowers::update_borrower,
        borrowers::list_borrowings,
        borrowers::list_fines,
        borrowers::list_reservations,
        // Borrowings
        borrowings::create_borrowing,
        borrowings::get_borrowing,
        borrowings::return_borrowing,
        // Fines
        fines::pay_fine,
        fines::waive_fine,
        // Reservations
        reservations::create_reservation,
        reservations::cancel_reservation,
        // Stats
        stats::get_stats,
        // Reports
        reports::get_report,
        // Settings
        settings::get_settings,
        settings::update_settings,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::BookDetails,
            crate::models::book::BookHit,
            crate::models::book::BookInput,
            crate::models::book::BookStatus,
            crate::models::author::Author,
            crate::models::category::Category,
            books::AvailabilityResponse,
            books::QuickSearchResponse,
            // Borrowers
            crate::models::borrower::Borrower,
            crate::models::borrower::CreateBorrower,
            crate::models::borrower::UpdateBorrower,
            // Borrowings
            crate::models::borrowing::Borrowing,
            crate::models::borrowing::BorrowingDetails,
            crate::models::borrowing::CreateBorrowing,
            borrowings::BorrowResponse,
            borrowings::ReturnResponse,
            // Fines
            crate::models::fine::Fine,
            crate::models::fine::FineDetails,
            crate::models::fine::FineStatus,
            crate::models::fine::FinesLedger,
            crate::models::fine::SettleFine,
            // Reservations
            crate::models::reservation::Reservation,
            crate::models::reservation::ReservationDetails,
            crate::models::reservation::ReservationStatus,
            crate::models::reservation::CreateReservation,
            // Stats
            stats::StatsResponse,
            stats::PopularBook,
            stats::RecentBorrowing,
            // Settings
            crate::models::settings::CirculationSettings,
            crate::models::settings::UpdateCirculationSettings,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog browsing and maintenance"),
        (name = "borrowers", description = "Borrower accounts"),
        (name = "borrowings", description = "Borrow/return workflow"),
        (name = "fines", description = "Fine settlement"),
        (name = "reservations", description = "Book reservations"),
        (name = "stats", description = "Statistics"),
        (name = "reports", description = "CSV reports"),
        (name = "settings", description = "Circulation policy")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
