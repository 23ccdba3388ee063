//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_quick_search_short_query_returns_empty() {
    let client = Client::new();

    // A single-character query must not hit the store at all; the
    // response is an empty list the caller uses to clear its display.
    let response = client
        .get(format!("{}/search/books?q=d", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["books"].as_array().expect("books array").len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_availability_unknown_book_is_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/999999/availability", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_settings_carry_the_fine_policy() {
    let client = Client::new();

    let response = client
        .get(format!("{}/settings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["daily_fine_rate"].is_string() || body["daily_fine_rate"].is_number());
    assert!(body["max_fine_days"].is_number());
    assert!(body["loan_period_days"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_register_borrower_with_bad_fields_reports_each_field() {
    let client = Client::new();

    let response = client
        .post(format!("{}/borrowers", BASE_URL))
        .json(&json!({
            "library_id": "  ",
            "first_name": "Ada",
            "last_name": "",
            "email": "not-an-email",
            "phone": "123"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    let fields = body["fields"].as_object().expect("fields map");
    assert!(fields.contains_key("library_id"));
    assert!(fields.contains_key("last_name"));
    assert!(fields.contains_key("email"));
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_malformed_isbn() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Test Book",
            "isbn": "123-456-78901",
            "category_id": 1,
            "author_ids": [],
            "publisher": "Test House",
            "publication_year": 2020,
            "pages": 100,
            "total_copies": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["fields"]["isbn"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_overdue_report_is_csv_with_quoted_cells() {
    let client = Client::new();

    let response = client
        .get(format!("{}/reports/overdue", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let body = response.text().await.expect("Failed to read body");
    let header = body.lines().next().expect("header row");
    assert!(header.starts_with("\"Borrower\""));
}

#[tokio::test]
#[ignore]
async fn test_report_rejects_inverted_date_range() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/reports/borrowings?start=2024-06-01&end=2024-01-01",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_stats_overview_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_books"].is_number());
    assert!(body["borrowed_now"].is_number());
    assert!(body["overdue_now"].is_number());
    assert!(body["popular_books"].is_array());
}
