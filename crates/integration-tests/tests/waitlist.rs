//! Integration tests for the waitlist intake flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The site running (cargo run -p steer-site)
//!
//! Run with: cargo test -p steer-integration-tests -- --ignored

use reqwest::StatusCode;
use sqlx::PgPool;

use steer_core::SignupRole;
use steer_integration_tests::{browser_client, site_base_url, site_database_url};

/// Pull the one-time form token out of the rendered landing page.
fn extract_form_token(body: &str) -> String {
    let marker = "name=\"form_token\" value=\"";
    let start = body.find(marker).expect("form token not in page") + marker.len();
    let rest = body.get(start..).expect("form token truncated");
    let end = rest.find('"').expect("form token unterminated");
    rest.get(..end).expect("form token malformed").to_string()
}

/// Count waitlist rows for an email directly in the database.
async fn count_entries(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM waitlist_entries WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .expect("count query failed")
}

#[tokio::test]
#[ignore = "Requires running site server"]
async fn test_health() {
    let client = browser_client();
    let resp = client
        .get(format!("{}/health", site_base_url()))
        .send()
        .await
        .expect("health request failed");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_invalid_email_is_rejected_without_insert() {
    let client = browser_client();
    let base_url = site_base_url();
    let pool = PgPool::connect(&site_database_url())
        .await
        .expect("database connection failed");

    let page = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("landing request failed")
        .text()
        .await
        .expect("landing body unreadable");
    let token = extract_form_token(&page);

    let email = "not-an-email";
    let resp = client
        .post(format!("{base_url}/waitlist"))
        .form(&[
            ("form_token", token.as_str()),
            ("name", "Test Person"),
            ("email", email),
            ("zip_code", "78701"),
            ("role", "customer"),
            ("monthly_beef_pounds", "10"),
        ])
        .send()
        .await
        .expect("waitlist post failed");

    let body = resp.text().await.expect("response body unreadable");
    assert!(body.contains("Please enter a valid email address."));
    assert_eq!(count_entries(&pool, email).await, 0);
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_farmer_signup_persists_one_row() {
    let client = browser_client();
    let base_url = site_base_url();
    let pool = PgPool::connect(&site_database_url())
        .await
        .expect("database connection failed");

    let email = format!("farmer-{}@integration.test", uuid::Uuid::new_v4());

    let page = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("landing request failed")
        .text()
        .await
        .expect("landing body unreadable");
    let token = extract_form_token(&page);

    let resp = client
        .post(format!("{base_url}/waitlist"))
        .form(&[
            ("form_token", token.as_str()),
            ("name", "Mike Peterson"),
            ("email", email.as_str()),
            ("zip_code", "78701-1234"),
            ("role", "farmer"),
            ("monthly_cattle_sold", "5"),
        ])
        .send()
        .await
        .expect("waitlist post failed");

    let body = resp.text().await.expect("response body unreadable");
    let expected = format!("waitlist as a {}", SignupRole::Farmer);
    assert!(body.contains(&expected), "missing confirmation: {expected}");

    assert_eq!(count_entries(&pool, &email).await, 1);

    // The customer-side count must never be present on a farmer row
    let beef_pounds: Option<i64> = sqlx::query_scalar(
        "SELECT monthly_beef_pounds FROM waitlist_entries WHERE email = $1",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .expect("row lookup failed");
    assert_eq!(beef_pounds, None);
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_double_submit_inserts_exactly_once() {
    let client = browser_client();
    let base_url = site_base_url();
    let pool = PgPool::connect(&site_database_url())
        .await
        .expect("database connection failed");

    let email = format!("double-{}@integration.test", uuid::Uuid::new_v4());

    let page = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("landing request failed")
        .text()
        .await
        .expect("landing body unreadable");
    let token = extract_form_token(&page);

    let form = [
        ("form_token", token.as_str()),
        ("name", "Rapid Clicker"),
        ("email", email.as_str()),
        ("zip_code", "78701"),
        ("role", "customer"),
        ("monthly_beef_pounds", "12"),
    ];

    // Two rapid submissions with the same one-time token; the second
    // finds the token already consumed and must not insert
    let first = client
        .post(format!("{base_url}/waitlist"))
        .form(&form)
        .send()
        .await
        .expect("first submission failed");
    assert!(first.status().is_success());

    let second = client
        .post(format!("{base_url}/waitlist"))
        .form(&form)
        .send()
        .await
        .expect("second submission failed");
    assert!(second.status().is_success());

    assert_eq!(count_entries(&pool, &email).await, 1);
}
