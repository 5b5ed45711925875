//! Integration tests for Steer.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p steer-cli -- migrate site
//!
//! # Start the site
//! cargo run -p steer-site
//!
//! # Run integration tests (ignored by default)
//! cargo test -p steer-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`-gated because they need a running server and a
//! database; `SITE_BASE_URL` and `SITE_DATABASE_URL` point them at the
//! environment under test.

/// Base URL for the site (configurable via environment).
#[must_use]
pub fn site_base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Database URL for direct row assertions (configurable via environment).
#[must_use]
pub fn site_database_url() -> String {
    std::env::var("SITE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .unwrap_or_else(|_| "postgres://localhost/steer_site".to_string())
}

/// A client with a cookie store, so sessions persist across requests like
/// a browser.
#[must_use]
pub fn browser_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
