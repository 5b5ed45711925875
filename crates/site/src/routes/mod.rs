//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Landing page (marketing + waitlist form)
//! POST /waitlist            - Waitlist submission
//! GET  /health              - Health check
//!
//! # Auth
//! GET  /login               - Login page
//! POST /login               - Password sign-in
//! GET  /sign-up             - Sign-up page
//! POST /sign-up             - Create account
//! GET  /logout              - Sign out
//! GET  /auth/confirm        - Emailed-token verification
//! GET  /auth/error          - Auth error display
//!
//! # Onboarding wizard (requires auth)
//! GET  /onboarding          - Current wizard step
//! POST /onboarding/address  - Step 1: delivery address
//! POST /onboarding          - Step 2: preferences + final submit
//!
//! # Member area (requires auth + completed onboarding)
//! GET  /home                - Dashboard
//! GET  /protected           - Minimal gated page
//! ```

pub mod auth;
pub mod home;
pub mod landing;
pub mod onboarding;
pub mod waitlist;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/confirm", get(auth::confirm))
        .route("/error", get(auth::error_page))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page + waitlist
        .route("/", get(landing::index))
        .route("/waitlist", post(waitlist::submit))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/sign-up", get(auth::signup_page).post(auth::signup))
        .route("/logout", get(auth::logout))
        .nest("/auth", auth_routes())
        // Onboarding wizard
        .route(
            "/onboarding",
            get(onboarding::show).post(onboarding::complete),
        )
        .route("/onboarding/address", post(onboarding::save_address))
        // Member area
        .route("/home", get(home::dashboard))
        .route("/protected", get(home::protected))
}

// =============================================================================
// One-time form tokens
// =============================================================================

/// Issue a one-time form token and store it in the session under `key`.
///
/// Rendering a form issues a token; submitting takes it. One render, one
/// effective submit.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn issue_form_token(
    session: &Session,
    key: &str,
) -> Result<String, tower_sessions::session::Error> {
    let token = format!("{:032x}", rand::random::<u128>());
    session.insert(key, token.clone()).await?;
    Ok(token)
}

/// Take (remove) the stored form token and compare it with the submitted
/// one. Returns `true` only when a token was stored and matches; the
/// stored token is gone either way, so a concurrent second submit can
/// never also return `true`.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn take_form_token(
    session: &Session,
    key: &str,
    submitted: &str,
) -> Result<bool, tower_sessions::session::Error> {
    let stored: Option<String> = session.remove(key).await?;
    Ok(stored.is_some_and(|token| !submitted.is_empty() && token == submitted))
}
