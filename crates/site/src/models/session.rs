//! Session-related types.
//!
//! Types stored in the session for authentication and wizard state.

use serde::{Deserialize, Serialize};

use steer_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user and
/// talk to the identity provider on their behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Provider-issued identity.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Provider access token; sessions are server-side, so this never
    /// reaches the browser.
    pub access_token: String,
}

/// Session keys for authentication and form state.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the onboarding wizard's retained step-1 address.
    pub const ONBOARDING_ADDRESS: &str = "onboarding_address";

    /// One-time token guarding the waitlist form against double submission.
    pub const WAITLIST_FORM_TOKEN: &str = "waitlist_form_token";

    /// One-time token guarding the onboarding submit against double submission.
    pub const ONBOARDING_FORM_TOKEN: &str = "onboarding_form_token";
}
