//! The gated-route guard.
//!
//! Every member route applies the same ordered checks before rendering:
//!
//! 1. A signed-in user exists in the session, otherwise redirect to
//!    `/login`.
//! 2. That user has completed onboarding, otherwise redirect to
//!    `/onboarding`.
//!
//! Expressing the sequence as one extractor keeps the ordering identical
//! on every gated route; a handler cannot accidentally skip a step.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::db::profiles::ProfileRepository;
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Extractor that requires a signed-in user with completed onboarding.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(
///     RequireOnboarded(user): RequireOnboarded,
/// ) -> impl IntoResponse {
///     format!("Welcome back, {}!", user.email)
/// }
/// ```
pub struct RequireOnboarded(pub CurrentUser);

/// Outcomes of the guard that stop the request before the handler runs.
pub enum GuardRejection {
    /// Nobody is signed in.
    RedirectToLogin,
    /// Signed in, but the onboarding wizard has not finished.
    RedirectToOnboarding,
    /// No session layer present.
    Unauthorized,
    /// The onboarding lookup itself failed.
    Internal,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::RedirectToOnboarding => Redirect::to("/onboarding").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireOnboarded {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(GuardRejection::Unauthorized)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(GuardRejection::RedirectToLogin)?;

        let completed = ProfileRepository::new(state.pool())
            .has_completed_onboarding(user.id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user.id, "Onboarding lookup failed");
                GuardRejection::Internal
            })?;

        if !completed {
            return Err(GuardRejection::RedirectToOnboarding);
        }

        Ok(Self(user))
    }
}
