//! Authentication route handlers.
//!
//! Login, sign-up, logout, and emailed-token confirmation. Credentials
//! live with the hosted identity provider; these handlers exchange tokens
//! with it and keep the resulting identity in the server-side session.
//!
//! After any successful authentication the user is routed by the same
//! ordered rule the gated routes use: onboarding incomplete sends them to
//! the wizard, otherwise to the dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use steer_core::Email;

use crate::db::profiles::ProfileRepository;
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthSession, OAuthProvider, OtpType};
use crate::state::AppState;

/// Minimum password length accepted at sign-up.
const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Sign-up form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Query parameters for the emailed-token confirmation endpoint.
#[derive(Debug, Deserialize)]
pub struct ConfirmQuery {
    pub token_hash: Option<String>,
    #[serde(rename = "type")]
    pub otp_type: Option<String>,
    pub next: Option<String>,
}

/// Query parameter for the auth error page.
#[derive(Debug, Deserialize)]
pub struct AuthErrorQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub google_url: String,
    pub facebook_url: String,
}

/// Sign-up page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
}

/// "Check your email" page shown after sign-up.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup_sent.html")]
pub struct SignupSentTemplate {
    pub email: String,
}

/// Auth error page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/error.html")]
pub struct AuthErrorTemplate {
    pub message: String,
}

// =============================================================================
// Login
// =============================================================================

/// Display the login page.
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let confirm_url = format!("{}/auth/confirm", state.config().base_url);

    LoginTemplate {
        error: query.error.as_deref().map(login_error_message),
        success: query.success.as_deref().map(login_success_message),
        google_url: state
            .auth()
            .authorize_url(OAuthProvider::Google, &confirm_url),
        facebook_url: state
            .auth()
            .authorize_url(OAuthProvider::Facebook, &confirm_url),
    }
}

/// Map a login error code from the redirect query to a friendly message.
fn login_error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid email or password.".to_owned(),
        "session" => "Could not start your session. Please try again.".to_owned(),
        _ => "Something went wrong. Please try again.".to_owned(),
    }
}

/// Map a login success code from the redirect query to a friendly message.
fn login_success_message(code: &str) -> String {
    match code {
        "signed_out" => "You have been signed out.".to_owned(),
        _ => "Done.".to_owned(),
    }
}

/// Handle login form submission.
///
/// Exchanges the credentials for a provider session, stores the identity
/// in the server-side session, then routes by onboarding status.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth_session = match state
        .auth()
        .sign_in_with_password(form.email.trim(), &form.password)
        .await
    {
        Ok(auth_session) => auth_session,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login rejected");
            return Redirect::to("/login?error=credentials").into_response();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            return Redirect::to("/login?error=failed").into_response();
        }
    };

    match establish_session(&state, &session, auth_session).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Failed to establish session after login");
            Redirect::to("/login?error=session").into_response()
        }
    }
}

// =============================================================================
// Sign-up
// =============================================================================

/// Display the sign-up page.
pub async fn signup_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    SignupTemplate {
        error: query.error.as_deref().map(signup_error_message),
    }
}

/// Map a sign-up error code from the redirect query to a friendly message.
fn signup_error_message(code: &str) -> String {
    match code {
        "email" => "Please enter a valid email address.".to_owned(),
        "password_mismatch" => "Passwords do not match.".to_owned(),
        "password_too_short" => {
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters.")
        }
        "email_taken" => "An account with this email already exists.".to_owned(),
        _ => "Something went wrong. Please try again.".to_owned(),
    }
}

/// Handle sign-up form submission.
///
/// Creates the account with the identity provider, which emails a
/// confirmation token that lands on `/auth/confirm`.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    let email = form.email.trim();
    if Email::parse(email).is_err() {
        return Redirect::to("/sign-up?error=email").into_response();
    }

    // Validate passwords match
    if form.password != form.password_confirm {
        return Redirect::to("/sign-up?error=password_mismatch").into_response();
    }

    // Validate password length
    if form.password.len() < MIN_PASSWORD_LENGTH {
        return Redirect::to("/sign-up?error=password_too_short").into_response();
    }

    let confirm_url = format!("{}/auth/confirm", state.config().base_url);

    match state.auth().sign_up(email, &form.password, &confirm_url).await {
        Ok(()) => SignupSentTemplate {
            email: email.to_owned(),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Sign-up failed");
            let message = e.to_string().to_lowercase();
            if message.contains("already") || message.contains("registered") {
                Redirect::to("/sign-up?error=email_taken").into_response()
            } else {
                Redirect::to("/sign-up?error=failed").into_response()
            }
        }
    }
}

// =============================================================================
// Emailed-token confirmation
// =============================================================================

/// Consume an emailed one-time token.
///
/// On success the user is signed in and routed by onboarding status; on
/// failure the browser is sent to `/auth/error` with the provider's
/// message in the query string.
#[instrument(skip(state, session, query))]
pub async fn confirm(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ConfirmQuery>,
) -> Response {
    let (Some(token_hash), Some(raw_type)) = (query.token_hash, query.otp_type) else {
        return error_redirect("No token hash or type");
    };

    let Ok(otp_type) = raw_type.parse::<OtpType>() else {
        return error_redirect("Unknown token type");
    };

    let auth_session = match state.auth().verify_otp(&token_hash, otp_type).await {
        Ok(auth_session) => auth_session,
        Err(e) => {
            tracing::warn!(error = %e, "Token verification failed");
            return error_redirect(&e.to_string());
        }
    };

    match establish_session(&state, &session, auth_session).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Failed to establish session after verification");
            let next = query.next.unwrap_or_else(|| "/".to_owned());
            Redirect::to(&next).into_response()
        }
    }
}

/// Redirect to the auth error page with a message in the query string.
fn error_redirect(message: &str) -> Response {
    let target = format!("/auth/error?error={}", urlencoding::encode(message));
    Redirect::to(&target).into_response()
}

/// Display the auth error page.
pub async fn error_page(Query(query): Query<AuthErrorQuery>) -> impl IntoResponse {
    AuthErrorTemplate {
        message: query
            .error
            .unwrap_or_else(|| "An unexpected error occurred.".to_owned()),
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Revokes the provider token (best effort), clears the session, and
/// returns to the landing page. Linked from the dashboard header, so this
/// is a plain GET; the handler is idempotent.
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    if let Ok(Some(user)) = session
        .get::<CurrentUser>(crate::models::session_keys::CURRENT_USER)
        .await
    {
        // Revoke the provider token (best effort)
        if let Err(e) = state.auth().sign_out(&user.access_token).await {
            tracing::warn!(error = %e, "Failed to revoke provider token");
        }
    }

    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "Failed to flush session");
    }

    clear_sentry_user();

    Redirect::to("/").into_response()
}

// =============================================================================
// Shared session establishment
// =============================================================================

/// Store the authenticated identity in the session and route by
/// onboarding status: incomplete goes to the wizard, complete goes to the
/// dashboard. The same ordering every gated route enforces.
async fn establish_session(
    state: &AppState,
    session: &Session,
    auth_session: AuthSession,
) -> Result<Response, AppError> {
    let raw_email = auth_session.user.email.unwrap_or_default();
    let email = Email::parse(&raw_email)
        .map_err(|e| AppError::Internal(format!("provider returned invalid email: {e}")))?;

    let user = CurrentUser {
        id: auth_session.user.id,
        email,
        access_token: auth_session.access_token,
    };

    set_current_user(session, &user)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    set_sentry_user(&user.id, Some(user.email.as_str()));

    let completed = ProfileRepository::new(state.pool())
        .has_completed_onboarding(user.id)
        .await?;

    let response = if completed {
        Redirect::to("/home").into_response()
    } else {
        Redirect::to("/onboarding").into_response()
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_messages() {
        assert_eq!(login_error_message("credentials"), "Invalid email or password.");
        assert_eq!(
            login_error_message("anything-else"),
            "Something went wrong. Please try again."
        );
    }

    #[test]
    fn test_signup_error_messages() {
        assert_eq!(signup_error_message("password_mismatch"), "Passwords do not match.");
        assert!(signup_error_message("password_too_short").contains('8'));
    }
}
