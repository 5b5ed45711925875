//! Onboarding wizard route handlers.
//!
//! A two-step state machine over the session:
//!
//! ```text
//! address step ──validated──> preferences step ──validated submit──> /home
//!      ^                            │
//!      └──────── back / failure ────┘
//! ```
//!
//! Step-1 values are retained in the session between steps; nothing is
//! written to the database until the final submit, which upserts the
//! profile and preferences in a single transaction.

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

use crate::db::profiles::ProfileRepository;
use crate::error::AppError;
use crate::filters;
use crate::forms::{AddressForm, FieldErrors, PreferencesForm};
use crate::middleware::RequireAuth;
use crate::models::{DeliveryAddress, session_keys};
use crate::routes::{issue_form_token, take_form_token};
use crate::state::AppState;

// =============================================================================
// Query & Templates
// =============================================================================

/// Query parameters for the wizard page.
#[derive(Debug, Deserialize)]
pub struct WizardQuery {
    /// `address` forces step 1 (the "Back" link from step 2).
    pub step: Option<String>,
}

/// Step-1 (delivery address) template.
#[derive(Template, WebTemplate)]
#[template(path = "onboarding/address.html")]
pub struct AddressTemplate {
    pub form: AddressForm,
    pub errors: FieldErrors,
}

/// Step-2 (preferences) template.
#[derive(Template, WebTemplate)]
#[template(path = "onboarding/preferences.html")]
pub struct PreferencesTemplate {
    pub form: PreferencesForm,
    pub errors: FieldErrors,
    pub notice: Option<String>,
    pub form_token: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the wizard.
///
/// Entry guard: no session redirects to `/login` (via `RequireAuth`);
/// already-onboarded users are sent straight to the dashboard. Otherwise
/// the session decides which step renders: no retained address means step
/// 1, a retained address means step 2.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Query(query): Query<WizardQuery>,
) -> Result<Response, AppError> {
    let completed = ProfileRepository::new(state.pool())
        .has_completed_onboarding(user.id)
        .await?;
    if completed {
        return Ok(Redirect::to("/home").into_response());
    }

    let retained: Option<DeliveryAddress> = session
        .get(session_keys::ONBOARDING_ADDRESS)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    let back_to_address = query.step.as_deref() == Some("address");

    match retained {
        Some(_) if !back_to_address => {
            let form_token = issue_form_token(&session, session_keys::ONBOARDING_FORM_TOKEN)
                .await
                .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

            Ok(PreferencesTemplate {
                form: PreferencesForm::default(),
                errors: FieldErrors::new(),
                notice: None,
                form_token,
            }
            .into_response())
        }
        Some(address) => Ok(AddressTemplate {
            form: AddressForm::from_address(&address),
            errors: FieldErrors::new(),
        }
        .into_response()),
        None => Ok(AddressTemplate {
            form: AddressForm::default(),
            errors: FieldErrors::new(),
        }
        .into_response()),
    }
}

/// Handle the step-1 (address) submission.
///
/// On success the address is retained in the session and the wizard
/// advances; no database write happens here.
#[instrument(skip(state, user, session, form), fields(user_id = %user.id))]
pub async fn save_address(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<AddressForm>,
) -> Result<Response, AppError> {
    let completed = ProfileRepository::new(state.pool())
        .has_completed_onboarding(user.id)
        .await?;
    if completed {
        return Ok(Redirect::to("/home").into_response());
    }

    let form = form.sanitized();

    match form.validate() {
        Ok(address) => {
            session
                .insert(session_keys::ONBOARDING_ADDRESS, &address)
                .await
                .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

            Ok(Redirect::to("/onboarding").into_response())
        }
        Err(errors) => Ok(AddressTemplate { form, errors }.into_response()),
    }
}

/// Handle the final wizard submission.
///
/// Validates the preferences, combines them with the retained address,
/// and writes both records in one transaction with
/// `onboarding_completed = TRUE`. Any failure keeps the wizard on the
/// preferences step with the error surfaced and the submission retryable;
/// there is no partial-completion state.
#[instrument(skip(state, user, session, form), fields(user_id = %user.id))]
pub async fn complete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<PreferencesForm>,
) -> Result<Response, AppError> {
    let repo = ProfileRepository::new(state.pool());

    if repo.has_completed_onboarding(user.id).await? {
        return Ok(Redirect::to("/home").into_response());
    }

    let fresh = take_form_token(&session, session_keys::ONBOARDING_FORM_TOKEN, &form.form_token)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    if !fresh {
        // Double submit or stale page; the wizard view re-routes correctly
        // (to /home if the first submit already landed).
        tracing::info!("Ignoring duplicate or stale onboarding submission");
        return Ok(Redirect::to("/onboarding").into_response());
    }

    let Some(address): Option<DeliveryAddress> = session
        .get(session_keys::ONBOARDING_ADDRESS)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?
    else {
        // Step 1 never happened in this session; start there.
        return Ok(Redirect::to("/onboarding").into_response());
    };

    let prefs = match form.validate(user.id) {
        Ok(prefs) => prefs,
        Err(errors) => {
            let form_token = reissue_token(&session).await?;
            return Ok(PreferencesTemplate {
                form,
                errors,
                notice: None,
                form_token,
            }
            .into_response());
        }
    };

    if let Err(e) = repo.complete_onboarding(&address, &prefs).await {
        tracing::error!(error = %e, user_id = %user.id, "Onboarding write failed");
        let form_token = reissue_token(&session).await?;
        return Ok(PreferencesTemplate {
            form,
            errors: FieldErrors::new(),
            notice: Some("Failed to complete onboarding. Please try again.".to_owned()),
            form_token,
        }
        .into_response());
    }

    tracing::info!(user_id = %user.id, "Onboarding completed");

    // The wizard is done; drop its retained state.
    if let Err(e) = session
        .remove::<DeliveryAddress>(session_keys::ONBOARDING_ADDRESS)
        .await
    {
        tracing::warn!(error = %e, "Failed to clear wizard state");
    }

    Ok(Redirect::to("/home").into_response())
}

/// Re-issue the submit token after a failed attempt so the user can retry.
async fn reissue_token(session: &Session) -> Result<String, AppError> {
    issue_form_token(session, session_keys::ONBOARDING_FORM_TOKEN)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))
}
