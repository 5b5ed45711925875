//! Waitlist submission route handler.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::waitlist::WaitlistRepository;
use crate::error::AppError;
use crate::forms::WaitlistForm;
use crate::middleware::OptionalAuth;
use crate::models::session_keys;
use crate::routes::landing::{WaitlistView, landing_page};
use crate::routes::{issue_form_token, take_form_token};
use crate::state::AppState;

/// Handle a waitlist form submission.
///
/// The one-time form token is taken before any other work: a second rapid
/// submission finds no token and performs no insert, so duplicate clicks
/// while the first write is in flight result in exactly one row.
///
/// On validation failure the page re-renders with inline errors and every
/// posted value preserved. On store failure a generic notice is shown and
/// the form stays editable with a fresh token. On success the form flips
/// into its terminal submitted state, confirming the selected role.
#[instrument(skip(state, user, session, form), fields(role = %form.selected_role()))]
pub async fn submit(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Form(form): Form<WaitlistForm>,
) -> Result<Response, AppError> {
    let signed_in = user.is_some();

    let fresh = take_form_token(&session, session_keys::WAITLIST_FORM_TOKEN, &form.form_token)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    if !fresh {
        // Token already consumed (double submit) or never issued (stale
        // page). Either way: no insert.
        tracing::info!("Ignoring duplicate or stale waitlist submission");
        return Ok(
            landing_page(WaitlistView::submitted(form.selected_role()), signed_in)
                .into_response(),
        );
    }

    let form = form.sanitized();

    let entry = match form.validate() {
        Ok(entry) => entry,
        Err(errors) => {
            let form_token = reissue_token(&session).await?;
            return Ok(landing_page(
                WaitlistView::with_errors(form, errors, form_token),
                signed_in,
            )
            .into_response());
        }
    };

    match WaitlistRepository::new(state.pool()).insert(&entry).await {
        Ok(id) => {
            tracing::info!(entry_id = %id, role = %entry.role(), "Waitlist signup recorded");
            Ok(landing_page(WaitlistView::submitted(entry.role()), signed_in).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Waitlist insert failed");
            let form_token = reissue_token(&session).await?;
            Ok(landing_page(WaitlistView::failed(form, form_token), signed_in).into_response())
        }
    }
}

/// Re-issue a form token after a failed submission so the user can retry.
async fn reissue_token(session: &Session) -> Result<String, AppError> {
    issue_form_token(session, session_keys::WAITLIST_FORM_TOKEN)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))
}
