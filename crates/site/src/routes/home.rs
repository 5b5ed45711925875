//! Member dashboard and minimal gated page.
//!
//! Both routes apply the full gated-route guard: signed in, onboarding
//! complete.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::profiles::ProfileRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireOnboarded;
use crate::models::{Preferences, Profile};
use crate::routes::landing::{FeaturedProduct, featured_products};
use crate::state::AppState;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Short greeting name (the email's local part).
    pub greeting_name: String,
    /// Saved delivery address, if the profile row exists.
    pub profile: Option<Profile>,
    /// Saved delivery preferences, if the row exists.
    pub preferences: Option<Preferences>,
    /// Display names of the preferred cuts.
    pub preferred_cuts: Vec<&'static str>,
    /// Featured product cards, shared with the landing page.
    pub products: Vec<FeaturedProduct>,
}

/// Minimal gated page template.
#[derive(Template, WebTemplate)]
#[template(path = "protected.html")]
pub struct ProtectedTemplate {
    pub email: String,
}

/// Display the member dashboard.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireOnboarded(user): RequireOnboarded,
) -> Result<HomeTemplate, AppError> {
    let repo = ProfileRepository::new(state.pool());

    let profile = repo.get(user.id).await?;
    let preferences = repo.get_preferences(user.id).await?;

    let preferred_cuts = preferences
        .as_ref()
        .map(|p| p.cuts.selected_labels())
        .unwrap_or_default();

    Ok(HomeTemplate {
        greeting_name: user.email.local_part().to_owned(),
        profile,
        preferences,
        preferred_cuts,
        products: featured_products(),
    })
}

/// Display the minimal gated page.
pub async fn protected(RequireOnboarded(user): RequireOnboarded) -> ProtectedTemplate {
    ProtectedTemplate {
        email: user.email.to_string(),
    }
}
