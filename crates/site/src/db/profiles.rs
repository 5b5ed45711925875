//! Profile and preference repository for database operations.
//!
//! Onboarding writes the profile and preference rows in a single
//! transaction so `onboarding_completed` can never be observed out of sync
//! with the preferences record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use steer_core::{DeliveryFrequency, UserId};

use super::RepositoryError;
use crate::models::{CutSelection, DeliveryAddress, Preferences, Profile};

/// Database row for `profiles`.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: UserId,
    address_line1: String,
    address_line2: Option<String>,
    city: String,
    state: String,
    postal_code: String,
    delivery_instructions: Option<String>,
    onboarding_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            address: DeliveryAddress {
                address_line1: row.address_line1,
                address_line2: row.address_line2,
                city: row.city,
                state: row.state,
                postal_code: row.postal_code,
                delivery_instructions: row.delivery_instructions,
            },
            onboarding_completed: row.onboarding_completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for `user_preferences`.
#[derive(Debug, sqlx::FromRow)]
struct PreferencesRow {
    user_id: UserId,
    ribeye_preferred: bool,
    ground_beef_preferred: bool,
    filet_mignon_preferred: bool,
    brisket_preferred: bool,
    quantity: i32,
    frequency: String,
    monthly_budget: Decimal,
}

impl TryFrom<PreferencesRow> for Preferences {
    type Error = RepositoryError;

    fn try_from(row: PreferencesRow) -> Result<Self, Self::Error> {
        let frequency: DeliveryFrequency = row.frequency.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid frequency in database: {e}"))
        })?;

        Ok(Self {
            user_id: row.user_id,
            cuts: CutSelection {
                ribeye: row.ribeye_preferred,
                ground_beef: row.ground_beef_preferred,
                filet_mignon: row.filet_mignon_preferred,
                brisket: row.brisket_preferred,
            },
            quantity: row.quantity,
            frequency,
            monthly_budget: row.monthly_budget,
        })
    }
}

/// Repository for profile and preference database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by user identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r"
            SELECT id, address_line1, address_line2, city, state, postal_code,
                   delivery_instructions, onboarding_completed, created_at, updated_at
            FROM profiles
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Profile::from))
    }

    /// Get a user's delivery preferences.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored frequency is
    /// not one of the enumerated values.
    pub async fn get_preferences(
        &self,
        user_id: UserId,
    ) -> Result<Option<Preferences>, RepositoryError> {
        let row: Option<PreferencesRow> = sqlx::query_as(
            r"
            SELECT user_id, ribeye_preferred, ground_beef_preferred,
                   filet_mignon_preferred, brisket_preferred,
                   quantity, frequency, monthly_budget
            FROM user_preferences
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Preferences::try_from).transpose()
    }

    /// Check whether a user has completed onboarding.
    ///
    /// A missing profile row means onboarding has not happened.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn has_completed_onboarding(&self, id: UserId) -> Result<bool, RepositoryError> {
        let completed: Option<bool> =
            sqlx::query_scalar("SELECT onboarding_completed FROM profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(completed.unwrap_or(false))
    }

    /// Complete onboarding: upsert the profile (setting
    /// `onboarding_completed = TRUE`) and the preferences in one
    /// transaction.
    ///
    /// Both writes are full replaces keyed by the user identity. If either
    /// fails the transaction rolls back and nothing is recorded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either write or the commit
    /// fails.
    pub async fn complete_onboarding(
        &self,
        address: &DeliveryAddress,
        prefs: &Preferences,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO profiles
                (id, address_line1, address_line2, city, state, postal_code,
                 delivery_instructions, onboarding_completed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
            ON CONFLICT (id) DO UPDATE SET
                address_line1 = EXCLUDED.address_line1,
                address_line2 = EXCLUDED.address_line2,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                postal_code = EXCLUDED.postal_code,
                delivery_instructions = EXCLUDED.delivery_instructions,
                onboarding_completed = TRUE,
                updated_at = NOW()
            ",
        )
        .bind(prefs.user_id)
        .bind(&address.address_line1)
        .bind(address.address_line2.as_deref())
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.postal_code)
        .bind(address.delivery_instructions.as_deref())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
            INSERT INTO user_preferences
                (user_id, ribeye_preferred, ground_beef_preferred,
                 filet_mignon_preferred, brisket_preferred,
                 quantity, frequency, monthly_budget)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                ribeye_preferred = EXCLUDED.ribeye_preferred,
                ground_beef_preferred = EXCLUDED.ground_beef_preferred,
                filet_mignon_preferred = EXCLUDED.filet_mignon_preferred,
                brisket_preferred = EXCLUDED.brisket_preferred,
                quantity = EXCLUDED.quantity,
                frequency = EXCLUDED.frequency,
                monthly_budget = EXCLUDED.monthly_budget,
                updated_at = NOW()
            ",
        )
        .bind(prefs.user_id)
        .bind(prefs.cuts.ribeye)
        .bind(prefs.cuts.ground_beef)
        .bind(prefs.cuts.filet_mignon)
        .bind(prefs.cuts.brisket)
        .bind(prefs.quantity)
        .bind(prefs.frequency.as_str())
        .bind(prefs.monthly_budget)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }
}
