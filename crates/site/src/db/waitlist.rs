//! Waitlist repository for database operations.

use sqlx::PgPool;

use steer_core::{RoleDetails, WaitlistEntryId};

use super::RepositoryError;
use crate::models::WaitlistEntry;

/// Repository for waitlist database operations.
pub struct WaitlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WaitlistRepository<'a> {
    /// Create a new waitlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a validated waitlist entry.
    ///
    /// Exactly one of the role-specific count columns is written; the
    /// other is NULL, mirroring the `RoleDetails` union.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, entry: &WaitlistEntry) -> Result<WaitlistEntryId, RepositoryError> {
        let (monthly_cattle_sold, monthly_beef_pounds) = match entry.details {
            RoleDetails::Farmer {
                monthly_cattle_sold,
            } => (Some(i64::from(monthly_cattle_sold)), None),
            RoleDetails::Customer {
                monthly_beef_pounds,
            } => (None, Some(i64::from(monthly_beef_pounds))),
        };

        let (id,): (WaitlistEntryId,) = sqlx::query_as(
            r"
            INSERT INTO waitlist_entries
                (email, name, zip_code, role, comments, monthly_cattle_sold, monthly_beef_pounds)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            ",
        )
        .bind(entry.email.as_str())
        .bind(&entry.name)
        .bind(entry.zip_code.as_str())
        .bind(entry.role().to_string())
        .bind(entry.comments.as_deref())
        .bind(monthly_cattle_sold)
        .bind(monthly_beef_pounds)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}
