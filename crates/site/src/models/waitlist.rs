//! Waitlist domain types.

use steer_core::{Email, RoleDetails, SignupRole, ZipCode};

/// A validated waitlist signup.
///
/// Created once from a validated form submission and inserted; never read
/// back or updated by this system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    /// Contact email.
    pub email: Email,
    /// Signup name, non-empty after trimming.
    pub name: String,
    /// Delivery area.
    pub zip_code: ZipCode,
    /// Optional free-text comments.
    pub comments: Option<String>,
    /// Role-specific volume details; also carries the role itself.
    pub details: RoleDetails,
}

impl WaitlistEntry {
    /// The signup role this entry was submitted under.
    #[must_use]
    pub const fn role(&self) -> SignupRole {
        self.details.role()
    }
}
