//! Domain types for the site.
//!
//! These types represent validated domain objects separate from database
//! row types and raw form input.

pub mod profile;
pub mod session;
pub mod waitlist;

pub use profile::{CutSelection, DeliveryAddress, Preferences, Profile};
pub use session::{CurrentUser, session_keys};
pub use waitlist::WaitlistEntry;
