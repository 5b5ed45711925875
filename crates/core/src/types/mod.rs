//! Core types for Steer.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod frequency;
pub mod id;
pub mod role;
pub mod zip;

pub use email::{Email, EmailError};
pub use frequency::DeliveryFrequency;
pub use id::*;
pub use role::{RoleDetails, SignupRole};
pub use zip::{ZipCode, ZipCodeError};
