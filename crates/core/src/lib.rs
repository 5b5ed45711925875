//! Steer Core - Shared types library.
//!
//! This crate provides common types used across all Steer components:
//! - `site` - Public-facing marketing site, waitlist, and member area
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, ZIP codes,
//!   signup roles, and delivery frequencies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
