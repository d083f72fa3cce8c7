//! Domain models for Badgr.
//!
//! Canonical definitions for the core entities:
//! - `CheckResult`: one provider-reported check suite
//! - `CheckStatus`: severity-ranked consolidated status
//! - `Badge`: what gets rendered (result or Badgr error)
//! - `BadgeRequestOptions`: resolved per-request options

pub mod badge;
pub mod check;
pub mod error;
pub mod status;

// Re-export main types and errors
pub use badge::{Badge, BadgeQuery, BadgeRequestOptions, DEFAULT_BADGE_NAME, DEFAULT_BRANCH};
pub use check::CheckResult;
pub use error::{BadgeError, ProviderError, Result};
pub use status::{CheckStatus, Color};
