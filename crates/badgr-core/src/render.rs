//! Badge URL rendering.
//!
//! Badgr never draws SVGs itself; it redirects to shields.io's static badge
//! endpoint with the badge's label, message, and color filled in.

use crate::domain::Badge;

/// shields.io static badge endpoint.
pub const SHIELDS_STATIC_URL: &str = "https://img.shields.io/static/v1";

/// Render a badge to its image URL.
///
/// Each field is escaped independently, so labels containing `&`, `=`, or
/// spaces cannot leak into neighbouring parameters.
pub fn badge_url(badge: &Badge) -> String {
    format!(
        "{}?label={}&message={}&color={}",
        SHIELDS_STATIC_URL,
        urlencoding::encode(badge.name()),
        urlencoding::encode(badge.status_text()),
        urlencoding::encode(badge.color().as_str()),
    )
}
