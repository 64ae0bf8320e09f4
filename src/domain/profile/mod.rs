//! Profile module - the stored user profile and values derived from it.
//!
//! Age and risk region are computed once, from the profile, when a wizard
//! session starts. They are never asked of the user.

mod risk_region;
mod user_profile;

pub use risk_region::{normalize_country, RiskRegion};
pub use user_profile::{age_on, parse_birth_date, Sex, UserProfile};
