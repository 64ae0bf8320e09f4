//! Stored user profile and the values the wizard derives from it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::RiskRegion;
use crate::domain::foundation::ValidationError;

const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Biological sex as stored on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Label shown on the gender info question.
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Laki-laki",
            Sex::Female => "Perempuan",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The parts of the user's profile the wizard pre-fills from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(
        serialize_with = "serialize_birth_date",
        deserialize_with = "deserialize_birth_date"
    )]
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
    pub country_of_residence: String,
}

impl UserProfile {
    pub fn new(date_of_birth: NaiveDate, sex: Sex, country_of_residence: impl Into<String>) -> Self {
        Self {
            date_of_birth,
            sex,
            country_of_residence: country_of_residence.into(),
        }
    }

    /// Age in whole years on `today`.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        age_on(self.date_of_birth, today)
    }

    /// Risk region of the country of residence, if the country is known.
    pub fn risk_region(&self) -> Option<RiskRegion> {
        RiskRegion::for_country(&self.country_of_residence)
    }

    /// Country name with each word capitalised, e.g. `"new zealand"` → `"New Zealand"`.
    pub fn country_display(&self) -> String {
        self.country_of_residence
            .split(|c: char| c.is_whitespace() || c == '_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

/// Calendar age: year difference, minus one if the birthday has not yet
/// come round this year. Never negative.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    if today <= date_of_birth {
        return 0;
    }
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Parses a birth date in `dd/mm/yyyy` (profile form) or ISO `yyyy-mm-dd`.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::empty_field("date_of_birth"));
    }
    NaiveDate::parse_from_str(raw, DISPLAY_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT))
        .map_err(|_| {
            ValidationError::invalid_format("date_of_birth", format!("unrecognised date '{}'", raw))
        })
}

fn serialize_birth_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format(DISPLAY_DATE_FORMAT).to_string())
}

fn deserialize_birth_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_birth_date(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_counts_completed_years() {
        assert_eq!(age_on(date(1990, 1, 1), date(2026, 10, 18)), 36);
    }

    #[test]
    fn age_rolls_back_before_birthday() {
        assert_eq!(age_on(date(1990, 10, 19), date(2026, 10, 18)), 35);
        assert_eq!(age_on(date(1990, 11, 1), date(2026, 10, 18)), 35);
    }

    #[test]
    fn age_increments_on_birthday() {
        assert_eq!(age_on(date(1990, 10, 18), date(2026, 10, 18)), 36);
    }

    #[test]
    fn age_is_zero_for_future_birth_dates() {
        assert_eq!(age_on(date(2030, 1, 1), date(2026, 10, 18)), 0);
    }

    #[test]
    fn leap_day_birthday_counts_on_march_first() {
        assert_eq!(age_on(date(2000, 2, 29), date(2025, 2, 28)), 24);
        assert_eq!(age_on(date(2000, 2, 29), date(2025, 3, 1)), 25);
    }

    #[test]
    fn parse_birth_date_accepts_both_formats() {
        assert_eq!(parse_birth_date("01/02/1990").unwrap(), date(1990, 2, 1));
        assert_eq!(parse_birth_date("1990-02-01").unwrap(), date(1990, 2, 1));
    }

    #[test]
    fn parse_birth_date_rejects_garbage() {
        assert!(matches!(
            parse_birth_date(""),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(matches!(
            parse_birth_date("31/31/1990"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn profile_deserializes_from_backend_shape() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"date_of_birth":"01/01/1990","sex":"male","country_of_residence":"indonesia"}"#,
        )
        .unwrap();
        assert_eq!(profile.date_of_birth, date(1990, 1, 1));
        assert_eq!(profile.sex, Sex::Male);
        assert_eq!(profile.risk_region(), Some(RiskRegion::VeryHigh));
        assert_eq!(profile.country_display(), "Indonesia");
    }

    #[test]
    fn country_display_capitalises_each_word() {
        let profile = UserProfile::new(date(1980, 5, 5), Sex::Female, "new_zealand");
        assert_eq!(profile.country_display(), "New Zealand");
    }
}
