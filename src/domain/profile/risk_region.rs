//! Country of residence → cardiovascular risk region.
//!
//! Regions follow the SCORE2 / SCORE2-Asia-Pacific calibration buckets.
//! Countries not in the table have no region.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Coarse geographic risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskRegion {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskRegion {
    /// Backend code for the region.
    pub fn code(&self) -> &'static str {
        match self {
            RiskRegion::Low => "low",
            RiskRegion::Moderate => "moderate",
            RiskRegion::High => "high",
            RiskRegion::VeryHigh => "very_high",
        }
    }

    /// Label shown on the read-only info question.
    pub fn label(&self) -> &'static str {
        match self {
            RiskRegion::Low => "Risiko rendah",
            RiskRegion::Moderate => "Risiko sedang",
            RiskRegion::High => "Risiko tinggi",
            RiskRegion::VeryHigh => "Risiko sangat tinggi",
        }
    }

    /// Looks up the region for a country name in any casing or spacing.
    pub fn for_country(country: &str) -> Option<RiskRegion> {
        COUNTRY_REGIONS.get(normalize_country(country).as_str()).copied()
    }
}

impl fmt::Display for RiskRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercases and joins words with underscores: `"New Zealand"` → `"new_zealand"`.
pub fn normalize_country(country: &str) -> String {
    country
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

const LOW: &[&str] = &[
    "australia",
    "belgium",
    "denmark",
    "france",
    "israel",
    "japan",
    "luxembourg",
    "netherlands",
    "new_zealand",
    "norway",
    "south_korea",
    "spain",
    "switzerland",
    "united_kingdom",
];

const MODERATE: &[&str] = &[
    "austria",
    "china",
    "cyprus",
    "finland",
    "germany",
    "greece",
    "hong_kong",
    "iceland",
    "ireland",
    "italy",
    "malta",
    "portugal",
    "san_marino",
    "singapore",
    "slovenia",
    "sweden",
    "taiwan",
];

const HIGH: &[&str] = &[
    "albania",
    "bosnia_and_herzegovina",
    "brunei",
    "croatia",
    "czech_republic",
    "estonia",
    "hungary",
    "kazakhstan",
    "malaysia",
    "poland",
    "slovakia",
    "thailand",
    "turkey",
    "vietnam",
];

const VERY_HIGH: &[&str] = &[
    "algeria",
    "armenia",
    "azerbaijan",
    "bangladesh",
    "belarus",
    "bulgaria",
    "cambodia",
    "egypt",
    "georgia",
    "india",
    "indonesia",
    "kyrgyzstan",
    "laos",
    "latvia",
    "lebanon",
    "libya",
    "lithuania",
    "moldova",
    "mongolia",
    "montenegro",
    "morocco",
    "myanmar",
    "north_macedonia",
    "pakistan",
    "philippines",
    "romania",
    "russia",
    "serbia",
    "syria",
    "tunisia",
    "ukraine",
    "uzbekistan",
];

static COUNTRY_REGIONS: Lazy<HashMap<&'static str, RiskRegion>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for (countries, region) in [
        (LOW, RiskRegion::Low),
        (MODERATE, RiskRegion::Moderate),
        (HIGH, RiskRegion::High),
        (VERY_HIGH, RiskRegion::VeryHigh),
    ] {
        for country in countries {
            table.insert(*country, region);
        }
    }
    table
});
