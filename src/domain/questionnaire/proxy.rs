//! Proxy sub-question batteries.
//!
//! When the user does not know a lab value, each metric is estimated from a
//! fixed set of lifestyle and history questions instead.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::MetricKey;

/// Whether a sub-question takes one option or a set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Single,
    Multiple,
}

/// One categorical sub-question of a metric's battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyQuestion {
    pub key: &'static str,
    pub prompt: &'static str,
    pub kind: SelectionKind,
    pub options: &'static [&'static str],
}

impl ProxyQuestion {
    /// True if `answer` has the right shape and only uses listed options.
    pub fn accepts(&self, answer: &ProxyAnswer) -> bool {
        match (self.kind, answer) {
            (SelectionKind::Single, ProxyAnswer::Single(value)) => self.options.contains(&value.as_str()),
            (SelectionKind::Multiple, ProxyAnswer::Multiple(values)) => {
                values.iter().all(|v| self.options.contains(&v.as_str()))
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn first_option_answer(&self) -> ProxyAnswer {
        match self.kind {
            SelectionKind::Single => ProxyAnswer::single(self.options[0]),
            SelectionKind::Multiple => ProxyAnswer::multiple([self.options[0]]),
        }
    }
}

/// Answer to a proxy sub-question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProxyAnswer {
    Single(String),
    Multiple(BTreeSet<String>),
}

impl ProxyAnswer {
    pub fn single(value: impl Into<String>) -> Self {
        ProxyAnswer::Single(value.into())
    }

    pub fn multiple<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ProxyAnswer::Multiple(values.into_iter().map(Into::into).collect())
    }

    /// Non-empty string, or non-empty set.
    pub fn is_answered(&self) -> bool {
        match self {
            ProxyAnswer::Single(value) => !value.trim().is_empty(),
            ProxyAnswer::Multiple(values) => !values.is_empty(),
        }
    }
}

const YES_NO_UNKNOWN: &[&str] = &["Ya", "Tidak", "Tidak tahu"];

pub const EXERCISE_TYPE: ProxyQuestion = ProxyQuestion {
    key: "exerciseType",
    prompt: "Jenis olahraga yang paling sering Anda lakukan",
    kind: SelectionKind::Single,
    options: &["Tidak berolahraga", "Jalan kaki", "Lari", "Bersepeda", "Berenang"],
};

pub const FISH_CONSUMPTION: ProxyQuestion = ProxyQuestion {
    key: "fishConsumption",
    prompt: "Seberapa sering Anda makan ikan?",
    kind: SelectionKind::Single,
    options: &["Jarang", "1-2 kali seminggu", "Lebih dari 2 kali seminggu"],
};

const SBP_BATTERY: &[ProxyQuestion] = &[
    ProxyQuestion {
        key: "familyHistory",
        prompt: "Apakah orang tua atau saudara kandung Anda memiliki hipertensi?",
        kind: SelectionKind::Single,
        options: YES_NO_UNKNOWN,
    },
    ProxyQuestion {
        key: "saltIntake",
        prompt: "Seberapa sering Anda makan makanan asin atau olahan?",
        kind: SelectionKind::Single,
        options: &["Jarang", "Kadang-kadang", "Sering"],
    },
    ProxyQuestion {
        key: "bpHistory",
        prompt: "Pernahkah dokter mengatakan tekanan darah Anda tinggi?",
        kind: SelectionKind::Single,
        options: &["Ya", "Tidak", "Tidak pernah diperiksa"],
    },
    ProxyQuestion {
        key: "bpSymptoms",
        prompt: "Keluhan yang sering Anda alami (boleh lebih dari satu)",
        kind: SelectionKind::Multiple,
        options: &[
            "Sakit kepala",
            "Pusing",
            "Tengkuk terasa berat",
            "Jantung berdebar",
            "Tidak ada",
        ],
    },
];

const TOTAL_CHOLESTEROL_BATTERY: &[ProxyQuestion] = &[
    ProxyQuestion {
        key: "dietPattern",
        prompt: "Seberapa sering Anda makan gorengan atau makanan bersantan?",
        kind: SelectionKind::Single,
        options: &["Jarang", "1-3 kali seminggu", "Hampir setiap hari"],
    },
    EXERCISE_TYPE,
    FISH_CONSUMPTION,
    ProxyQuestion {
        key: "familyCholesterol",
        prompt: "Apakah ada keluarga inti dengan kolesterol tinggi?",
        kind: SelectionKind::Single,
        options: YES_NO_UNKNOWN,
    },
];

const HDL_BATTERY: &[ProxyQuestion] = &[
    EXERCISE_TYPE,
    FISH_CONSUMPTION,
    ProxyQuestion {
        key: "waistSize",
        prompt: "Bagaimana lingkar pinggang Anda?",
        kind: SelectionKind::Single,
        options: &["Normal", "Sedikit berlebih", "Berlebih"],
    },
    ProxyQuestion {
        key: "cookingOil",
        prompt: "Minyak yang paling sering dipakai untuk memasak",
        kind: SelectionKind::Single,
        options: &["Minyak sawit", "Minyak zaitun", "Minyak kelapa", "Mentega"],
    },
];

const HBA1C_BATTERY: &[ProxyQuestion] = &[
    ProxyQuestion {
        key: "diabetesMedication",
        prompt: "Apakah Anda rutin minum obat atau memakai insulin?",
        kind: SelectionKind::Single,
        options: &["Ya, rutin", "Kadang-kadang", "Tidak"],
    },
    ProxyQuestion {
        key: "glucoseControl",
        prompt: "Bagaimana hasil cek gula darah terakhir Anda?",
        kind: SelectionKind::Single,
        options: &["Terkontrol", "Kadang tinggi", "Sering tinggi", "Tidak tahu"],
    },
    ProxyQuestion {
        key: "diabetesSymptoms",
        prompt: "Keluhan yang Anda alami (boleh lebih dari satu)",
        kind: SelectionKind::Multiple,
        options: &[
            "Sering haus",
            "Sering buang air kecil",
            "Luka sulit sembuh",
            "Kesemutan",
            "Tidak ada",
        ],
    },
];

const SERUM_CREATININE_BATTERY: &[ProxyQuestion] = &[
    ProxyQuestion {
        key: "kidneyHistory",
        prompt: "Pernahkah Anda didiagnosis penyakit ginjal?",
        kind: SelectionKind::Single,
        options: YES_NO_UNKNOWN,
    },
    ProxyQuestion {
        key: "urineChanges",
        prompt: "Perubahan urine yang Anda alami (boleh lebih dari satu)",
        kind: SelectionKind::Multiple,
        options: &[
            "Berbusa",
            "Lebih sedikit dari biasanya",
            "Berwarna gelap",
            "Tidak ada",
        ],
    },
    ProxyQuestion {
        key: "swelling",
        prompt: "Apakah kaki atau wajah Anda sering bengkak?",
        kind: SelectionKind::Single,
        options: &["Sering", "Kadang-kadang", "Tidak pernah"],
    },
    ProxyQuestion {
        key: "painkillerUse",
        prompt: "Seberapa sering Anda minum obat pereda nyeri?",
        kind: SelectionKind::Single,
        options: &["Hampir setiap hari", "Sesekali", "Jarang"],
    },
];

/// The fixed sub-question battery of a metric.
pub fn battery(metric: MetricKey) -> &'static [ProxyQuestion] {
    match metric {
        MetricKey::SystolicBloodPressure => SBP_BATTERY,
        MetricKey::TotalCholesterol => TOTAL_CHOLESTEROL_BATTERY,
        MetricKey::HdlCholesterol => HDL_BATTERY,
        MetricKey::Hba1c => HBA1C_BATTERY,
        MetricKey::SerumCreatinine => SERUM_CREATININE_BATTERY,
    }
}

/// Finds a sub-question of a metric's battery by key.
pub fn find_proxy_question(metric: MetricKey, key: &str) -> Option<&'static ProxyQuestion> {
    battery(metric).iter().find(|question| question.key == key)
}
