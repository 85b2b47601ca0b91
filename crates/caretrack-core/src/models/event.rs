use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::levels::{Attendance, Compliance, Engagement};

/// The assessment form a clinical event was submitted through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ClinicalDomain {
    Psychiatric,
    Behavioral,
    Medication,
    #[serde(rename = "adl")]
    ActivitiesOfDailyLiving,
    Therapeutic,
    Risk,
    RelapseRisk,
}

impl ClinicalDomain {
    pub const ALL: [ClinicalDomain; 7] = [
        ClinicalDomain::Psychiatric,
        ClinicalDomain::Behavioral,
        ClinicalDomain::Medication,
        ClinicalDomain::ActivitiesOfDailyLiving,
        ClinicalDomain::Therapeutic,
        ClinicalDomain::Risk,
        ClinicalDomain::RelapseRisk,
    ];

    /// The section key used by the document store.
    pub fn section(&self) -> &'static str {
        match self {
            Self::Psychiatric => "psychiatric",
            Self::Behavioral => "behavioral",
            Self::Medication => "medication",
            Self::ActivitiesOfDailyLiving => "adl",
            Self::Therapeutic => "therapeutic",
            Self::Risk => "risk",
            Self::RelapseRisk => "relapse_risk",
        }
    }

    /// Parse a stored section key. Older documents wrote `relapseRisk`.
    pub fn from_section(section: &str) -> Option<Self> {
        let section = section.trim();
        if section == "relapseRisk" {
            return Some(Self::RelapseRisk);
        }
        Self::ALL.into_iter().find(|domain| domain.section() == section)
    }
}

/// One submitted assessment. Read-only to the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalEvent {
    pub id: Uuid,
    pub patient_id: String,
    pub submitted_at: jiff::Timestamp,
    pub assessment: Assessment,
}

impl ClinicalEvent {
    pub fn new(
        patient_id: impl Into<String>,
        submitted_at: jiff::Timestamp,
        assessment: Assessment,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id: patient_id.into(),
            submitted_at,
            assessment,
        }
    }

    pub fn domain(&self) -> ClinicalDomain {
        self.assessment.domain()
    }
}

/// Domain-specific payload of an assessment, tagged by section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "section", content = "payload", rename_all = "snake_case")]
#[ts(export)]
pub enum Assessment {
    Psychiatric(RatingSheet),
    Behavioral(RatingSheet),
    Medication(MedicationRecord),
    Adl(LevelSheet),
    Therapeutic(ActivitySheet),
    Risk(LevelSheet),
    RelapseRisk(RelapseRiskRecord),
}

impl Assessment {
    pub fn domain(&self) -> ClinicalDomain {
        match self {
            Self::Psychiatric(_) => ClinicalDomain::Psychiatric,
            Self::Behavioral(_) => ClinicalDomain::Behavioral,
            Self::Medication(_) => ClinicalDomain::Medication,
            Self::Adl(_) => ClinicalDomain::ActivitiesOfDailyLiving,
            Self::Therapeutic(_) => ClinicalDomain::Therapeutic,
            Self::Risk(_) => ClinicalDomain::Risk,
            Self::RelapseRisk(_) => ClinicalDomain::RelapseRisk,
        }
    }
}

/// Parameter name to 1-5 rating. Parameters that were not rated are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RatingSheet {
    pub ratings: BTreeMap<String, i64>,
}

impl<K: Into<String>> FromIterator<(K, i64)> for RatingSheet {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self {
            ratings: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Parameter name to a free-text level label (ADL assistance or risk level).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LevelSheet {
    pub levels: BTreeMap<String, String>,
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LevelSheet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            levels: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivitySheet {
    pub activities: BTreeMap<String, ActivityRecord>,
}

impl<K: Into<String>> FromIterator<(K, ActivityRecord)> for ActivitySheet {
    fn from_iter<I: IntoIterator<Item = (K, ActivityRecord)>>(iter: I) -> Self {
        Self {
            activities: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivityRecord {
    pub attendance: Option<Attendance>,
    pub engagement: Option<Engagement>,
}

impl ActivityRecord {
    pub fn new(attendance: Option<Attendance>, engagement: Option<Engagement>) -> Self {
        Self {
            attendance,
            engagement,
        }
    }
}

/// Medication round record. Only `compliance` is scored; the rest is
/// carried for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MedicationRecord {
    pub compliance: Option<Compliance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication_given: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prn_given: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prn_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

impl MedicationRecord {
    pub fn with_compliance(compliance: Compliance) -> Self {
        Self {
            compliance: Some(compliance),
            ..Self::default()
        }
    }
}

/// Relapse-risk triad, each factor rated 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RelapseRiskRecord {
    pub treatment_non_adherence: i64,
    pub stressful_situations: i64,
    /// Family expressed emotion.
    pub high_ee: i64,
    /// Monday the assessment was recorded for, when staff filled it in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_start: Option<jiff::civil::Date>,
}

impl RelapseRiskRecord {
    pub fn new(treatment_non_adherence: i64, stressful_situations: i64, high_ee: i64) -> Self {
        Self {
            treatment_non_adherence,
            stressful_situations,
            high_ee,
            week_start: None,
        }
    }

    pub fn with_week_start(mut self, week_start: jiff::civil::Date) -> Self {
        self.week_start = Some(week_start);
        self
    }
}
