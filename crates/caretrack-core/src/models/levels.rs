//! Fixed label sets offered on the assessment forms.
//!
//! Serialized with the exact labels staff see. `from_label` is the lenient
//! parser used for free-text values: it trims and ignores case, and returns
//! `None` for anything it does not recognize.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

fn label_eq(label: &str, candidate: &str) -> bool {
    label.trim().eq_ignore_ascii_case(candidate)
}

/// Assistance needed for an activity of daily living, least to most independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AdlLevel {
    Dependent,
    #[serde(rename = "Max Assist")]
    MaxAssist,
    #[serde(rename = "Mod Assist")]
    ModAssist,
    #[serde(rename = "Min Assist")]
    MinAssist,
    Supervised,
    Independent,
}

impl AdlLevel {
    /// Canonical reporting order, most independent first.
    pub const CANONICAL: [AdlLevel; 6] = [
        AdlLevel::Independent,
        AdlLevel::Supervised,
        AdlLevel::MinAssist,
        AdlLevel::ModAssist,
        AdlLevel::MaxAssist,
        AdlLevel::Dependent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dependent => "Dependent",
            Self::MaxAssist => "Max Assist",
            Self::ModAssist => "Mod Assist",
            Self::MinAssist => "Min Assist",
            Self::Supervised => "Supervised",
            Self::Independent => "Independent",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::CANONICAL
            .into_iter()
            .find(|level| label_eq(label, level.label()))
    }
}

/// Safety risk level recorded per risk parameter, in increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::None,
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| label_eq(label, level.label()))
    }

    /// Medium and High risk entries put the patient under active monitoring.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::Medium | Self::High)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Attendance {
    Present,
    Absent,
    Refused,
}

impl Attendance {
    pub fn from_label(label: &str) -> Option<Self> {
        [Self::Present, Self::Absent, Self::Refused]
            .into_iter()
            .find(|a| label_eq(label, a.label()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Refused => "Refused",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Engagement {
    Active,
    Passive,
    Minimal,
}

impl Engagement {
    pub fn from_label(label: &str) -> Option<Self> {
        [Self::Active, Self::Passive, Self::Minimal]
            .into_iter()
            .find(|e| label_eq(label, e.label()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Passive => "Passive",
            Self::Minimal => "Minimal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Compliance {
    Full,
    Partial,
    Refused,
}

impl Compliance {
    pub fn from_label(label: &str) -> Option<Self> {
        [Self::Full, Self::Partial, Self::Refused]
            .into_iter()
            .find(|c| label_eq(label, c.label()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Partial => "Partial",
            Self::Refused => "Refused",
        }
    }
}
