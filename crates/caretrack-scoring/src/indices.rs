//! The six clinical sub-indices. Each is 0-100 or `None` when its inputs
//! carry no data.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use caretrack_core::models::levels::AdlLevel;

use crate::normalize::{
    DomainEvents, compliance_percent, engagement_percent, level_percent, rating_percent,
    tally_ratings,
};
use crate::relapse::relapse_risk_card;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SubIndex {
    /// Symptom Severity Index.
    Ssi,
    /// Insight & Flexibility Index.
    Ifi,
    /// Functional Recovery Index.
    Fri,
    /// Family Stability Index.
    Fsi,
    /// Biological Stability Index.
    Bsi,
    /// Relapse Risk Score, inverted so higher is better.
    Rrs,
}

impl SubIndex {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ssi => "Symptom Severity",
            Self::Ifi => "Insight & Flexibility",
            Self::Fri => "Functional Recovery",
            Self::Fsi => "Family Stability",
            Self::Bsi => "Biological Stability",
            Self::Rrs => "Relapse Risk Score",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubIndices {
    pub ssi: Option<u8>,
    pub ifi: Option<u8>,
    pub fri: Option<u8>,
    pub fsi: Option<u8>,
    pub bsi: Option<u8>,
    pub rrs: Option<u8>,
}

impl SubIndices {
    pub fn get(&self, index: SubIndex) -> Option<u8> {
        match index {
            SubIndex::Ssi => self.ssi,
            SubIndex::Ifi => self.ifi,
            SubIndex::Fri => self.fri,
            SubIndex::Fsi => self.fsi,
            SubIndex::Bsi => self.bsi,
            SubIndex::Rrs => self.rrs,
        }
    }

    pub fn available(&self) -> usize {
        [self.ssi, self.ifi, self.fri, self.fsi, self.bsi, self.rrs]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }
}

pub fn compute_sub_indices(events: &DomainEvents<'_>) -> SubIndices {
    SubIndices {
        ssi: symptom_severity(events),
        ifi: insight_flexibility(events),
        fri: functional_recovery(events),
        fsi: family_stability(events),
        bsi: biological_stability(events),
        rrs: relapse_risk_score(events),
    }
}

pub fn symptom_severity(events: &DomainEvents<'_>) -> Option<u8> {
    rating_percent(&events.psychiatric)
}

/// Lower-case alphanumerics only, so "Response to Redirection" and
/// "response-to-redirection" compare equal.
fn normalize_parameter(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_insight_parameter(name: &str) -> bool {
    let key = normalize_parameter(name);
    key.starts_with("insight") || key == "judgment" || key == "judgement"
}

fn is_flexibility_parameter(name: &str) -> bool {
    let key = normalize_parameter(name);
    key == "emotionalregulation" || key == "responsetoredirection"
}

/// Insight and Judgment ratings pooled with Emotional Regulation and
/// Response to Redirection ratings.
pub fn insight_flexibility(events: &DomainEvents<'_>) -> Option<u8> {
    let mut tally = tally_ratings(&events.psychiatric, is_insight_parameter);
    let behavioral = tally_ratings(&events.behavioral, is_flexibility_parameter);
    tally.sum += behavioral.sum;
    tally.count += behavioral.count;
    tally.percent()
}

/// Mean of the ADL and therapeutic engagement scores that are present and
/// non-zero.
pub fn functional_recovery(events: &DomainEvents<'_>) -> Option<u8> {
    let parts: Vec<u8> = [
        level_percent::<AdlLevel>(&events.adl),
        engagement_percent(&events.therapeutic),
    ]
    .into_iter()
    .flatten()
    .filter(|&score| score > 0)
    .collect();

    if parts.is_empty() {
        return None;
    }
    let sum: u32 = parts.iter().map(|&p| u32::from(p)).sum();
    let mean = f64::from(sum) / parts.len() as f64;
    Some(crate::scale::round_half_up(mean) as u8)
}

/// No assessment form records family stability yet.
pub fn family_stability(_events: &DomainEvents<'_>) -> Option<u8> {
    None
}

pub fn biological_stability(events: &DomainEvents<'_>) -> Option<u8> {
    compliance_percent(&events.medication)
}

/// Inverted total of the latest relapse-risk assessment only.
pub fn relapse_risk_score(events: &DomainEvents<'_>) -> Option<u8> {
    relapse_risk_card(events.relapse_risk.iter().copied()).map(|card| card.recovery_score())
}
