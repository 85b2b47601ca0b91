//! Domain normalizers: reduce same-domain events to a score or a summary.
//!
//! Every normalizer returns `None` when its input has nothing to score, so
//! callers can tell "no information" apart from the worst possible score.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use caretrack_core::models::event::{
    ActivitySheet, Assessment, ClinicalEvent, LevelSheet, MedicationRecord, RatingSheet,
};
use caretrack_core::models::levels::{AdlLevel, Attendance, Compliance, Engagement, RiskLevel};

use crate::scale::{OrdinalScale, SCALE_MAX, label_score, percent_of_scale, round_half_up};

/// Events of one window partitioned by domain, borrowed from the caller.
#[derive(Debug, Default, Clone)]
pub struct DomainEvents<'a> {
    pub psychiatric: Vec<&'a RatingSheet>,
    pub behavioral: Vec<&'a RatingSheet>,
    pub medication: Vec<&'a MedicationRecord>,
    pub adl: Vec<&'a LevelSheet>,
    pub therapeutic: Vec<&'a ActivitySheet>,
    pub risk: Vec<&'a LevelSheet>,
    /// Kept whole because the relapse monitor orders by submission time.
    pub relapse_risk: Vec<&'a ClinicalEvent>,
}

impl<'a> DomainEvents<'a> {
    pub fn collect<I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a ClinicalEvent>,
    {
        let mut out = Self::default();
        for event in events {
            match &event.assessment {
                Assessment::Psychiatric(sheet) => out.psychiatric.push(sheet),
                Assessment::Behavioral(sheet) => out.behavioral.push(sheet),
                Assessment::Medication(record) => out.medication.push(record),
                Assessment::Adl(sheet) => out.adl.push(sheet),
                Assessment::Therapeutic(sheet) => out.therapeutic.push(sheet),
                Assessment::Risk(sheet) => out.risk.push(sheet),
                Assessment::RelapseRisk(_) => out.relapse_risk.push(event),
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.psychiatric.len()
            + self.behavioral.len()
            + self.medication.len()
            + self.adl.len()
            + self.therapeutic.len()
            + self.risk.len()
            + self.relapse_risk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Running sum and count of 1-5 ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingTally {
    pub sum: i64,
    pub count: u32,
}

impl RatingTally {
    /// Add one rating. Values outside 1-5 are dropped.
    pub fn add(&mut self, parameter: &str, value: i64) {
        if !(1..=5).contains(&value) {
            tracing::trace!(parameter, value, "rating outside 1-5 excluded");
            return;
        }
        self.sum += value;
        self.count += 1;
    }

    pub fn percent(&self) -> Option<u8> {
        percent_of_scale(self.sum as f64, self.count, SCALE_MAX)
    }
}

/// Pool every rating whose parameter name passes `include`. Repeated
/// parameters across sheets each count once per occurrence.
pub fn tally_ratings<F>(sheets: &[&RatingSheet], include: F) -> RatingTally
where
    F: Fn(&str) -> bool,
{
    let mut tally = RatingTally::default();
    for sheet in sheets {
        for (parameter, &value) in &sheet.ratings {
            if include(parameter.as_str()) {
                tally.add(parameter.as_str(), value);
            }
        }
    }
    tally
}

/// Psychiatric or behavioral ratings as a 0-100 score.
pub fn rating_percent(sheets: &[&RatingSheet]) -> Option<u8> {
    tally_ratings(sheets, |_| true).percent()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RatingAverage {
    /// Mean rating, one decimal place.
    pub average: f64,
    pub count: u32,
}

pub fn rating_average(sheets: &[&RatingSheet]) -> Option<RatingAverage> {
    let tally = tally_ratings(sheets, |_| true);
    if tally.count == 0 {
        return None;
    }
    let mean = tally.sum as f64 / f64::from(tally.count);
    Some(RatingAverage {
        average: round_half_up(mean * 10.0) / 10.0,
        count: tally.count,
    })
}

/// Mean level score on scale `S` as 0-100, counting only entries that score
/// above zero. An all-`Dependent` sheet therefore has no score at all.
pub fn level_percent<S: OrdinalScale>(sheets: &[&LevelSheet]) -> Option<u8> {
    let mut sum = 0u32;
    let mut count = 0u32;
    for sheet in sheets {
        for label in sheet.levels.values() {
            let score = label_score::<S>(label);
            if score > 0 {
                sum += u32::from(score);
                count += 1;
            }
        }
    }
    percent_of_scale(f64::from(sum), count, SCALE_MAX)
}

/// Mean risk level score as 0-100 over every entry; unrecognized labels
/// pull the score down as 0.
pub fn safety_percent(sheets: &[&LevelSheet]) -> Option<u8> {
    let mut sum = 0u32;
    let mut count = 0u32;
    for sheet in sheets {
        for label in sheet.levels.values() {
            sum += u32::from(label_score::<RiskLevel>(label));
            count += 1;
        }
    }
    percent_of_scale(f64::from(sum), count, SCALE_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "level", rename_all = "snake_case")]
#[ts(export)]
pub enum AdlLevelSummary {
    /// The most frequent level.
    Level(AdlLevel),
    /// More than two distinct levels were recorded.
    Mixed,
    /// Entries exist but none carries a recognized level.
    Various,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdlSummary {
    pub count: u32,
    pub level: AdlLevelSummary,
}

pub fn summarize_adl(sheets: &[&LevelSheet]) -> Option<AdlSummary> {
    let mut count = 0u32;
    let mut recognized: BTreeMap<AdlLevel, u32> = BTreeMap::new();
    let mut unrecognized: BTreeSet<String> = BTreeSet::new();

    for sheet in sheets {
        for label in sheet.levels.values() {
            count += 1;
            match AdlLevel::from_label(label) {
                Some(level) => *recognized.entry(level).or_default() += 1,
                None => {
                    let label = label.trim();
                    if !label.is_empty() {
                        unrecognized.insert(label.to_lowercase());
                    }
                }
            }
        }
    }

    if count == 0 {
        return None;
    }

    // Strictly greater: ties go to the level listed first.
    let mut mode = None;
    let mut max = 0;
    for level in AdlLevel::CANONICAL {
        if let Some(&n) = recognized.get(&level)
            && n > max
        {
            max = n;
            mode = Some(level);
        }
    }

    let distinct = recognized.len() + unrecognized.len();
    let level = match mode {
        None => AdlLevelSummary::Various,
        Some(_) if distinct > 2 => AdlLevelSummary::Mixed,
        Some(level) => AdlLevelSummary::Level(level),
    };
    Some(AdlSummary { count, level })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EngagementTrend {
    Active,
    Passive,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TherapeuticSummary {
    pub count: u32,
    pub present_count: u32,
    pub engagement: EngagementTrend,
}

pub fn summarize_therapeutic(sheets: &[&ActivitySheet]) -> Option<TherapeuticSummary> {
    let mut count = 0u32;
    let mut present_count = 0u32;
    let mut active = 0u32;
    let mut passive = 0u32;

    for record in sheets.iter().flat_map(|s| s.activities.values()) {
        count += 1;
        if record.attendance == Some(Attendance::Present) {
            present_count += 1;
        }
        match record.engagement {
            Some(Engagement::Active) => active += 1,
            Some(Engagement::Passive | Engagement::Minimal) => passive += 1,
            None => {}
        }
    }

    if count == 0 {
        return None;
    }

    let engagement = match active.cmp(&passive) {
        std::cmp::Ordering::Greater => EngagementTrend::Active,
        std::cmp::Ordering::Less => EngagementTrend::Passive,
        std::cmp::Ordering::Equal => EngagementTrend::Mixed,
    };
    Some(TherapeuticSummary {
        count,
        present_count,
        engagement,
    })
}

/// Attendance and engagement credit per activity, out of 5:
/// Present 3, Absent 0, anything else 1; Active 2, Passive 1, otherwise 0.
pub fn engagement_percent(sheets: &[&ActivitySheet]) -> Option<u8> {
    let mut total = 0u32;
    let mut count = 0u32;
    for record in sheets.iter().flat_map(|s| s.activities.values()) {
        total += match record.attendance {
            Some(Attendance::Present) => 3,
            Some(Attendance::Absent) => 0,
            _ => 1,
        };
        total += match record.engagement {
            Some(Engagement::Active) => 2,
            Some(Engagement::Passive) => 1,
            _ => 0,
        };
        count += 1;
    }
    percent_of_scale(f64::from(total), count, SCALE_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskOutlook {
    WithinRange,
    Monitored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskSummary {
    pub count: u32,
    /// Any entry recorded at Medium or High.
    pub elevated: bool,
}

impl RiskSummary {
    pub fn outlook(&self) -> RiskOutlook {
        if self.elevated {
            RiskOutlook::Monitored
        } else {
            RiskOutlook::WithinRange
        }
    }
}

pub fn summarize_risk(sheets: &[&LevelSheet]) -> Option<RiskSummary> {
    let mut count = 0u32;
    let mut elevated = false;
    for label in sheets.iter().flat_map(|s| s.levels.values()) {
        count += 1;
        if RiskLevel::from_label(label).is_some_and(|level| level.is_elevated()) {
            elevated = true;
        }
    }
    (count > 0).then_some(RiskSummary { count, elevated })
}

/// Medication compliance as 0-100. Records without a compliance value are
/// left out of the average, not counted as refusals.
pub fn compliance_percent(records: &[&MedicationRecord]) -> Option<u8> {
    let mut sum = 0.0;
    let mut count = 0u32;
    for compliance in records.iter().filter_map(|r| r.compliance) {
        sum += match compliance {
            Compliance::Full => 1.0,
            Compliance::Partial => 0.5,
            Compliance::Refused => 0.0,
        };
        count += 1;
    }
    percent_of_scale(sum, count, 1.0)
}
