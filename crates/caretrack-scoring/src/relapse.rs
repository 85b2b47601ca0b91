//! Relapse-risk monitoring: the latest risk card and its weekly trend.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use caretrack_core::models::event::{Assessment, ClinicalEvent, RelapseRiskRecord};

/// Each triad factor is rated 0-3, so the total runs 0-9.
pub const FACTOR_MAX: i64 = 3;
pub const TOTAL_MAX: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RelapseRiskLevel {
    Low,
    Moderate,
    High,
}

impl RelapseRiskLevel {
    pub fn from_total(total: u8) -> Self {
        match total {
            0..=3 => Self::Low,
            4..=6 => Self::Moderate,
            _ => Self::High,
        }
    }
}

/// Sum of the three factors, each clamped to 0-3. Lower is better.
pub fn relapse_total(record: &RelapseRiskRecord) -> u8 {
    [
        ("treatment_non_adherence", record.treatment_non_adherence),
        ("stressful_situations", record.stressful_situations),
        ("high_ee", record.high_ee),
    ]
    .into_iter()
    .map(|(factor, value)| {
        let clamped = value.clamp(0, FACTOR_MAX);
        if clamped != value {
            tracing::trace!(factor, value, "relapse factor clamped to 0-3");
        }
        clamped as u8
    })
    .sum()
}

fn relapse_records<'a, I>(events: I) -> impl Iterator<Item = (&'a ClinicalEvent, &'a RelapseRiskRecord)>
where
    I: IntoIterator<Item = &'a ClinicalEvent>,
{
    events.into_iter().filter_map(|event| match &event.assessment {
        Assessment::RelapseRisk(record) => Some((event, record)),
        _ => None,
    })
}

/// The most recently submitted relapse-risk assessment. On equal
/// timestamps the one that appears last in `events` wins.
pub fn latest_relapse_risk<'a, I>(events: I) -> Option<(&'a ClinicalEvent, &'a RelapseRiskRecord)>
where
    I: IntoIterator<Item = &'a ClinicalEvent>,
{
    // max_by_key keeps the last of equal maxima.
    relapse_records(events).max_by_key(|(event, _)| event.submitted_at)
}

/// Point-in-time relapse-risk card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RelapseRiskCard {
    pub total: u8,
    pub level: RelapseRiskLevel,
    pub submitted_at: jiff::Timestamp,
}

impl RelapseRiskCard {
    /// Recovery-oriented inversion of the total, 0-100, higher is better.
    pub fn recovery_score(&self) -> u8 {
        let remaining = f64::from(TOTAL_MAX - self.total.min(TOTAL_MAX));
        crate::scale::round_half_up(remaining / f64::from(TOTAL_MAX) * 100.0) as u8
    }
}

/// `None` when there is no relapse-risk assessment; never defaults to Low.
pub fn relapse_risk_card<'a, I>(events: I) -> Option<RelapseRiskCard>
where
    I: IntoIterator<Item = &'a ClinicalEvent>,
{
    latest_relapse_risk(events).map(|(event, record)| {
        let total = relapse_total(record);
        RelapseRiskCard {
            total,
            level: RelapseRiskLevel::from_total(total),
            submitted_at: event.submitted_at,
        }
    })
}

/// ISO-8601 week (Monday start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoWeek {
    pub year: i16,
    pub week: i8,
}

impl IsoWeek {
    pub fn of(date: jiff::civil::Date) -> Self {
        let iso = date.iso_week_date();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RelapseTrendPoint {
    /// `YYYY-Www`.
    pub week: String,
    pub total: u8,
    pub level: RelapseRiskLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RelapseTrend {
    pub points: Vec<RelapseTrendPoint>,
}

impl RelapseTrend {
    /// A trend needs at least two weeks to be drawn as a line.
    pub fn is_sufficient(&self) -> bool {
        self.points.len() >= 2
    }
}

/// One point per ISO week, ascending, from the latest assessment of that
/// week. An assessment's own `week_start` decides its week when present,
/// otherwise its submission date in `tz`.
pub fn relapse_risk_trend<'a, I>(events: I, tz: &TimeZone) -> RelapseTrend
where
    I: IntoIterator<Item = &'a ClinicalEvent>,
{
    let mut latest: BTreeMap<IsoWeek, (&ClinicalEvent, &RelapseRiskRecord)> = BTreeMap::new();
    for (event, record) in relapse_records(events) {
        let date = record
            .week_start
            .unwrap_or_else(|| event.submitted_at.to_zoned(tz.clone()).date());
        match latest.entry(IsoWeek::of(date)) {
            Entry::Vacant(slot) => {
                slot.insert((event, record));
            }
            Entry::Occupied(mut slot) => {
                if event.submitted_at >= slot.get().0.submitted_at {
                    slot.insert((event, record));
                }
            }
        }
    }

    let points = latest
        .into_iter()
        .map(|(week, (_, record))| {
            let total = relapse_total(record);
            RelapseTrendPoint {
                week: week.to_string(),
                total,
                level: RelapseRiskLevel::from_total(total),
            }
        })
        .collect();
    RelapseTrend { points }
}
