//! Four-domain weekly bars and month bars for the family progress report.
//!
//! Unlike the sub-indices these always produce a number: a week or month
//! without data shows as 0 so no bar is ever blank.

use jiff::Span;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use caretrack_core::models::event::ClinicalEvent;
use caretrack_core::models::levels::{AdlLevel, RiskLevel};

use crate::error::ScoringError;
use crate::normalize::{
    DomainEvents, engagement_percent, level_percent, rating_percent, safety_percent,
};
use crate::scale::round_half_up;

/// Number of 7-day windows a period is split into.
pub const WEEKS_PER_PERIOD: usize = 4;

/// Inclusive span of civil days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeekWindow {
    pub start: Date,
    pub end: Date,
}

impl WeekWindow {
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Reporting window in a given time zone, usually one calendar month.
#[derive(Debug, Clone)]
pub struct ReportPeriod {
    start: Date,
    end: Date,
    time_zone: TimeZone,
    weeks: [WeekWindow; WEEKS_PER_PERIOD],
}

impl ReportPeriod {
    /// A period from `start` to `end` inclusive, in UTC.
    pub fn new(start: Date, end: Date) -> Result<Self, ScoringError> {
        if end < start {
            return Err(ScoringError::InvalidPeriod { start, end });
        }

        let mut weeks = [WeekWindow { start, end: start }; WEEKS_PER_PERIOD];
        for (i, week) in weeks.iter_mut().enumerate() {
            let week_start = start.checked_add(Span::new().days(7 * i as i64))?;
            *week = WeekWindow {
                start: week_start,
                end: week_start.checked_add(Span::new().days(6))?,
            };
        }

        Ok(Self {
            start,
            end,
            time_zone: TimeZone::UTC,
            weeks,
        })
    }

    pub fn month(year: i16, month: i8) -> Result<Self, ScoringError> {
        let start = Date::new(year, month, 1)?;
        Self::new(start, start.last_of_month())
    }

    /// Parse a `YYYY-MM` month.
    pub fn parse_month(month: &str) -> Result<Self, ScoringError> {
        let invalid = || ScoringError::InvalidMonth(month.to_string());
        let (year, mon) = month.trim().split_once('-').ok_or_else(invalid)?;
        let year: i16 = year.parse().map_err(|_| invalid())?;
        let mon: i8 = mon.parse().map_err(|_| invalid())?;
        Self::month(year, mon).map_err(|_| invalid())
    }

    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Four consecutive 7-day windows from the first day. Days after the
    /// 28th are not part of any week.
    pub fn weeks(&self) -> &[WeekWindow; WEEKS_PER_PERIOD] {
        &self.weeks
    }

    /// The civil date of `timestamp` in this period's time zone.
    pub fn local_date(&self, timestamp: jiff::Timestamp) -> Date {
        timestamp.to_zoned(self.time_zone.clone()).date()
    }

    pub fn contains(&self, timestamp: jiff::Timestamp) -> bool {
        let date = self.local_date(timestamp);
        self.start <= date && date <= self.end
    }

    /// First and last instant of the period, both inclusive.
    pub fn bounds(&self) -> Result<(jiff::Timestamp, jiff::Timestamp), ScoringError> {
        let from = self.start.to_zoned(self.time_zone.clone())?.timestamp();
        let to = self
            .end
            .at(23, 59, 59, 999_999_999)
            .to_zoned(self.time_zone.clone())?
            .timestamp();
        Ok((from, to))
    }
}

/// Domains shown as bars on the family report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ObservationalDomain {
    Adl,
    Therapeutic,
    Behavioral,
    Risk,
}

impl ObservationalDomain {
    pub const ALL: [ObservationalDomain; 4] = [
        ObservationalDomain::Adl,
        ObservationalDomain::Therapeutic,
        ObservationalDomain::Behavioral,
        ObservationalDomain::Risk,
    ];

    /// Score for one week. Risk levels go through the same positive-only
    /// level average as ADL here, not the month safety score.
    pub fn week_score(&self, events: &DomainEvents<'_>) -> u8 {
        match self {
            Self::Adl => level_percent::<AdlLevel>(&events.adl),
            Self::Therapeutic => engagement_percent(&events.therapeutic),
            Self::Behavioral => rating_percent(&events.behavioral),
            Self::Risk => level_percent::<RiskLevel>(&events.risk),
        }
        .unwrap_or(0)
    }

    /// Score over a whole period.
    pub fn bar_score(&self, events: &DomainEvents<'_>) -> u8 {
        match self {
            Self::Risk => safety_percent(&events.risk).unwrap_or(0),
            _ => self.week_score(events),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DomainTrend {
    pub domain: ObservationalDomain,
    /// One score per week, 0 when the week has no data.
    pub weeks: Vec<u8>,
    /// Percent change from the first week to the last.
    pub change: i32,
}

/// `round((last - first) / first * 100)`, or 0 when the first week is 0.
pub fn percent_change(first: u8, last: u8) -> i32 {
    if first == 0 {
        return 0;
    }
    let first = f64::from(first);
    round_half_up((f64::from(last) - first) / first * 100.0) as i32
}

pub fn weekly_trends(events: &[ClinicalEvent], period: &ReportPeriod) -> Vec<DomainTrend> {
    let dated: Vec<(Date, &ClinicalEvent)> = events
        .iter()
        .map(|event| (period.local_date(event.submitted_at), event))
        .collect();

    let per_week: Vec<DomainEvents<'_>> = period
        .weeks()
        .iter()
        .map(|window| {
            DomainEvents::collect(
                dated
                    .iter()
                    .filter(|(date, _)| window.contains(*date))
                    .map(|(_, event)| *event),
            )
        })
        .collect();

    ObservationalDomain::ALL
        .into_iter()
        .map(|domain| {
            let weeks: Vec<u8> = per_week.iter().map(|w| domain.week_score(w)).collect();
            let first = weeks.first().copied().unwrap_or(0);
            let last = weeks.last().copied().unwrap_or(0);
            DomainTrend {
                domain,
                change: percent_change(first, last),
                weeks,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DomainBar {
    pub domain: ObservationalDomain,
    pub score: u8,
}

pub fn monthly_bars(events: &DomainEvents<'_>) -> Vec<DomainBar> {
    ObservationalDomain::ALL
        .into_iter()
        .map(|domain| DomainBar {
            domain,
            score: domain.bar_score(events),
        })
        .collect()
}
