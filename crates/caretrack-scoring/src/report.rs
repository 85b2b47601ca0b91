use serde::{Deserialize, Serialize};
use ts_rs::TS;

use caretrack_core::models::event::ClinicalEvent;
use caretrack_core::models::weights::RecoveryWeights;

use crate::composite::{Contribution, contributions, master_recovery_score};
use crate::indices::{SubIndices, compute_sub_indices};
use crate::normalize::{
    AdlSummary, DomainEvents, RatingAverage, RiskSummary, TherapeuticSummary, rating_average,
    summarize_adl, summarize_risk, summarize_therapeutic,
};
use crate::relapse::{RelapseRiskCard, RelapseTrend, relapse_risk_card, relapse_risk_trend};
use crate::trend::{DomainBar, DomainTrend, ReportPeriod, monthly_bars, weekly_trends};

/// Per-section aggregates behind the family report's narrative lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SectionSummaries {
    pub adl: Option<AdlSummary>,
    pub therapeutic: Option<TherapeuticSummary>,
    pub behavioral: Option<RatingAverage>,
    pub psychiatric: Option<RatingAverage>,
    pub risk: Option<RiskSummary>,
}

impl SectionSummaries {
    pub fn from_events(events: &DomainEvents<'_>) -> Self {
        Self {
            adl: summarize_adl(&events.adl),
            therapeutic: summarize_therapeutic(&events.therapeutic),
            behavioral: rating_average(&events.behavioral),
            psychiatric: rating_average(&events.psychiatric),
            risk: summarize_risk(&events.risk),
        }
    }
}

/// Everything a report view or export needs. Renderers read this as is and
/// never go back to the raw events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecoveryReport {
    pub period_start: jiff::civil::Date,
    pub period_end: jiff::civil::Date,
    pub event_count: u32,
    pub sub_indices: SubIndices,
    /// Master Recovery Score; `None` means show an empty state, not 0.
    pub master_recovery_score: Option<u8>,
    pub contributions: Vec<Contribution>,
    pub relapse_risk: Option<RelapseRiskCard>,
    pub relapse_trend: RelapseTrend,
    pub weekly_trends: Vec<DomainTrend>,
    pub monthly_bars: Vec<DomainBar>,
    pub summaries: SectionSummaries,
}

/// Score one patient's events for `period`.
///
/// `events` should be what the event source returned for the period; order
/// does not matter. An empty list is a normal input and yields a report
/// with every index absent.
pub fn compute_recovery_report(
    events: &[ClinicalEvent],
    weights: &RecoveryWeights,
    period: &ReportPeriod,
) -> RecoveryReport {
    let by_domain = DomainEvents::collect(events);
    let sub_indices = compute_sub_indices(&by_domain);
    let master_recovery_score = master_recovery_score(&sub_indices, weights);

    tracing::debug!(
        events = events.len(),
        available_indices = sub_indices.available(),
        master_recovery_score = ?master_recovery_score,
        period_start = %period.start(),
        "computed recovery report"
    );

    RecoveryReport {
        period_start: period.start(),
        period_end: period.end(),
        event_count: u32::try_from(events.len()).unwrap_or(u32::MAX),
        contributions: contributions(&sub_indices, weights),
        master_recovery_score,
        sub_indices,
        relapse_risk: relapse_risk_card(by_domain.relapse_risk.iter().copied()),
        relapse_trend: relapse_risk_trend(
            by_domain.relapse_risk.iter().copied(),
            period.time_zone(),
        ),
        weekly_trends: weekly_trends(events, period),
        monthly_bars: monthly_bars(&by_domain),
        summaries: SectionSummaries::from_events(&by_domain),
    }
}
