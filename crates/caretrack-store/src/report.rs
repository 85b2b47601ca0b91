use serde::Serialize;

use caretrack_core::models::weights::RecoveryWeights;
use caretrack_scoring::trend::ReportPeriod;
use caretrack_scoring::{RecoveryReport, compute_recovery_report};

use crate::source::EventSource;

/// What a report view renders: the computed report, or an explicit
/// "data unavailable" state when events could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportView {
    Ready { report: Box<RecoveryReport> },
    Unavailable { reason: String },
}

impl ReportView {
    pub fn report(&self) -> Option<&RecoveryReport> {
        match self {
            Self::Ready { report } => Some(&**report),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Fetch a patient's events for `period` and score them.
///
/// A source failure becomes [`ReportView::Unavailable`]; it is never scored
/// as an empty month.
pub async fn load_report<S: EventSource>(
    source: &S,
    patient_id: &str,
    period: &ReportPeriod,
    weights: &RecoveryWeights,
) -> ReportView {
    let (from, to) = match period.bounds() {
        Ok(bounds) => bounds,
        Err(e) => {
            return ReportView::Unavailable {
                reason: e.to_string(),
            };
        }
    };

    match source.fetch_events(patient_id, from, to).await {
        Ok(events) => {
            tracing::debug!(patient_id, events = events.len(), "fetched events");
            ReportView::Ready {
                report: Box::new(compute_recovery_report(&events, weights, period)),
            }
        }
        Err(e) => {
            tracing::warn!(patient_id, error = %e, "event fetch failed");
            ReportView::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}
