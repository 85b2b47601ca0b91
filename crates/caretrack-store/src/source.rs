use std::future::Future;

use caretrack_core::models::event::ClinicalEvent;

use crate::error::StoreError;

/// Supplies a patient's assessment events for a time range.
///
/// Implementations return events whose `submitted_at` lies within
/// `[from, to]` inclusive, in any order, and an empty list (not an error)
/// when the patient has none. Errors are reserved for the source itself
/// failing.
pub trait EventSource: Send + Sync {
    fn fetch_events(
        &self,
        patient_id: &str,
        from: jiff::Timestamp,
        to: jiff::Timestamp,
    ) -> impl Future<Output = Result<Vec<ClinicalEvent>, StoreError>> + Send;
}

/// Inclusive on both ends.
pub fn in_range(event: &ClinicalEvent, from: jiff::Timestamp, to: jiff::Timestamp) -> bool {
    from <= event.submitted_at && event.submitted_at <= to
}
