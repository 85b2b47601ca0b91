//! Stored assessment documents and their translation into typed events.
//!
//! Documents come from free-form staff input collected over years, so the
//! translation is lenient: values of the wrong type are dropped, unknown
//! labels become `None`, and only a missing section or timestamp makes a
//! document unusable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use caretrack_core::models::event::{
    ActivityRecord, ActivitySheet, Assessment, ClinicalDomain, ClinicalEvent, LevelSheet,
    MedicationRecord, RatingSheet, RelapseRiskRecord,
};
use caretrack_core::models::levels::{Attendance, Compliance, Engagement};

use crate::error::StoreError;

/// An assessment as the document store keeps it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDocument {
    #[serde(default)]
    pub id: Option<String>,
    pub client_id: String,
    pub section: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AssessmentDocument {
    fn display_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| "<no id>".to_string())
    }

    fn malformed(&self, reason: impl Into<String>) -> StoreError {
        StoreError::MalformedDocument {
            id: self.display_id(),
            reason: reason.into(),
        }
    }

    /// Stable event id: the stored id when it is a UUID, otherwise a v5 UUID
    /// derived from it.
    fn event_id(&self) -> Uuid {
        match &self.id {
            Some(id) => Uuid::parse_str(id)
                .unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes())),
            None => Uuid::new_v4(),
        }
    }

    pub fn into_event(self) -> Result<ClinicalEvent, StoreError> {
        let created_at = self
            .created_at
            .as_deref()
            .ok_or_else(|| self.malformed("missing createdAt"))?;
        let submitted_at: jiff::Timestamp = created_at
            .parse()
            .map_err(|e| self.malformed(format!("invalid createdAt '{created_at}': {e}")))?;

        let domain = ClinicalDomain::from_section(&self.section)
            .ok_or_else(|| self.malformed(format!("unknown section '{}'", self.section.trim())))?;

        let payload = self.payload.as_object().cloned().unwrap_or_default();
        let assessment = match domain {
            ClinicalDomain::Psychiatric => Assessment::Psychiatric(rating_sheet(&payload)),
            ClinicalDomain::Behavioral => Assessment::Behavioral(rating_sheet(&payload)),
            ClinicalDomain::ActivitiesOfDailyLiving => Assessment::Adl(level_sheet(&payload)),
            ClinicalDomain::Risk => Assessment::Risk(level_sheet(&payload)),
            ClinicalDomain::Therapeutic => Assessment::Therapeutic(activity_sheet(&payload)),
            ClinicalDomain::Medication => Assessment::Medication(medication_record(&payload)),
            ClinicalDomain::RelapseRisk => Assessment::RelapseRisk(relapse_record(&payload)),
        };

        Ok(ClinicalEvent {
            id: self.event_id(),
            patient_id: self.client_id,
            submitted_at,
            assessment,
        })
    }
}

fn object<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    payload.get(key).and_then(Value::as_object)
}

/// Whole numbers only. `4`, `4.0` and `" 4 "` are accepted; `3.5`, `"3.5"`
/// and `"high"` are not. Form inputs often store numbers as strings.
fn whole_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn rating_sheet(payload: &Map<String, Value>) -> RatingSheet {
    let mut ratings = BTreeMap::new();
    for (parameter, value) in object(payload, "ratings").into_iter().flatten() {
        match whole_number(value) {
            Some(rating) => {
                ratings.insert(parameter.clone(), rating);
            }
            None => {
                tracing::trace!(parameter = parameter.as_str(), %value, "non-numeric rating dropped")
            }
        }
    }
    RatingSheet { ratings }
}

fn level_sheet(payload: &Map<String, Value>) -> LevelSheet {
    let levels = object(payload, "levels")
        .into_iter()
        .flatten()
        .filter_map(|(parameter, value)| {
            value
                .as_str()
                .filter(|s| !s.trim().is_empty())
                .map(|label| (parameter.clone(), label.to_string()))
        })
        .collect();
    LevelSheet { levels }
}

fn activity_sheet(payload: &Map<String, Value>) -> ActivitySheet {
    let activities = object(payload, "activities")
        .into_iter()
        .flatten()
        .map(|(name, value)| {
            let field = |key: &str| value.get(key).and_then(Value::as_str);
            let record = ActivityRecord {
                attendance: field("attendance").and_then(Attendance::from_label),
                engagement: field("engagement").and_then(Engagement::from_label),
            };
            (name.clone(), record)
        })
        .collect();
    ActivitySheet { activities }
}

fn medication_record(payload: &Map<String, Value>) -> MedicationRecord {
    let field = |key: &str| payload.get(key).and_then(text);
    MedicationRecord {
        compliance: payload
            .get("compliance")
            .and_then(Value::as_str)
            .and_then(Compliance::from_label),
        medication_given: field("medicationGiven"),
        side_effects: field("sideEffects"),
        prn_given: field("prnGiven"),
        prn_reason: field("prnReason"),
        lab_due: field("labDue"),
        bp: field("bp"),
        pulse: field("pulse"),
        temp: field("temp"),
        weight: field("weight"),
    }
}

fn relapse_record(payload: &Map<String, Value>) -> RelapseRiskRecord {
    let factor = |key: &str| {
        payload.get(key).and_then(whole_number).unwrap_or_else(|| {
            tracing::trace!(factor = key, "relapse factor missing, scored as 0");
            0
        })
    };
    let week_start = payload
        .get("weekStart")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<jiff::civil::Date>().ok());

    RelapseRiskRecord {
        treatment_non_adherence: factor("treatmentNonAdherence"),
        stressful_situations: factor("stressfulSituations"),
        high_ee: factor("highEE"),
        week_start,
    }
}
