#![allow(dead_code)]

use caretrack_core::models::event::{
    ActivityRecord, ActivitySheet, Assessment, ClinicalEvent, LevelSheet, RatingSheet,
    RelapseRiskRecord,
};
use caretrack_core::models::levels::{Attendance, Engagement};

pub fn at(timestamp: &str) -> jiff::Timestamp {
    timestamp.parse().unwrap()
}

pub fn event(timestamp: &str, assessment: Assessment) -> ClinicalEvent {
    ClinicalEvent::new("CT-001", at(timestamp), assessment)
}

pub fn ratings(pairs: &[(&str, i64)]) -> RatingSheet {
    pairs.iter().map(|&(k, v)| (k, v)).collect()
}

pub fn levels(pairs: &[(&str, &str)]) -> LevelSheet {
    pairs.iter().map(|&(k, v)| (k, v)).collect()
}

pub fn activities(pairs: &[(&str, Option<Attendance>, Option<Engagement>)]) -> ActivitySheet {
    pairs
        .iter()
        .map(|&(k, a, e)| (k, ActivityRecord::new(a, e)))
        .collect()
}

pub fn relapse(timestamp: &str, factors: (i64, i64, i64)) -> ClinicalEvent {
    event(
        timestamp,
        Assessment::RelapseRisk(RelapseRiskRecord::new(factors.0, factors.1, factors.2)),
    )
}
