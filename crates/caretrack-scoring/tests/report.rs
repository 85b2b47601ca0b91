mod common;

use caretrack_core::models::event::{Assessment, ClinicalEvent, MedicationRecord};
use caretrack_core::models::levels::{Attendance, Compliance, Engagement};
use caretrack_core::models::weights::RecoveryWeights;
use caretrack_scoring::compute_recovery_report;
use caretrack_scoring::normalize::{AdlLevelSummary, EngagementTrend, RiskOutlook};
use caretrack_scoring::relapse::RelapseRiskLevel;
use caretrack_scoring::trend::ReportPeriod;
use common::{activities, event, levels, ratings, relapse};

fn march() -> ReportPeriod {
    ReportPeriod::parse_month("2026-03").unwrap()
}

fn month_of_events() -> Vec<ClinicalEvent> {
    vec![
        event(
            "2026-03-02T08:00:00Z",
            Assessment::Psychiatric(ratings(&[
                ("Mood & Affect", 3),
                ("Insight", 2),
                ("Judgment", 3),
            ])),
        ),
        event(
            "2026-03-02T20:00:00Z",
            Assessment::Behavioral(ratings(&[
                ("Cooperation", 4),
                ("Emotional Regulation", 3),
            ])),
        ),
        event(
            "2026-03-03T09:00:00Z",
            Assessment::Adl(levels(&[("Dressing", "Supervised"), ("Feeding", "Independent")])),
        ),
        event(
            "2026-03-04T11:00:00Z",
            Assessment::Therapeutic(activities(&[(
                "Group Therapy",
                Some(Attendance::Present),
                Some(Engagement::Active),
            )])),
        ),
        event(
            "2026-03-04T12:00:00Z",
            Assessment::Risk(levels(&[("Absconding Risk", "Low")])),
        ),
        event(
            "2026-03-05T08:00:00Z",
            Assessment::Medication(MedicationRecord::with_compliance(Compliance::Partial)),
        ),
        relapse("2026-03-06T10:00:00Z", (1, 2, 1)),
        relapse("2026-03-13T10:00:00Z", (1, 1, 0)),
        event(
            "2026-03-24T20:00:00Z",
            Assessment::Behavioral(ratings(&[("Cooperation", 5)])),
        ),
    ]
}

#[test]
fn empty_events_produce_an_empty_report() {
    let report = compute_recovery_report(&[], &RecoveryWeights::default(), &march());

    assert_eq!(report.event_count, 0);
    assert_eq!(report.sub_indices.available(), 0);
    assert_eq!(report.master_recovery_score, None);
    assert!(report.contributions.is_empty());
    assert_eq!(report.relapse_risk, None);
    assert!(report.relapse_trend.points.is_empty());
    assert_eq!(report.weekly_trends.len(), 4);
    assert!(report.monthly_bars.iter().all(|bar| bar.score == 0));
    assert_eq!(report.summaries.adl, None);
}

#[test]
fn full_month_report() {
    let events = month_of_events();
    let report = compute_recovery_report(&events, &RecoveryWeights::default(), &march());

    assert_eq!(report.event_count, 9);

    let indices = report.sub_indices;
    // (3 + 2 + 3) / 3 / 5
    assert_eq!(indices.ssi, Some(53));
    // Insight 2, Judgment 3, Emotional Regulation 3
    assert_eq!(indices.ifi, Some(53));
    // mean(ADL 90, engagement 100)
    assert_eq!(indices.fri, Some(95));
    assert_eq!(indices.fsi, None);
    assert_eq!(indices.bsi, Some(50));
    // latest relapse total 2: (9 - 2) / 9
    assert_eq!(indices.rrs, Some(78));

    // (53*30 + 53*20 + 95*25 + 50*10) / 85
    assert_eq!(report.master_recovery_score, Some(65));
    assert_eq!(report.contributions.len(), 4);

    let card = report.relapse_risk.unwrap();
    assert_eq!(card.total, 2);
    assert_eq!(card.level, RelapseRiskLevel::Low);
    assert_eq!(report.relapse_trend.points.len(), 2);
    assert_eq!(report.relapse_trend.points[0].level, RelapseRiskLevel::Moderate);

    let summaries = &report.summaries;
    assert_eq!(summaries.adl.unwrap().count, 2);
    assert!(matches!(summaries.adl.unwrap().level, AdlLevelSummary::Level(_)));
    assert_eq!(
        summaries.therapeutic.unwrap().engagement,
        EngagementTrend::Active
    );
    assert_eq!(summaries.behavioral.unwrap().count, 3);
    assert_eq!(summaries.risk.unwrap().outlook(), RiskOutlook::WithinRange);
}

#[test]
fn report_is_idempotent() {
    let events = month_of_events();
    let weights = RecoveryWeights::default();
    let first = compute_recovery_report(&events, &weights, &march());
    let second = compute_recovery_report(&events, &weights, &march());
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn event_order_does_not_change_the_report() {
    let events = month_of_events();
    let mut reversed = events.clone();
    reversed.reverse();

    let weights = RecoveryWeights::default();
    let forward = compute_recovery_report(&events, &weights, &march());
    let backward = compute_recovery_report(&reversed, &weights, &march());
    assert_eq!(forward, backward);
}

#[test]
fn report_serializes_absent_scores_as_null() {
    let report = compute_recovery_report(&[], &RecoveryWeights::default(), &march());
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["master_recovery_score"].is_null());
    assert!(json["sub_indices"]["fsi"].is_null());
    assert_eq!(json["period_start"], "2026-03-01");
}
