mod common;

use caretrack_core::models::event::{Assessment, ClinicalEvent, RelapseRiskRecord};
use caretrack_scoring::relapse::{
    RelapseRiskLevel, relapse_risk_card, relapse_risk_trend, relapse_total,
};
use common::{at, event, relapse};
use jiff::civil::date;
use jiff::tz::TimeZone;

#[test]
fn card_thresholds() {
    let cases = [
        ((1, 1, 1), 3, RelapseRiskLevel::Low),
        ((2, 2, 2), 6, RelapseRiskLevel::Moderate),
        ((3, 3, 3), 9, RelapseRiskLevel::High),
        ((0, 2, 2), 4, RelapseRiskLevel::Moderate),
        ((3, 3, 1), 7, RelapseRiskLevel::High),
    ];
    for (factors, total, level) in cases {
        let events = vec![relapse("2026-03-04T12:00:00Z", factors)];
        let card = relapse_risk_card(&events).unwrap();
        assert_eq!(card.total, total, "{factors:?}");
        assert_eq!(card.level, level, "{factors:?}");
    }
}

#[test]
fn no_relapse_events_means_no_card() {
    let events = vec![event(
        "2026-03-04T12:00:00Z",
        Assessment::Behavioral(common::ratings(&[("Cooperation", 3)])),
    )];
    assert_eq!(relapse_risk_card(&events), None);
}

#[test]
fn card_uses_most_recent_submission() {
    let events = vec![
        relapse("2026-03-20T12:00:00Z", (1, 0, 0)),
        relapse("2026-03-05T12:00:00Z", (3, 3, 3)),
    ];
    let card = relapse_risk_card(&events).unwrap();
    assert_eq!(card.total, 1);
    assert_eq!(card.submitted_at, at("2026-03-20T12:00:00Z"));
}

#[test]
fn equal_timestamps_resolve_to_last_in_order() {
    let events = vec![
        relapse("2026-03-05T12:00:00Z", (0, 0, 0)),
        relapse("2026-03-05T12:00:00Z", (2, 2, 2)),
    ];
    let card = relapse_risk_card(&events).unwrap();
    assert_eq!(card.total, 6);
}

#[test]
fn out_of_range_factors_are_clamped() {
    assert_eq!(relapse_total(&RelapseRiskRecord::new(7, -2, 3)), 6);
    let card = relapse_risk_card(&[relapse("2026-03-05T12:00:00Z", (9, 9, 9))]).unwrap();
    assert_eq!(card.total, 9);
    assert_eq!(card.recovery_score(), 0);
}

#[test]
fn trend_keeps_latest_per_iso_week_in_order() {
    let events = vec![
        relapse("2026-03-10T09:00:00Z", (2, 2, 2)),
        relapse("2026-03-03T09:00:00Z", (3, 3, 3)),
        relapse("2026-03-05T09:00:00Z", (1, 0, 0)),
        relapse("2026-03-11T09:00:00Z", (0, 1, 0)),
    ];
    let trend = relapse_risk_trend(&events, &TimeZone::UTC);
    assert!(trend.is_sufficient());
    assert_eq!(trend.points.len(), 2);

    assert_eq!(trend.points[0].week, "2026-W10");
    assert_eq!(trend.points[0].total, 1);
    assert_eq!(trend.points[0].level, RelapseRiskLevel::Low);

    assert_eq!(trend.points[1].week, "2026-W11");
    assert_eq!(trend.points[1].total, 1);
}

#[test]
fn declared_week_start_overrides_submission_week() {
    let late_entry = event(
        "2026-03-16T09:00:00Z",
        Assessment::RelapseRisk(
            RelapseRiskRecord::new(3, 3, 0).with_week_start(date(2026, 3, 9)),
        ),
    );
    let trend = relapse_risk_trend(&[late_entry], &TimeZone::UTC);
    assert_eq!(trend.points.len(), 1);
    assert_eq!(trend.points[0].week, "2026-W11");
    assert_eq!(trend.points[0].level, RelapseRiskLevel::Moderate);
    assert!(!trend.is_sufficient());
}

#[test]
fn week_boundary_follows_time_zone() {
    // Sunday 20:00 in New York is already Monday in UTC.
    let events = vec![relapse("2026-03-09T00:30:00Z", (1, 1, 1))];
    let utc = relapse_risk_trend(&events, &TimeZone::UTC);
    assert_eq!(utc.points[0].week, "2026-W11");

    let new_york = TimeZone::fixed(jiff::tz::offset(-4));
    let local = relapse_risk_trend(&events, &new_york);
    assert_eq!(local.points[0].week, "2026-W10");
}

#[test]
fn empty_input_has_empty_trend() {
    let none: Vec<ClinicalEvent> = Vec::new();
    let trend = relapse_risk_trend(&none, &TimeZone::UTC);
    assert!(trend.points.is_empty());
    assert!(!trend.is_sufficient());
}
