mod common;

use caretrack_core::models::event::MedicationRecord;
use caretrack_core::models::levels::{AdlLevel, Attendance, Compliance, Engagement, RiskLevel};
use caretrack_scoring::normalize::{
    AdlLevelSummary, EngagementTrend, RiskOutlook, compliance_percent, engagement_percent,
    level_percent, rating_average, rating_percent, safety_percent, summarize_adl,
    summarize_risk, summarize_therapeutic,
};
use caretrack_scoring::scale::{OrdinalScale, label_score};
use common::{activities, levels, ratings};
use proptest::prelude::*;

#[test]
fn rating_percent_pools_every_occurrence() {
    let a = ratings(&[("Mood & Affect", 4), ("Insight", 2)]);
    let b = ratings(&[("Mood & Affect", 5)]);
    // (4 + 2 + 5) / 3 / 5 * 100 = 73.3
    assert_eq!(rating_percent(&[&a, &b]), Some(73));
}

#[test]
fn rating_percent_is_none_without_ratings() {
    assert_eq!(rating_percent(&[]), None);
    let empty = ratings(&[]);
    assert_eq!(rating_percent(&[&empty]), None);
}

#[test]
fn out_of_range_ratings_are_excluded() {
    let sheet = ratings(&[("Orientation", 0), ("Sleep Pattern", 9), ("Appetite", 5)]);
    assert_eq!(rating_percent(&[&sheet]), Some(100));

    let only_bad = ratings(&[("Orientation", -1)]);
    assert_eq!(rating_percent(&[&only_bad]), None);
}

#[test]
fn all_minimum_ratings_score_twenty() {
    let sheet = ratings(&[("Cooperation", 1), ("Wandering", 1)]);
    assert_eq!(rating_percent(&[&sheet]), Some(20));
}

#[test]
fn rating_average_rounds_to_one_decimal() {
    let sheet = ratings(&[("Cooperation", 4), ("Peer Interaction", 3), ("Wandering", 3)]);
    let avg = rating_average(&[&sheet]).unwrap();
    assert_eq!(avg.count, 3);
    assert_eq!(avg.average, 3.3);
    assert_eq!(rating_average(&[]), None);
}

#[test]
fn ordinal_tables_are_separate() {
    assert_eq!(label_score::<AdlLevel>("Independent"), 5);
    assert_eq!(label_score::<AdlLevel>("Min Assist"), 3);
    assert_eq!(label_score::<AdlLevel>("Dependent"), 0);
    assert_eq!(label_score::<AdlLevel>("None"), 0);

    assert_eq!(label_score::<RiskLevel>("None"), 5);
    assert_eq!(label_score::<RiskLevel>("Low"), 4);
    assert_eq!(label_score::<RiskLevel>("Medium"), 2);
    assert_eq!(label_score::<RiskLevel>("High"), 1);
    assert_eq!(label_score::<RiskLevel>("Independent"), 0);
    assert_eq!(RiskLevel::High.score(), 1);
}

#[test]
fn level_percent_skips_zero_scored_entries() {
    let sheet = levels(&[
        ("Dressing", "Independent"),
        ("Feeding", "Supervised"),
        ("Laundry", "Dependent"),
        ("Phone Use", "unknown"),
    ]);
    // (5 + 4) / 2 * 20
    assert_eq!(level_percent::<AdlLevel>(&[&sheet]), Some(90));

    let dependent = levels(&[("Dressing", "Dependent")]);
    assert_eq!(level_percent::<AdlLevel>(&[&dependent]), None);
}

#[test]
fn safety_percent_counts_unknown_labels_as_zero() {
    let sheet = levels(&[("Absconding Risk", "None"), ("Vulnerability", "n/a")]);
    // (5 + 0) / 2 * 20
    assert_eq!(safety_percent(&[&sheet]), Some(50));
    assert_eq!(safety_percent(&[]), None);
}

#[test]
fn adl_three_distinct_levels_is_mixed() {
    let a = levels(&[("Dressing", "Independent"), ("Feeding", "Independent")]);
    let b = levels(&[("Dressing", "Supervised"), ("Feeding", "Supervised")]);
    let c = levels(&[("Laundry", "Dependent")]);

    let summary = summarize_adl(&[&a, &b, &c]).unwrap();
    assert_eq!(summary.count, 5);
    assert_eq!(summary.level, AdlLevelSummary::Mixed);
}

#[test]
fn adl_two_distinct_levels_reports_mode() {
    let a = levels(&[
        ("Dressing", "Independent"),
        ("Feeding", "Independent"),
        ("Mobility", "Independent"),
    ]);
    let b = levels(&[("Laundry", "Supervised")]);

    let summary = summarize_adl(&[&a, &b]).unwrap();
    assert_eq!(summary.count, 4);
    assert_eq!(summary.level, AdlLevelSummary::Level(AdlLevel::Independent));
}

#[test]
fn adl_tie_goes_to_canonical_order() {
    let sheet = levels(&[("Dressing", "Supervised"), ("Feeding", "Min Assist")]);
    let summary = summarize_adl(&[&sheet]).unwrap();
    assert_eq!(summary.level, AdlLevelSummary::Level(AdlLevel::Supervised));
}

#[test]
fn adl_without_recognized_levels_is_various() {
    let sheet = levels(&[("Dressing", "Prompting")]);
    let summary = summarize_adl(&[&sheet]).unwrap();
    assert_eq!(summary.count, 1);
    assert_eq!(summary.level, AdlLevelSummary::Various);
    assert_eq!(summarize_adl(&[]), None);
}

#[test]
fn therapeutic_summary_compares_active_to_passive() {
    let sheet = activities(&[
        ("Group Therapy", Some(Attendance::Present), Some(Engagement::Active)),
        ("Yoga / Exercise", Some(Attendance::Present), Some(Engagement::Active)),
        ("Life Skills", Some(Attendance::Absent), Some(Engagement::Minimal)),
    ]);
    let summary = summarize_therapeutic(&[&sheet]).unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.present_count, 2);
    assert_eq!(summary.engagement, EngagementTrend::Active);

    let even = activities(&[
        ("Recreation", None, Some(Engagement::Active)),
        ("Psychoeducation", None, Some(Engagement::Passive)),
    ]);
    assert_eq!(
        summarize_therapeutic(&[&even]).unwrap().engagement,
        EngagementTrend::Mixed
    );
    assert_eq!(summarize_therapeutic(&[]), None);
}

#[test]
fn engagement_percent_gives_partial_credit_for_unspecified_attendance() {
    let sheet = activities(&[
        ("Group Therapy", Some(Attendance::Present), Some(Engagement::Active)),
        ("Life Skills", Some(Attendance::Absent), None),
        ("Recreation", Some(Attendance::Refused), Some(Engagement::Passive)),
        ("Psychoeducation", None, None),
    ]);
    // (5 + 0 + 2 + 1) / 20 * 100
    assert_eq!(engagement_percent(&[&sheet]), Some(40));
    assert_eq!(engagement_percent(&[]), None);
}

#[test]
fn risk_summary_flags_medium_or_high_case_insensitively() {
    let calm = levels(&[("Suicidal Ideation", "None"), ("Absconding Risk", "Low")]);
    let summary = summarize_risk(&[&calm]).unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.outlook(), RiskOutlook::WithinRange);

    let elevated = levels(&[("Aggression / Violence", "medium")]);
    let summary = summarize_risk(&[&calm, &elevated]).unwrap();
    assert_eq!(summary.count, 3);
    assert!(summary.elevated);
    assert_eq!(summary.outlook(), RiskOutlook::Monitored);
}

#[test]
fn compliance_ignores_records_without_compliance() {
    let full = MedicationRecord::with_compliance(Compliance::Full);
    let partial = MedicationRecord::with_compliance(Compliance::Partial);
    let silent = MedicationRecord {
        bp: Some("120/80".to_string()),
        ..MedicationRecord::default()
    };
    assert_eq!(compliance_percent(&[&full, &partial, &silent]), Some(75));

    let refused = MedicationRecord::with_compliance(Compliance::Refused);
    assert_eq!(compliance_percent(&[&refused]), Some(0));
    assert_eq!(compliance_percent(&[&silent]), None);
}

proptest! {
    #[test]
    fn raising_a_rating_never_lowers_the_score(
        values in proptest::collection::vec(1i64..=5, 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let i = pick.index(values.len());
        prop_assume!(values[i] < 5);

        let before = ratings_from(&values);
        let mut raised = values.clone();
        raised[i] += 1;
        let after = ratings_from(&raised);

        let low = rating_percent(&[&before]).unwrap();
        let high = rating_percent(&[&after]).unwrap();
        prop_assert!(low <= high);
        prop_assert!(high <= 100);
    }
}

fn ratings_from(values: &[i64]) -> caretrack_core::models::event::RatingSheet {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (format!("param-{i}"), v))
        .collect()
}
