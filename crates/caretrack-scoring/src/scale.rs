//! Ordinal score tables and rounding shared by the normalizers.

use caretrack_core::models::levels::{AdlLevel, RiskLevel};

/// Highest value on the 0-5 ordinal scale and on the 1-5 rating scale.
pub const SCALE_MAX: f64 = 5.0;

/// A label set that maps onto the 0-5 ordinal scale.
///
/// ADL and risk levels have separate tables even though their numbers line
/// up, so either scale can be re-weighted without touching the other.
pub trait OrdinalScale: Sized + Copy {
    fn parse(label: &str) -> Option<Self>;

    fn score(&self) -> u8;
}

impl OrdinalScale for AdlLevel {
    fn parse(label: &str) -> Option<Self> {
        AdlLevel::from_label(label)
    }

    fn score(&self) -> u8 {
        match self {
            AdlLevel::Independent => 5,
            AdlLevel::Supervised => 4,
            AdlLevel::MinAssist => 3,
            AdlLevel::ModAssist => 2,
            AdlLevel::MaxAssist => 1,
            AdlLevel::Dependent => 0,
        }
    }
}

/// Higher is safer: `None` risk scores like full independence.
impl OrdinalScale for RiskLevel {
    fn parse(label: &str) -> Option<Self> {
        RiskLevel::from_label(label)
    }

    fn score(&self) -> u8 {
        match self {
            RiskLevel::None => 5,
            RiskLevel::Low => 4,
            RiskLevel::Medium => 2,
            RiskLevel::High => 1,
        }
    }
}

/// Score of a free-text label on scale `S`; unknown labels score 0.
pub fn label_score<S: OrdinalScale>(label: &str) -> u8 {
    S::parse(label).map(|level| level.score()).unwrap_or(0)
}

/// Round half toward positive infinity (`-2.5` rounds to `-2`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// `round(sum / count / max * 100)`, or `None` for an empty tally.
pub fn percent_of_scale(sum: f64, count: u32, max: f64) -> Option<u8> {
    if count == 0 || max <= 0.0 {
        return None;
    }
    let pct = round_half_up(sum / f64::from(count) / max * 100.0);
    Some(pct.clamp(0.0, 100.0) as u8)
}
