//! Master Recovery Score: weighted composite of the available sub-indices.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use caretrack_core::models::weights::RecoveryWeights;

use crate::indices::{SubIndex, SubIndices};
use crate::scale::round_half_up;

/// One sub-index that counted towards the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Contribution {
    pub index: SubIndex,
    pub value: u8,
    pub weight: u32,
}

/// Weighted indices, in weight-table order. RRS is reported on its own and
/// never enters the composite.
fn weight_table(weights: &RecoveryWeights) -> [(SubIndex, u32); 5] {
    [
        (SubIndex::Ssi, weights.symptom_reduction),
        (SubIndex::Ifi, weights.insight),
        (SubIndex::Fri, weights.function),
        (SubIndex::Fsi, weights.family_system),
        (SubIndex::Bsi, weights.medication_adherence),
    ]
}

/// The (index, value, weight) triples that are available.
pub fn contributions(indices: &SubIndices, weights: &RecoveryWeights) -> Vec<Contribution> {
    weight_table(weights)
        .into_iter()
        .filter_map(|(index, weight)| {
            indices.get(index).map(|value| Contribution {
                index,
                value,
                weight,
            })
        })
        .collect()
}

/// Renormalizes over the indices that are present: a missing index drops
/// out of both numerator and denominator. `None` when no weighted index is
/// available, which callers must show as an empty state rather than 0.
pub fn master_recovery_score(indices: &SubIndices, weights: &RecoveryWeights) -> Option<u8> {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0u64;
    for c in contributions(indices, weights) {
        weighted_sum += f64::from(c.value) * f64::from(c.weight);
        total_weight += u64::from(c.weight);
    }

    if total_weight == 0 {
        return None;
    }
    let score = round_half_up(weighted_sum / total_weight as f64);
    Some(score.clamp(0.0, 100.0) as u8)
}
