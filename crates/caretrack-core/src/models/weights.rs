use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Relative weight of each sub-index in the Master Recovery Score.
///
/// Weights are conventionally 0-100 and sum to 100, but the scorer
/// renormalizes over whatever indices are available, so any non-negative set
/// works. [`RecoveryWeights::validate`] is for hosts that want to enforce the
/// convention when weights are edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecoveryWeights {
    pub symptom_reduction: u32,
    pub insight: u32,
    pub function: u32,
    pub family_system: u32,
    pub medication_adherence: u32,
}

impl Default for RecoveryWeights {
    fn default() -> Self {
        Self {
            symptom_reduction: 30,
            insight: 20,
            function: 25,
            family_system: 15,
            medication_adherence: 10,
        }
    }
}

impl RecoveryWeights {
    pub fn named(&self) -> [(&'static str, u32); 5] {
        [
            ("symptom_reduction", self.symptom_reduction),
            ("insight", self.insight),
            ("function", self.function),
            ("family_system", self.family_system),
            ("medication_adherence", self.medication_adherence),
        ]
    }

    pub fn total(&self) -> u32 {
        self.named().iter().map(|(_, w)| w).sum()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in self.named() {
            if value > 100 {
                return Err(CoreError::WeightOutOfRange { name, value });
            }
        }
        match self.total() {
            100 => Ok(()),
            total => Err(CoreError::WeightSum(total)),
        }
    }
}
