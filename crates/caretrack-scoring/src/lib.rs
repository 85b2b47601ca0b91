//! caretrack-scoring
//!
//! Clinical progress aggregation and recovery scoring. Pure and synchronous:
//! every function takes the events it scores as arguments and keeps no state
//! between calls, so the same inputs always produce the same report.
//!
//! Missing data is `None` throughout. Malformed values (ratings outside 1-5,
//! unknown labels, relapse factors outside 0-3) are excluded, scored as 0 or
//! clamped, never raised.

pub mod composite;
pub mod error;
pub mod indices;
pub mod normalize;
pub mod relapse;
pub mod report;
pub mod scale;
pub mod trend;

pub use report::{RecoveryReport, compute_recovery_report};
