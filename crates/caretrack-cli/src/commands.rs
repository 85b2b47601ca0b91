//! Handlers behind the `caretrack` subcommands.

use std::path::{Path, PathBuf};

use caretrack_core::models::weights::RecoveryWeights;
use caretrack_scoring::trend::ReportPeriod;
use caretrack_store::file::JsonFileStore;
use caretrack_store::report::{ReportView, load_report};

use crate::config::{CareTrackConfig, save_config};

/// Build the report for `patient_id` over `month` (`YYYY-MM`).
///
/// `events` overrides the export path from the config. A period the source
/// cannot serve comes back as [`ReportView::Unavailable`], not an error.
pub async fn report(
    config: &CareTrackConfig,
    patient_id: &str,
    month: &str,
    events: Option<PathBuf>,
) -> eyre::Result<ReportView> {
    let events_path = events
        .or_else(|| config.events_path.clone())
        .ok_or_else(|| {
            eyre::eyre!("no events file given; pass --events or set events_path in the config")
        })?;

    let period = ReportPeriod::parse_month(month)?.with_time_zone(config.time_zone()?);
    let store = JsonFileStore::new(events_path);

    tracing::info!(
        patient_id,
        month,
        events = %store.path().display(),
        "building recovery report"
    );
    Ok(load_report(&store, patient_id, &period, &config.weights).await)
}

/// Replace the configured weights after checking they sum to 100.
pub fn set_weights(
    config: &mut CareTrackConfig,
    weights: RecoveryWeights,
    config_path: &Path,
) -> eyre::Result<()> {
    weights.validate()?;
    config.weights = weights;
    save_config(config, config_path)?;
    tracing::info!(total = weights.total(), "recovery weights updated");
    Ok(())
}

pub fn show_weights(weights: &RecoveryWeights) -> String {
    weights
        .named()
        .iter()
        .map(|(name, value)| format!("{name:<22}{value:>4}\n"))
        .chain(std::iter::once(format!("{:<22}{:>4}\n", "total", weights.total())))
        .collect()
}
