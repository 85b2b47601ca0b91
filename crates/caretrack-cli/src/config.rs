use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use caretrack_core::models::weights::RecoveryWeights;

/// Layout version written by this build. Raising it needs a matching step
/// in `MIGRATIONS`.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareTrackConfig {
    /// Layout version the file was written with.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub weights: RecoveryWeights,
    /// IANA zone the facility records shifts in. Added in v1.
    pub time_zone: String,
    /// Default assessment export to read events from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_path: Option<PathBuf>,
}

impl Default for CareTrackConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            weights: RecoveryWeights::default(),
            time_zone: "UTC".to_string(),
            events_path: None,
        }
    }
}

impl CareTrackConfig {
    pub fn time_zone(&self) -> eyre::Result<jiff::tz::TimeZone> {
        jiff::tz::TimeZone::get(&self.time_zone)
            .map_err(|e| eyre::eyre!("unknown time zone '{}': {e}", self.time_zone))
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("caretrack").join("config.json"))
}

/// Read the config at `path`, upgrading older layouts in memory. A missing
/// file is a fresh install and yields the defaults.
pub fn load_config(path: &Path) -> eyre::Result<CareTrackConfig> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(CareTrackConfig::default());
        }
        Err(e) => return Err(eyre::eyre!("cannot read {}: {e}", path.display())),
    };

    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let version = stored_version(&value);
    Ok(serde_json::from_value(migrate(value, version)?)?)
}

/// Layouts written before versioning carry no `config_version` and count as 0.
fn stored_version(value: &serde_json::Value) -> u32 {
    value
        .get("config_version")
        .and_then(serde_json::Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

type Migration = fn(&mut serde_json::Map<String, serde_json::Value>);

/// Upgrade steps in order; entry `i` takes a version `i` layout to `i + 1`.
const MIGRATIONS: [Migration; CURRENT_VERSION as usize] = [add_time_zone];

fn add_time_zone(config: &mut serde_json::Map<String, serde_json::Value>) {
    config
        .entry("time_zone")
        .or_insert_with(|| serde_json::Value::from("UTC"));
}

/// Bring a stored layout at `from_version` up to [`CURRENT_VERSION`].
pub fn migrate(
    mut value: serde_json::Value,
    from_version: u32,
) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}); \
             upgrade caretrack to read it"
        ));
    }

    let config = value
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("config must be a JSON object"))?;
    for (step, migration) in MIGRATIONS.iter().enumerate().skip(from_version as usize) {
        migration(config);
        tracing::info!(from = step, to = step + 1, "upgraded config layout");
    }
    config.insert(
        "config_version".to_string(),
        serde_json::Value::from(CURRENT_VERSION),
    );

    Ok(value)
}

/// Write `config` stamped with [`CURRENT_VERSION`]. The file is replaced in
/// one rename and is readable by the owner only.
pub fn save_config(config: &CareTrackConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    let body = serde_json::to_vec_pretty(&CareTrackConfig {
        config_version: CURRENT_VERSION,
        ..config.clone()
    })?;

    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, body)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&staging, std::fs::Permissions::from_mode(0o600))?;
    }
    std::fs::rename(&staging, path)?;

    tracing::info!(path = %path.display(), "config written");
    Ok(())
}
