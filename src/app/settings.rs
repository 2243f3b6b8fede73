use std::{
    ffi::OsString,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{cli::Cli, domain::chart::ChartOrientation};

pub const CONFIG_DIR_ENV: &str = "SKYCAST_CONFIG_DIR";
const SETTINGS_FILE: &str = "settings.json";

/// User choices that survive restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub chart_orientation: ChartOrientation,
}

/// Reads saved preferences. A missing, unreadable or malformed file yields
/// the defaults.
#[must_use]
pub fn load_preferences(path: Option<&Path>) -> Preferences {
    let Some(path) = path else {
        return Preferences::default();
    };
    let Ok(content) = fs::read_to_string(path) else {
        return Preferences::default();
    };
    match serde_json::from_str::<Preferences>(&content) {
        Ok(saved) => saved,
        Err(err) => {
            log::warn!("ignoring malformed preferences at {}: {err}", path.display());
            Preferences::default()
        }
    }
}

pub fn save_preferences(path: &Path, preferences: &Preferences) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload = serde_json::to_string_pretty(preferences)
        .context("serializing settings payload failed")?;

    let mut file = open_private(path).context("opening settings file failed")?;
    file.write_all(payload.as_bytes())
        .context("writing settings file failed")?;
    log::info!("saved preferences to {}", path.display());
    Ok(())
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; tighten files that already existed.
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

/// Orientation for this session: the command line wins over the saved value.
#[must_use]
pub fn session_orientation(cli: &Cli, preferences: &Preferences) -> ChartOrientation {
    cli.orientation
        .map_or(preferences.chart_orientation, ChartOrientation::from)
}

#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    config_dir_from(
        std::env::var_os(CONFIG_DIR_ENV),
        std::env::var_os("HOME"),
    )
}

fn config_dir_from(override_dir: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(base) = override_dir.filter(|b| !b.is_empty()) {
        return Some(PathBuf::from(base));
    }
    let home = home?;
    Some(PathBuf::from(home).join(".config").join("skycast"))
}

#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(SETTINGS_FILE))
}
