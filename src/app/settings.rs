use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    cli::{Cli, IconMode, UnitsArg},
    domain::weather::{Location, Units},
};

pub const CONFIG_DIR_ENV: &str = "ABWEATHER_CONFIG_DIR";

/// Answer to the location prompt, remembered across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LocationPermission {
    #[default]
    Undetermined,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuntimeSettings {
    pub units: Units,
    pub icon_mode: IconMode,
    pub onboarding_complete: bool,
    pub location_permission: LocationPermission,
    pub last_location: Option<Location>,
}

impl RuntimeSettings {
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        Self {
            units: units_from_cli(cli.units),
            icon_mode: cli.icon_mode().unwrap_or_default(),
            onboarding_complete: cli.skip_onboarding,
            ..Self::default()
        }
    }

    /// Flags given on the command line win over what was saved.
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.units != UnitsArg::Celsius {
            self.units = Units::Fahrenheit;
        }
        if let Some(mode) = cli.icon_mode() {
            self.icon_mode = mode;
        }
        if cli.skip_onboarding {
            self.onboarding_complete = true;
        } else if cli.reset_onboarding {
            self.onboarding_complete = false;
        }
    }
}

pub(crate) fn units_from_cli(units: UnitsArg) -> Units {
    match units {
        UnitsArg::Celsius => Units::Celsius,
        UnitsArg::Fahrenheit => Units::Fahrenheit,
    }
}

pub fn load_runtime_settings(cli: &Cli, enable_disk: bool) -> (RuntimeSettings, Option<PathBuf>) {
    if !enable_disk {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    }
    let path = settings_path(std::env::var_os(CONFIG_DIR_ENV), std::env::var_os("HOME"));
    let settings = load_runtime_settings_from(cli, path.as_deref());
    (settings, path)
}

pub fn load_runtime_settings_from(cli: &Cli, path: Option<&Path>) -> RuntimeSettings {
    let mut settings = RuntimeSettings::from_cli_defaults(cli);
    if let Some(path) = path
        && let Ok(content) = fs::read_to_string(path)
    {
        match serde_json::from_str::<RuntimeSettings>(&content) {
            Ok(saved) => settings = saved,
            Err(err) => warn!(path = %path.display(), %err, "ignoring unreadable settings file"),
        }
    }
    settings.apply_cli_overrides(cli);
    settings
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

pub(crate) fn settings_path(config_dir: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(base) = config_dir.filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = home?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("abweather")
            .join("settings.json"),
    )
}
