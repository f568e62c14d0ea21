use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::PathBuf,
    sync::{PoisonError, RwLock},
    time::Duration,
};

use crate::sensing::Baseline;

const DEFAULT_DATA_DIR: &str = "./xstep-data";
const SETTINGS_FILE: &str = "settings.json";
const DATABASE_FILE: &str = "xstep.sqlite3";

/// Process-level options read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeOptions {
    pub data_dir: PathBuf,
    pub debug: bool,
}

impl RuntimeOptions {
    pub fn from_env() -> Self {
        let data_dir = env::var_os("XSTEP_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let debug = env::var("XSTEP_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self { data_dir, debug }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitorSettings {
    pub baseline_pressure: f64,
    pub baseline_temperature: f64,
    pub history_interval_secs: u64,
    pub dark_mode: bool,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            baseline_pressure: 45.0,
            baseline_temperature: 34.0,
            history_interval_secs: 60,
            dark_mode: true,
        }
    }
}

impl MonitorSettings {
    pub fn baseline(&self) -> Baseline {
        Baseline {
            pressure: self.baseline_pressure,
            temperature: self.baseline_temperature,
        }
    }

    pub fn history_interval(&self) -> Duration {
        Duration::from_secs(self.history_interval_secs.max(1))
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<MonitorSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring malformed settings at {}: {}", path.display(), err);
                MonitorSettings::default()
            })
        } else {
            MonitorSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn get(&self) -> MonitorSettings {
        *self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update(&self, settings: MonitorSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = settings;
        self.persist(&guard)
    }

    /// Flips dark mode and returns the new value.
    pub fn toggle_theme(&self) -> Result<bool> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        guard.dark_mode = !guard.dark_mode;
        self.persist(&guard)?;
        Ok(guard.dark_mode)
    }

    fn persist(&self, data: &MonitorSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
