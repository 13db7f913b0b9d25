use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, sync::PoisonError, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub name: String,
    pub age: u32,
    pub notifications_enabled: bool,
    /// Minutes between readings.
    pub monitoring_interval: u32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            name: "User".into(),
            age: 30,
            notifications_enabled: true,
            monitoring_interval: 5,
        }
    }
}

impl UserSettings {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("name must not be empty");
        }
        if !(1..=120).contains(&self.age) {
            bail!("age must be between 1 and 120, got {}", self.age);
        }
        if !(1..=60).contains(&self.monitoring_interval) {
            bail!(
                "monitoring interval must be between 1 and 60 minutes, got {}",
                self.monitoring_interval
            );
        }
        Ok(())
    }
}

/// Session-scoped settings. Saving acknowledges the change but nothing is
/// written to disk.
pub struct SettingsStore {
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::with_settings(UserSettings::default())
    }

    pub fn with_settings(settings: UserSettings) -> Self {
        Self {
            data: RwLock::new(settings),
        }
    }

    /// Seeds the store from a JSON file. A missing file yields defaults; an
    /// unreadable or invalid one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings: UserSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
        settings.validate()?;
        Ok(Self::with_settings(settings))
    }

    pub fn get(&self) -> UserSettings {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn save(&self, settings: UserSettings) -> Result<()> {
        settings.validate()?;
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = settings;
        info!("settings saved for {}", guard.name);
        Ok(())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
