// ticketscope Settings Engine
// Loads, saves and updates user settings. Settings are stored as a JSON file
// at the platform-specific config path.

use std::fs;
use std::path::Path;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::UserSettings;
use crate::types::time_filter::TimeFilter;

/// Trait defining the settings store interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<UserSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get(&self) -> &UserSettings;
    fn set(&mut self, settings: UserSettings) -> Result<(), SettingsError>;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: UserSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: UserSettings::default(),
        }
    }

    fn warn_if_unrecognized(settings: &UserSettings) {
        if let TimeFilter::Unrecognized(raw) = settings.time_filter() {
            log::warn!(
                "saved since value {:?} is not recognized; searches will be unbounded",
                raw
            );
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields defaults. Missing fields take their defaults and
    /// the legacy `sinceHoursAgo` filter is migrated to `since`. A malformed
    /// file is a serialization error.
    fn load(&mut self) -> Result<UserSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            log::debug!("no settings at {}, using defaults", self.config_path);
            self.settings = UserSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: UserSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        Self::warn_if_unrecognized(&settings);
        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file, creating parent
    /// directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        log::debug!("saved settings to {}", self.config_path);
        Ok(())
    }

    fn get(&self) -> &UserSettings {
        &self.settings
    }

    /// Replaces the settings and saves them.
    fn set(&mut self, settings: UserSettings) -> Result<(), SettingsError> {
        Self::warn_if_unrecognized(&settings);
        self.settings = settings;
        self.save()
    }

    /// Updates an individual setting by dot-notation key path, e.g.
    /// `"filter.since"` or `"weekStart"`, then saves.
    ///
    /// The value is validated by deserializing the updated document back into
    /// `UserSettings`.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let parts: Vec<&str> = key.split('.').collect();

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        {
            let mut current = &mut json_value;
            for (i, part) in parts.iter().enumerate() {
                if i == parts.len() - 1 {
                    match current {
                        serde_json::Value::Object(map) => {
                            if !map.contains_key(*part) {
                                return Err(SettingsError::InvalidKey(format!(
                                    "Key '{}' not found in settings",
                                    key
                                )));
                            }
                            map.insert(part.to_string(), value.clone());
                        }
                        _ => {
                            return Err(SettingsError::InvalidKey(format!(
                                "Cannot navigate to key '{}': intermediate value is not an object",
                                key
                            )));
                        }
                    }
                } else {
                    current = match current.get_mut(*part) {
                        Some(v) => v,
                        None => {
                            return Err(SettingsError::InvalidKey(format!(
                                "Key '{}' not found in settings",
                                key
                            )));
                        }
                    };
                }
            }
        }

        let new_settings: UserSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.set(new_settings)
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = UserSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
