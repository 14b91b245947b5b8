//! Settings store backed by a JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use trafficmeter_core::{SettingKey, SettingsError, SettingsStore};

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV: &str = "TRAFFICMETER_SETTINGS";

/// Integer settings kept in a JSON object keyed by setting name.
///
/// The whole file is rewritten on every change. A change whose write fails
/// is not kept in memory either.
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, i32>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| SettingsError::Store(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("opened settings at {}", path.display());

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Where the settings live: `$TRAFFICMETER_SETTINGS`, or `settings.json`
    /// in the user config directory.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(SETTINGS_ENV) {
            return PathBuf::from(path);
        }
        ProjectDirs::from("org", "trafficmeter", "trafficmeter")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("trafficmeter-settings.json"))
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, values: &BTreeMap<String, i32>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(values)
            .map_err(|e| SettingsError::Store(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn get_int(&self, key: SettingKey) -> Result<Option<i32>, SettingsError> {
        let values = self.values.lock().map_err(|_| poisoned())?;
        Ok(values.get(key.as_str()).copied())
    }

    fn put_int(&self, key: SettingKey, value: i32) -> Result<(), SettingsError> {
        let mut values = self.values.lock().map_err(|_| poisoned())?;

        // Memory only changes once the file has been written.
        let mut updated = values.clone();
        updated.insert(key.as_str().to_owned(), value);
        self.save(&updated)?;
        *values = updated;
        log::debug!("{} = {}", key.as_str(), value);
        Ok(())
    }
}

fn poisoned() -> SettingsError {
    SettingsError::Store("settings lock poisoned".to_owned())
}
