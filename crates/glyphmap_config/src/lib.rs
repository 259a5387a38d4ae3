pub mod errors;
pub mod settings;
pub mod storage;

use crate::errors::Error;
use crate::settings::{Setting, SettingInfo};
use crate::storage::MemoryStorageAdapter;
use glyphmap_shared::types::Result;
use lazy_static::lazy_static;
use log::warn;
use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde_derive::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::mem;
use std::str::FromStr;
use wildmatch::WildMatch;

pub const LOG_TARGET: &str = "glyphmap-config";

/// Settings are stored in a json file, but this is included in the binary for easy editing.
const SETTINGS_JSON: &str = include_str!("./settings.json");

/// `StorageAdapter` is the interface for storing and retrieving settings.
/// Adapters are shared between threads, so they must be `Send + Sync`.
pub trait StorageAdapter: Send + Sync {
    /// Retrieves a setting from the storage
    fn get(&self, key: &str) -> Option<Setting>;

    /// Stores a given setting to the storage. Takes `&self`, so adapters use interior mutability.
    fn set(&self, key: &str, value: Setting);

    /// Retrieves all the settings in the storage in one go. Used for preloading the settings
    /// into the `ConfigStore`.
    fn all(&self) -> Result<HashMap<String, Setting>>;
}

lazy_static! {
    // Initial config store has a memory storage adapter. It will save within the session, but not
    // persist this on disk.
    static ref CONFIG_STORE: RwLock<ConfigStore> = RwLock::new(ConfigStore::default());
}

/// Returns a read guard on the process-wide config store:
/// `config_store().get("canvas.width")`
pub fn config_store() -> RwLockReadGuard<'static, ConfigStore> {
    CONFIG_STORE.read()
}

pub fn config_store_write() -> RwLockWriteGuard<'static, ConfigStore> {
    CONFIG_STORE.write()
}

/// This macro simplifies reads from the config store:
///
/// let width = config!(uint "canvas.width");
/// let solid = config!(string "render.solid");
///
/// When the key cannot be found, a zero value is returned. Test for existence of the key
/// with `config_store().has("key")`.
#[macro_export]
macro_rules! config {
    (string $key:expr) => {
        match $crate::config_store().get($key) {
            Some(setting) => setting.to_string(),
            None => String::new(),
        }
    };
    (uint $key:expr) => {
        match $crate::config_store().get($key) {
            Some(setting) => setting.to_uint(),
            None => 0,
        }
    };
}

/// `JsonEntry` is used for parsing the settings.json file
#[derive(Debug, Deserialize)]
struct JsonEntry {
    key: String,
    #[serde(rename = "type")]
    _entry_type: String,
    default: String,
    description: String,
}

/// Configuration storage is the place where glyphmap finds all configurable options
pub struct ConfigStore {
    /// Current values, guarded so `set` can be called through a shared reference
    settings: Mutex<HashMap<String, Setting>>,
    /// Descriptions, default values and type information of all known settings
    settings_info: HashMap<String, SettingInfo>,
    /// Keys of all settings in declaration order
    setting_keys: Vec<String>,
    /// The storage adapter used for persisting and loading keys
    storage: Box<dyn StorageAdapter>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        let mut store = Self {
            settings: Mutex::new(HashMap::new()),
            settings_info: HashMap::new(),
            setting_keys: Vec::new(),
            storage: Box::new(MemoryStorageAdapter::new()),
        };

        if let Err(err) = store.populate_default_settings() {
            warn!(target: LOG_TARGET, "config: cannot load default settings: {err}");
        }
        store
    }
}

impl ConfigStore {
    /// Sets a new storage engine and overwrites the current settings with everything the storage
    /// knows about.
    pub fn set_storage(&mut self, storage: Box<dyn StorageAdapter>) {
        self.storage = storage;

        match self.storage.all() {
            Ok(all_settings) => {
                let mut settings = self.settings.lock();
                for (key, value) in all_settings {
                    settings.insert(key, value);
                }
            }
            Err(err) => warn!(target: LOG_TARGET, "config: cannot read storage: {err}"),
        }
    }

    /// Returns true when the store knows about the given key
    pub fn has(&self, key: &str) -> bool {
        self.settings.lock().contains_key(key)
    }

    /// Returns a list of keys that matches the given search string (can use ? and *) for search
    /// wildcards.
    pub fn find(&self, search: &str) -> Vec<String> {
        let search = WildMatch::new(search);

        self.setting_keys
            .iter()
            .filter(|key| search.matches(key))
            .cloned()
            .collect()
    }

    /// Retrieves information about the given key, or returns None when key is unknown
    pub fn get_info(&self, key: &str) -> Option<SettingInfo> {
        self.settings_info.get(key).cloned()
    }

    /// Returns the setting with the given key. Falls back to the storage adapter and then to the
    /// default value. Unknown keys return `None`.
    pub fn get(&self, key: &str) -> Option<Setting> {
        if let Some(setting) = self.settings.lock().get(key) {
            return Some(setting.clone());
        }

        if let Some(setting) = self.storage.get(key) {
            self.settings
                .lock()
                .insert(key.to_string(), setting.clone());
            return Some(setting);
        }

        if let Some(info) = self.settings_info.get(key) {
            return Some(info.default.clone());
        }

        warn!(target: LOG_TARGET, "config: setting {key} is not known");
        None
    }

    /// Sets the given setting to the given value and persists it to the storage. The setting
    /// MUST have a settings-info entry and keep the type of its default, otherwise it is not
    /// stored.
    pub fn set(&self, key: &str, value: Setting) {
        let Some(info) = self.settings_info.get(key) else {
            warn!(target: LOG_TARGET, "config: setting {key} is not known");
            return;
        };

        if mem::discriminant(&info.default) != mem::discriminant(&value) {
            warn!(target: LOG_TARGET, "config: setting {key} is of different type than setting expects");
            return;
        }

        self.settings.lock().insert(key.to_owned(), value.clone());
        self.storage.set(key, value);
    }

    /// Populates the settings in the store from the settings.json file
    fn populate_default_settings(&mut self) -> Result<()> {
        let json_data: Value = serde_json::from_str(SETTINGS_JSON).map_err(Error::JsonSerde)?;

        let Value::Object(data) = json_data else {
            return Err(Error::Config("settings.json must contain an object".into()).into());
        };

        for (section_prefix, section_entries) in data {
            let section_entries: Vec<JsonEntry> =
                serde_json::from_value(section_entries).map_err(Error::JsonSerde)?;

            for entry in section_entries {
                let key = format!("{}.{}", section_prefix, entry.key);

                let info = SettingInfo {
                    key: key.clone(),
                    description: entry.description,
                    default: Setting::from_str(&entry.default)?,
                };

                self.setting_keys.push(key.clone());
                self.settings.lock().insert(key.clone(), info.default.clone());
                self.settings_info.insert(key, info);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fresh_store() -> ConfigStore {
        let mut store = ConfigStore::default();
        store.set_storage(Box::new(MemoryStorageAdapter::new()));
        store
    }

    #[test]
    fn defaults_are_loaded() {
        let store = fresh_store();

        assert_eq!(store.get("canvas.width"), Some(Setting::UInt(128)));
        assert_eq!(store.get("canvas.line_spacing"), Some(Setting::UInt(1)));
        assert_eq!(store.get("render.placeholder"), Some(Setting::String("?".into())));
        assert!(store.has("log.level"));

        let info = store.get_info("canvas.height").unwrap();
        assert_eq!(info.default, Setting::UInt(128));
        assert!(!info.description.is_empty());
    }

    #[test]
    fn set_and_get() {
        let store = fresh_store();

        store.set("canvas.width", Setting::UInt(64));
        assert_eq!(store.get("canvas.width"), Some(Setting::UInt(64)));
    }

    #[test]
    fn find_with_wildcards() {
        let store = fresh_store();

        let keys = store.find("canvas.*");
        assert_eq!(keys, vec!["canvas.width", "canvas.height", "canvas.line_spacing"]);
        assert_eq!(store.find("render.s?lid"), vec!["render.solid"]);
        assert!(store.find("nothing.*").is_empty());
    }

    #[test]
    fn storage_values_override_defaults() {
        let storage = MemoryStorageAdapter::new();
        storage.set("render.solid", Setting::String("@".into()));

        let mut store = ConfigStore::default();
        store.set_storage(Box::new(storage));
        assert_eq!(store.get("render.solid"), Some(Setting::String("@".into())));
    }

    #[test]
    fn invalid_setting() {
        testing_logger::setup();
        let store = fresh_store();

        store.set("canvas.width", Setting::String("wont accept strings".into()));
        store.set("this.key.doesnt.exist", Setting::UInt(1));

        testing_logger::validate(|captured_logs| {
            let warnings: Vec<_> = captured_logs
                .iter()
                .filter(|log| log.level == log::Level::Warn)
                .collect();
            assert_eq!(warnings.len(), 2);
        });

        assert_eq!(store.get("canvas.width"), Some(Setting::UInt(128)));
        assert_eq!(store.get("this.key.doesnt.exist"), None);
    }

    #[test]
    fn macro_usage() {
        config_store_write().set_storage(Box::new(MemoryStorageAdapter::new()));

        config_store().set("canvas.line_spacing", Setting::UInt(3));
        let spacing = config!(uint "canvas.line_spacing");
        assert_eq!(spacing, 3);

        let missing = config!(string "this.key.doesnt.exist");
        assert_eq!(missing, "");
    }
}
