use crate::errors::Error;
use crate::settings::Setting;
use crate::{StorageAdapter, LOG_TARGET};
use glyphmap_shared::types::Result;
use log::warn;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

/// Stores settings in a flat json object (`{"canvas.width": "u:64"}`). Every `set` rewrites the file.
pub struct JsonStorageAdapter {
    path: PathBuf,
    elements: Mutex<HashMap<String, Setting>>,
}

impl TryFrom<&str> for JsonStorageAdapter {
    type Error = anyhow::Error;

    fn try_from(path: &str) -> Result<Self> {
        let path = PathBuf::from(path);

        match fs::metadata(&path) {
            Ok(metadata) if !metadata.is_file() => {
                return Err(Error::Config(format!("{} is not a regular file", path.display())).into());
            }
            Ok(_) => {}
            Err(_) => fs::write(&path, "{}").map_err(Error::IO)?,
        }

        let adapter = JsonStorageAdapter {
            path,
            elements: Mutex::new(HashMap::new()),
        };
        adapter.read_file()?;

        Ok(adapter)
    }
}

impl StorageAdapter for JsonStorageAdapter {
    fn get(&self, key: &str) -> Option<Setting> {
        self.elements.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Setting) {
        self.elements.lock().insert(key.to_owned(), value);

        if let Err(err) = self.write_file() {
            warn!(target: LOG_TARGET, "cannot write settings to {}: {err}", self.path.display());
        }
    }

    fn all(&self) -> Result<HashMap<String, Setting>> {
        Ok(self.elements.lock().clone())
    }
}

impl JsonStorageAdapter {
    /// Read whole json file and stores the data into self.elements
    fn read_file(&self) -> std::result::Result<(), Error> {
        let buf = fs::read_to_string(&self.path)?;
        let parsed_json: Value = serde_json::from_str(&buf)?;

        let Value::Object(settings) = parsed_json else {
            return Err(Error::Config(format!(
                "{} does not contain a json object",
                self.path.display()
            )));
        };

        let mut lock = self.elements.lock();
        lock.clear();
        for (key, value) in settings {
            match serde_json::from_value(value) {
                Ok(setting) => {
                    lock.insert(key, setting);
                }
                Err(err) => {
                    warn!(target: LOG_TARGET, "problem reading setting {key} from json: {err}");
                }
            }
        }

        Ok(())
    }

    /// Writes all elements back to the file, sorted by key
    fn write_file(&self) -> std::result::Result<(), Error> {
        let sorted: BTreeMap<String, Setting> = self
            .elements
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let json = serde_json::to_string_pretty(&sorted)?;
        fs::write(&self.path, json)?;

        Ok(())
    }
}
