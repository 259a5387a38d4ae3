use crate::settings::Setting;
use crate::StorageAdapter;
use glyphmap_shared::types::Result;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryStorageAdapter {
    settings: Mutex<HashMap<String, Setting>>,
}

impl MemoryStorageAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(HashMap::new()),
        }
    }
}

impl StorageAdapter for MemoryStorageAdapter {
    fn get(&self, key: &str) -> Option<Setting> {
        self.settings.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Setting) {
        self.settings.lock().insert(key.to_owned(), value);
    }

    fn all(&self) -> Result<HashMap<String, Setting>> {
        Ok(self.settings.lock().clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stores_within_session() {
        let storage = MemoryStorageAdapter::new();
        assert!(storage.get("canvas.width").is_none());

        storage.set("canvas.width", Setting::UInt(64));
        assert_eq!(storage.get("canvas.width"), Some(Setting::UInt(64)));
        assert_eq!(storage.all().unwrap().len(), 1);
    }
}
