//! One-shot service preselection.
//!
//! Picking a service elsewhere on the page leaves a hint for the contact
//! form. The hint is consumed the first time the form reads it.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Key the hint is stored under in a shared scratch store.
pub const PRESELECT_KEY: &str = "selectedService";

pub trait PreselectStore: Send + Sync {
    fn put(&self, service: &str);

    /// Returns the stored hint and clears it.
    fn take(&self) -> Option<String>;
}

/// Dedicated single-value slot.
#[derive(Clone, Default)]
pub struct MemorySlot {
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreselectStore for MemorySlot {
    fn put(&self, service: &str) {
        *self.value.lock() = Some(service.to_string());
    }

    fn take(&self) -> Option<String> {
        self.value.lock().take()
    }
}

/// Session-scoped key/value scratch store shared with other page features.
#[derive(Clone, Default)]
pub struct SessionStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_item(&self, key: &str, value: &str) {
        self.items.lock().insert(key.to_string(), value.to_string());
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    pub fn remove_item(&self, key: &str) -> Option<String> {
        self.items.lock().remove(key)
    }
}

impl PreselectStore for SessionStorage {
    fn put(&self, service: &str) {
        self.set_item(PRESELECT_KEY, service);
    }

    /// An empty stored value is not a hint and stays where it is.
    fn take(&self) -> Option<String> {
        let mut items = self.items.lock();
        let present = items
            .get(PRESELECT_KEY)
            .map_or(false, |service| !service.is_empty());
        if present {
            items.remove(PRESELECT_KEY)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_is_consumed_once() {
        let slot = MemorySlot::new();
        slot.put("Finance");
        assert_eq!(slot.take().as_deref(), Some("Finance"));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_slot_keeps_latest_choice() {
        let slot = MemorySlot::new();
        slot.put("Finance");
        slot.put("Car Sourcing");
        assert_eq!(slot.take().as_deref(), Some("Car Sourcing"));
    }

    #[test]
    fn test_session_storage_uses_shared_key() {
        let storage = SessionStorage::new();
        storage.set_item("theme", "dark");
        storage.put("Finance");

        assert_eq!(storage.get_item(PRESELECT_KEY).as_deref(), Some("Finance"));
        assert_eq!(storage.take().as_deref(), Some("Finance"));
        assert!(storage.get_item(PRESELECT_KEY).is_none());
        assert_eq!(storage.get_item("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_session_storage_leaves_empty_hint() {
        let storage = SessionStorage::new();
        storage.set_item(PRESELECT_KEY, "");

        assert_eq!(storage.take(), None);
        assert_eq!(storage.get_item(PRESELECT_KEY).as_deref(), Some(""));
    }
}
