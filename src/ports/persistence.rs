//! Selection persistence port

use serde_json::Value;

use crate::models::SelectionSnapshot;

/// Key-value store for remembering picker state across sessions.
///
/// The shell typically backs this with local storage. The core only reads
/// initial values and writes changes; it never depends on a write having
/// succeeded.
#[cfg_attr(test, mockall::automock)]
pub trait SelectionPersistencePort: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
}

/// Convenience wrapper storing one picker's last-used selection and keyword
/// under namespaced keys.
pub struct SelectionMemory<'a> {
    store: &'a dyn SelectionPersistencePort,
    prefix: String,
}

impl<'a> SelectionMemory<'a> {
    pub fn new(store: &'a dyn SelectionPersistencePort, picker: &str) -> Self {
        Self {
            store,
            prefix: format!("picker.{}", picker),
        }
    }

    pub fn save_selection(&self, snapshot: &SelectionSnapshot) {
        if let Ok(value) = serde_json::to_value(snapshot) {
            self.store.set(&format!("{}.selection", self.prefix), value);
        }
    }

    pub fn load_selection(&self) -> Option<SelectionSnapshot> {
        let value = self.store.get(&format!("{}.selection", self.prefix))?;
        serde_json::from_value(value).ok()
    }

    pub fn save_keyword(&self, keyword: &str) {
        self.store
            .set(&format!("{}.keyword", self.prefix), Value::from(keyword));
    }

    pub fn load_keyword(&self) -> Option<String> {
        match self.store.get(&format!("{}.keyword", self.prefix))? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}
