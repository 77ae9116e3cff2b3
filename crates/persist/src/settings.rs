use std::collections::BTreeMap;

use crate::store::StoreError;

/// Process-wide durable key-value store for small integer settings.
pub trait SettingsStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError>;
    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

/// Volatile store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, i64>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for Box<S> {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        (**self).get_int(key)
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        (**self).set_int(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_roundtrip() {
        let mut s = MemorySettings::new();
        assert_eq!(s.get_int("score").unwrap(), None);
        s.set_int("score", 12).unwrap();
        assert_eq!(s.get_int("score").unwrap(), Some(12));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn boxed_store_forwards() {
        let mut s: Box<dyn SettingsStore> = Box::new(MemorySettings::new());
        s.set_int("k", -3).unwrap();
        assert_eq!(s.get_int("k").unwrap(), Some(-3));
    }
}
