//! In-memory parameter store.

use std::collections::BTreeMap;

use crate::domain::error::ConfigError;
use crate::ports::config_port::ConfigPort;

/// Key → raw string value. Assignments overwrite; entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    values: BTreeMap<String, String>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Insert or overwrite `key`.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl ConfigPort for Store {
    fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::NotFound {
                key: key.to_string(),
            })
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.upsert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn upsert_overwrites() {
        let mut store = Store::new();
        store.upsert("a", "1");
        store.upsert("a", "2");
        assert_eq!(store.get("a"), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn iter_is_sorted_by_key() {
        let mut store = Store::new();
        store.upsert("zeta", "1");
        store.upsert("alpha", "2");
        store.upsert("mid", "3");
        let keys: Vec<&str> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn missing_key_is_not_found() {
        let store = Store::new();
        let err = store.get_string("nope").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { ref key } if key == "nope"));
        assert!(matches!(
            store.get_int("nope"),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn typed_setters_store_canonical_text() {
        let mut store = Store::new();
        store.set_int("n", -2);
        store.set_long("big", 9_000_000_000);
        store.set_double("d", 0.25);
        assert_eq!(store.get("n"), Some("-2"));
        assert_eq!(store.get("big"), Some("9000000000"));
        assert_eq!(store.get("d"), Some("0.25"));
    }

    #[test]
    fn typed_getters_view_the_same_text() {
        let mut store = Store::new();
        store.set_string("RandomVariable", "45");
        assert_eq!(store.get_int("RandomVariable").unwrap(), 45);
        assert_eq!(store.get_long("RandomVariable").unwrap(), 45);
        assert_relative_eq!(store.get_float("RandomVariable").unwrap(), 45.0);
        assert_relative_eq!(store.get_double("RandomVariable").unwrap(), 45.0);
        assert_eq!(store.get_hex("RandomVariable").unwrap(), 0x45);
    }

    #[test]
    fn empty_value_is_allowed_in_memory() {
        let mut store = Store::new();
        store.set_string("blank", "");
        assert_eq!(store.get_string("blank").unwrap(), "");
        assert_eq!(store.get_int("blank").unwrap(), 0);
    }
}
