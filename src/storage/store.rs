use crate::error::GarlicError;
use crate::storage::backend::StorageBackend;

/// Fixed prefix of every key this crate writes.
pub const NAMESPACE: &str = "garlic:";

/// Persistence rules over a raw backend.
///
/// Every operation is synchronous and infallible from the caller's point of
/// view: backend failures are reported on stderr and surface as `false` (or
/// the fallback value), never as an error crossing into field handling.
pub struct Storage {
    backend: Box<dyn StorageBackend>,
}

impl Storage {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Storage { backend }
    }

    /// False if the backing store is missing; callers must then no-op.
    pub fn defined(&self) -> bool {
        self.backend.available()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if !self.defined() {
            return None;
        }
        match self.backend.get_item(key) {
            Ok(Some(value)) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(e) => {
                report("get", key, &e);
                None
            }
        }
    }

    pub fn get_or(&self, key: &str, fallback: &str) -> String {
        self.get(key).unwrap_or_else(|| fallback.to_string())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Writes only non-empty values. An empty value is a successful no-op,
    /// so a cleared field never clobbers what was saved before.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        if !self.defined() {
            return false;
        }
        if value.is_empty() {
            return true;
        }
        match self.backend.set_item(key, value) {
            Ok(()) => true,
            Err(e) => {
                report("set", key, &e);
                false
            }
        }
    }

    pub fn delete(&mut self, key: &str) -> bool {
        if !self.defined() {
            return false;
        }
        match self.backend.remove_item(key) {
            Ok(()) => true,
            Err(e) => {
                report("delete", key, &e);
                false
            }
        }
    }

    /// Delete every entry whose key starts with `prefix`, leaving other
    /// entries in the same backend untouched.
    pub fn clear_namespace(&mut self, prefix: &str) -> bool {
        let keys = self.keys();
        let mut ok = self.defined();
        for key in keys.iter().filter(|k| k.starts_with(prefix)) {
            ok &= self.delete(key);
        }
        ok
    }

    /// Delete this crate's entries only.
    pub fn clean(&mut self) -> bool {
        self.clear_namespace(NAMESPACE)
    }

    pub fn clear_all(&mut self) -> bool {
        if !self.defined() {
            return false;
        }
        match self.backend.clear() {
            Ok(()) => true,
            Err(e) => {
                report("clear", "*", &e);
                false
            }
        }
    }

    pub fn keys(&self) -> Vec<String> {
        if !self.defined() {
            return Vec::new();
        }
        self.backend.keys().unwrap_or_else(|e| {
            report("keys", "*", &e);
            Vec::new()
        })
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        self.keys()
            .into_iter()
            .filter_map(|k| self.get(&k).map(|v| (k, v)))
            .collect()
    }
}

fn report(op: &str, key: &str, err: &GarlicError) {
    eprintln!("Warning: store {} failed for '{}': {}", op, key, err);
}
