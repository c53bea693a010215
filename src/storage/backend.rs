use std::collections::BTreeMap;

use crate::error::GarlicError;

/// Raw origin-scoped string storage, shaped like the browser's
/// `localStorage`. `Storage` layers the persistence rules on top.
pub trait StorageBackend {
    /// False when the backing store does not exist at all.
    fn available(&self) -> bool {
        true
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, GarlicError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), GarlicError>;

    fn remove_item(&mut self, key: &str) -> Result<(), GarlicError>;

    /// All keys currently stored, in a stable order.
    fn keys(&self) -> Result<Vec<String>, GarlicError>;

    fn clear(&mut self) -> Result<(), GarlicError>;
}

// ============================================================================
// In-memory backend
// ============================================================================

#[derive(Debug, Clone)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
    available: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            entries: BTreeMap::new(),
            available: true,
        }
    }

    /// A backend that reports itself missing; everything built on it no-ops.
    pub fn unavailable() -> Self {
        MemoryBackend {
            entries: BTreeMap::new(),
            available: false,
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    fn available(&self) -> bool {
        self.available
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, GarlicError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), GarlicError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), GarlicError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, GarlicError> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn clear(&mut self) -> Result<(), GarlicError> {
        self.entries.clear();
        Ok(())
    }
}
