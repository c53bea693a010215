use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GarlicError;
use crate::storage::backend::StorageBackend;

/// On-disk layout of one origin's store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreFile {
    pub origin: String,
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

/// Durable backend: one JSON file per origin, rewritten on every mutation.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    data: StoreFile,
}

impl FileBackend {
    /// Open (or start) the store for `origin` inside `dir`.
    /// A missing file is an empty store; a malformed one is an error.
    pub fn open(dir: &Path, origin: &str) -> Result<Self, GarlicError> {
        let path = dir.join(store_file_name(origin));

        let data = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| GarlicError::JsonParse {
                context: format!("store file {}", path.display()),
                source: e,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreFile {
                origin: origin.to_string(),
                entries: BTreeMap::new(),
            },
            Err(e) => {
                return Err(GarlicError::StoreIo {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        Ok(FileBackend { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), GarlicError> {
        let io_err = |e| GarlicError::StoreIo {
            path: self.path.display().to_string(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&self.data).map_err(|e| {
            GarlicError::JsonSerialize {
                context: "store file".into(),
                source: e,
            }
        })?;

        std::fs::write(&self.path, json).map_err(io_err)
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, GarlicError> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), GarlicError> {
        self.data.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<(), GarlicError> {
        if self.data.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, GarlicError> {
        Ok(self.data.entries.keys().cloned().collect())
    }

    fn clear(&mut self) -> Result<(), GarlicError> {
        self.data.entries.clear();
        self.flush()
    }
}

/// Origins can contain characters unsafe in file names (`:` ports, IDN),
/// so the file is named by the origin's SHA-1.
pub fn store_file_name(origin: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(origin.as_bytes());
    format!("{:x}.json", hasher.finalize())
}
