use std::fmt;

#[derive(Debug)]
pub enum GarlicError {
    /// Reading or writing a store file failed
    StoreIo { path: String, source: std::io::Error },

    /// The backing store reported itself unavailable
    StoreUnavailable,

    /// A store operation reported failure
    Store(String),

    /// JSON parsing failed (document snapshot or store file)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (store file or trace event)
    JsonSerialize { context: String, source: serde_json::Error },

    /// YAML parsing failed (replay script)
    YamlParse { context: String, source: serde_yaml::Error },

    /// Fetching a document snapshot over HTTP failed
    DocumentFetch { url: String, source: reqwest::Error },

    /// Reading a document snapshot from disk failed
    DocumentRead { path: String, source: std::io::Error },

    /// The field has no stable structural identity
    UnresolvablePath(String),

    /// A node id does not belong to the document
    UnknownNode(usize),

    /// A selector string could not be parsed
    Selector(String),

    /// A replay script step could not be executed
    Script(String),
}

impl fmt::Display for GarlicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GarlicError::StoreIo { path, source } => {
                write!(f, "Store I/O error on '{}': {}", path, source)
            }
            GarlicError::StoreUnavailable => write!(f, "Backing store is unavailable"),
            GarlicError::Store(msg) => write!(f, "Store operation failed: {}", msg),
            GarlicError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            GarlicError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            GarlicError::YamlParse { context, source } => {
                write!(f, "YAML parse error ({}): {}", context, source)
            }
            GarlicError::DocumentFetch { url, source } => {
                write!(f, "Failed to fetch document from {}: {}", url, source)
            }
            GarlicError::DocumentRead { path, source } => {
                write!(f, "Failed to read document '{}': {}", path, source)
            }
            GarlicError::UnresolvablePath(msg) => write!(f, "Unresolvable path: {}", msg),
            GarlicError::UnknownNode(id) => write!(f, "Node #{} is not part of the document", id),
            GarlicError::Selector(msg) => write!(f, "Malformed selector: {}", msg),
            GarlicError::Script(msg) => write!(f, "Script step failed: {}", msg),
        }
    }
}

impl std::error::Error for GarlicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GarlicError::StoreIo { source, .. } => Some(source),
            GarlicError::JsonParse { source, .. } => Some(source),
            GarlicError::JsonSerialize { source, .. } => Some(source),
            GarlicError::YamlParse { source, .. } => Some(source),
            GarlicError::DocumentFetch { source, .. } => Some(source),
            GarlicError::DocumentRead { source, .. } => Some(source),
            _ => None,
        }
    }
}
