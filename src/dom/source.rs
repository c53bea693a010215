use crate::dom::snapshot::DocumentSnapshot;
use crate::error::GarlicError;

/// Load a document snapshot from a local JSON file or an `http(s)://` URL.
pub fn load_snapshot(source: &str) -> Result<DocumentSnapshot, GarlicError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_snapshot(source)
    } else {
        let json = std::fs::read_to_string(source).map_err(|e| GarlicError::DocumentRead {
            path: source.to_string(),
            source: e,
        })?;
        DocumentSnapshot::from_json(&json)
    }
}

fn fetch_snapshot(url: &str) -> Result<DocumentSnapshot, GarlicError> {
    let fetch_err = |e| GarlicError::DocumentFetch {
        url: url.to_string(),
        source: e,
    };

    let client = reqwest::blocking::Client::new();
    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(fetch_err)?;

    response.json::<DocumentSnapshot>().map_err(fetch_err)
}
