//! Helpers for moving records in and out of store documents

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use spraycoat_domain::repository::{Document, StoredDocument};
use spraycoat_types::Result;

/// Stamp a new document with its creation time
pub(crate) fn stamp_created(document: &mut Document) {
    document.insert(
        "createdAt".to_string(),
        Value::String(Utc::now().to_rfc3339()),
    );
}

/// Decode a stored document, folding in its id and any extra fields
pub(crate) fn decode<T: DeserializeOwned>(
    stored: StoredDocument,
    extra: &[(&str, &str)],
) -> Result<T> {
    let mut value = stored.into_value_with_id();
    if let Value::Object(ref mut map) = value {
        for (key, field) in extra {
            map.insert(key.to_string(), Value::String(field.to_string()));
        }
    }
    Ok(serde_json::from_value(value)?)
}
