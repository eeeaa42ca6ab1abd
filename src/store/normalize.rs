//! Record normalization.
//!
//! Every backend returns a slightly different raw shape. This folds them into
//! one canonical form: `id` as a string, the native identifier dropped, and
//! backend-managed timestamps as epoch milliseconds. Client-owned date fields
//! (event ranges, publication dates) pass through untouched.

use chrono::DateTime;
use serde_json::Value;

use super::RawRecord;

/// Backend-managed timestamp fields converted to epoch milliseconds.
const TIMESTAMP_FIELDS: &[&str] = &["createdAt", "updatedAt", "expiryDate"];

pub fn normalize_record(mut raw: RawRecord) -> RawRecord {
    // the native identifier wins over any pre-existing `id` field
    if let Some(native) = raw.remove("_id") {
        raw.remove("id");
        raw.insert("id".to_string(), Value::String(id_string(&native)));
    } else if let Some(id) = raw.remove("id") {
        raw.insert("id".to_string(), Value::String(id_string(&id)));
    }

    for field in TIMESTAMP_FIELDS {
        let Some(value) = raw.get(*field) else {
            continue;
        };
        if let Some(millis) = to_epoch_millis(value) {
            raw.insert((*field).to_string(), Value::from(millis));
        }
    }

    raw
}

fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.timestamp_millis()),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}
