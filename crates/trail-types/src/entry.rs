use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LogError;

/// One audit-log entry as served by the backend logs API.
///
/// Only the well-known envelope fields are typed; writers attach arbitrary
/// extra fields, which are preserved verbatim in [`LogEntry::extra`]. The
/// `details` payload is opaque JSON; its before/after snapshots are pulled
/// out with [`LogEntry::comparison_pair`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Document identifier; a plain string or a reference-like object.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// What happened (e.g. `update_resume`, `delete_user`).
    #[serde(default)]
    pub action: String,

    /// When it happened, kept verbatim (RFC 3339 when present).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Acting admin, when the entry came from the admin console.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<Value>,

    /// Acting user, for user-originated entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<Value>,

    /// Opaque action payload; may carry before/after snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,

    /// Everything the envelope does not name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The two snapshots being compared, pulled out of one entry's `details`.
///
/// Transient: lives only for the duration of one diff call. A side missing
/// from the payload is `Value::Null`.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonPair {
    pub before: Value,
    pub after: Value,
}

impl LogEntry {
    /// Extract the before/after snapshot pair from the `details` payload.
    ///
    /// Looks for `before`/`after` first, then falls back to
    /// `beforeUpdate`/`afterUpdate`. Returns `None` when neither pair has at
    /// least one side present, or when `details` is not an object.
    pub fn comparison_pair(&self) -> Option<ComparisonPair> {
        let details = self.details.as_ref()?.as_object()?;
        pick_pair(details, "before", "after")
            .or_else(|| pick_pair(details, "beforeUpdate", "afterUpdate"))
    }

    /// Who performed the action: `adminId` when present, else `userId`.
    pub fn actor(&self) -> Option<&Value> {
        self.admin_id.as_ref().or(self.user_id.as_ref())
    }

    /// The entry timestamp parsed as RFC 3339, when present and well-formed.
    pub fn parsed_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.timestamp.as_deref()?;
        DateTime::parse_from_rfc3339(raw).ok()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.timestamp {
            Some(ts) => write!(f, "{} @ {}", self.action, ts),
            None => write!(f, "{}", self.action),
        }
    }
}

fn pick_pair(
    details: &Map<String, Value>,
    before_key: &str,
    after_key: &str,
) -> Option<ComparisonPair> {
    let before = details.get(before_key);
    let after = details.get(after_key);
    if before.is_none() && after.is_none() {
        return None;
    }
    Some(ComparisonPair {
        before: coerce_snapshot(before),
        after: coerce_snapshot(after),
    })
}

/// Some writers store snapshots as serialized JSON text. Parse a string side
/// when it looks like a container; on parse failure keep the raw string so
/// the presentation layer can show it verbatim.
fn coerce_snapshot(side: Option<&Value>) -> Value {
    match side {
        None => Value::Null,
        Some(Value::String(s)) => {
            let trimmed = s.trim_start();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.clone()))
            } else {
                Value::String(s.clone())
            }
        }
        Some(other) => other.clone(),
    }
}

/// Decode one entry from a JSON value.
pub fn entry_from_value(value: Value) -> Result<LogEntry, LogError> {
    serde_json::from_value(value).map_err(|e| LogError::InvalidEntry(e.to_string()))
}

/// Decode a JSON array of entries.
pub fn entries_from_value(value: Value) -> Result<Vec<LogEntry>, LogError> {
    match value {
        Value::Array(items) => items.into_iter().map(entry_from_value).collect(),
        _ => Err(LogError::NotAnArray),
    }
}
