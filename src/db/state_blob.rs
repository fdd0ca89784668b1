//! Persistence of the portal state as a single JSON blob.
//!
//! The blob lives in `kv_store` under [`STATE_KEY`]. Loading overlays the
//! stored top-level fields onto the seed state, so fields added to
//! [`AppState`] after a blob was written keep their seed values.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;

use crate::domain::AppState;
use crate::error::StorageError;

/// Key of the one row holding the whole state
pub const STATE_KEY: &str = "examPortalState";

fn read_blob(conn: &Connection) -> Result<Option<String>, StorageError> {
    let blob = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![STATE_KEY],
            |row| row.get(0),
        )
        .optional()?;
    Ok(blob)
}

/// Shallow-merge a stored blob onto `defaults`.
///
/// Top-level keys present in the blob replace the default value. `null`
/// values and keys unknown to [`AppState`] are skipped.
pub fn overlay_state(defaults: &AppState, blob: &str) -> Result<AppState, StorageError> {
    let Value::Object(stored) = serde_json::from_str::<Value>(blob)? else {
        return Err(StorageError::NotAnObject);
    };

    let mut merged = match serde_json::to_value(defaults)? {
        Value::Object(map) => map,
        _ => return Err(StorageError::NotAnObject),
    };

    for (key, value) in stored {
        if value.is_null() || !merged.contains_key(&key) {
            continue;
        }
        merged.insert(key, value);
    }

    Ok(serde_json::from_value(Value::Object(merged))?)
}

/// Load the saved state overlaid onto `defaults`.
///
/// Returns `None` when nothing is saved or the saved blob cannot be used;
/// the latter is logged and otherwise treated like "no saved data".
pub fn load_state(conn: &Connection, defaults: &AppState) -> Option<AppState> {
    let blob = match read_blob(conn) {
        Ok(Some(blob)) => blob,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read saved portal state: {}", e);
            return None;
        }
    };

    match overlay_state(defaults, &blob) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!("Discarding unreadable saved portal state: {}", e);
            None
        }
    }
}

/// Serialize the whole state and overwrite the stored blob
pub fn save_state(conn: &Connection, state: &AppState, now: DateTime<Utc>) -> Result<(), StorageError> {
    let blob = serde_json::to_string(state)?;
    conn.execute(
        r#"
        INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
        params![STATE_KEY, blob, now.to_rfc3339()],
    )?;
    Ok(())
}
