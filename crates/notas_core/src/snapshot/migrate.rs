//! Snapshot schema migration registry and executor.
//!
//! # Responsibility
//! - Register snapshot migrations in strictly increasing order.
//! - Bring older payloads up to the current schema before typed decoding.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Migrations rewrite JSON shape only; they never drop categories or
//!   notes.
//! - Ids that are already valid UUID strings pass through unchanged, so
//!   export followed by import round-trips identically.

use crate::ids::new_entity_id;
use crate::snapshot::{SnapshotError, SnapshotResult};
use serde_json::Value;
use uuid::Uuid;

struct SnapshotMigration {
    version: u32,
    apply: fn(Value) -> SnapshotResult<Value>,
}

const MIGRATIONS: &[SnapshotMigration] = &[SnapshotMigration {
    version: 1,
    apply: normalize_entity_ids,
}];

/// Returns the latest snapshot schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all migrations newer than `from_version` to the envelope.
pub fn migrate(root: Value, from_version: u32) -> SnapshotResult<Value> {
    let latest = latest_version();
    if from_version > latest {
        return Err(SnapshotError::UnsupportedSchemaVersion {
            found: from_version,
            latest_supported: latest,
        });
    }

    let mut current = root;
    for migration in MIGRATIONS {
        if migration.version <= from_version {
            continue;
        }

        current = (migration.apply)(current)?;
        if let Some(object) = current.as_object_mut() {
            object.insert(
                "schemaVersion".to_string(),
                Value::from(migration.version),
            );
        }
    }

    Ok(current)
}

/// v0 -> v1: the legacy shape carried timestamp-derived numeric ids.
/// Every id that is not already a UUID string is re-minted.
fn normalize_entity_ids(mut root: Value) -> SnapshotResult<Value> {
    let categories = root
        .get_mut("categories")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| {
            SnapshotError::InvalidData("snapshot categories must be an array".to_string())
        })?;

    for category in categories.iter_mut() {
        rewrite_id(category);
        let Some(notes) = category.get_mut("notes").and_then(Value::as_array_mut) else {
            continue;
        };
        for note in notes.iter_mut() {
            rewrite_id(note);
            let Some(items) = note
                .get_mut("checklistItems")
                .and_then(Value::as_array_mut)
            else {
                continue;
            };
            for item in items.iter_mut() {
                rewrite_id(item);
            }
        }
    }

    Ok(root)
}

fn rewrite_id(entity: &mut Value) {
    let keeps_current = entity
        .get("id")
        .and_then(Value::as_str)
        .is_some_and(|raw| Uuid::parse_str(raw).is_ok());
    if keeps_current {
        return;
    }

    if let Some(object) = entity.as_object_mut() {
        object.insert(
            "id".to_string(),
            Value::String(new_entity_id().to_string()),
        );
    }
}
