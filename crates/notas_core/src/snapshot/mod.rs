//! Snapshot codec for whole-tree persistence, export and import.
//!
//! # Responsibility
//! - Encode the category tree into the versioned storage envelope.
//! - Decode storage/import payloads, migrating older shapes forward.
//! - Own the backup filename convention.
//!
//! # Invariants
//! - The full category tree is the unit of persistence; there are no
//!   partial snapshots.
//! - Decoding never mutates caller state; errors leave nothing applied.
//! - A bare JSON array is accepted as the legacy (version 0) shape, which
//!   is also the export shape.

use crate::model::category::Category;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrate;

pub use migrate::latest_version;

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors from snapshot encoding, decoding and migration.
#[derive(Debug)]
pub enum SnapshotError {
    /// Payload is not valid JSON, or does not deserialize into the tree.
    Parse(serde_json::Error),
    /// Payload was written by a newer build of this application.
    UnsupportedSchemaVersion {
        found: u32,
        latest_supported: u32,
    },
    /// Payload parsed as JSON but its structure is unusable.
    InvalidData(String),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "snapshot payload is not valid JSON: {err}"),
            Self::UnsupportedSchemaVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "snapshot schema version {found} is newer than supported {latest_supported}"
            ),
            Self::InvalidData(message) => write!(f, "invalid snapshot data: {message}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    schema_version: u32,
    categories: &'a [Category],
}

/// Encodes the tree into the compact storage envelope.
pub fn encode_snapshot(categories: &[Category]) -> SnapshotResult<String> {
    let envelope = Envelope {
        schema_version: latest_version(),
        categories,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decodes a storage or import payload into the category tree.
///
/// Accepts the versioned envelope at any known version, or a bare category
/// array treated as version 0. Anything newer than [`latest_version`] is
/// rejected.
pub fn decode_snapshot(raw: &str) -> SnapshotResult<Vec<Category>> {
    let value: Value = serde_json::from_str(raw)?;

    let root = match value {
        Value::Array(categories) => {
            let mut envelope = serde_json::Map::new();
            envelope.insert("schemaVersion".to_string(), Value::from(0u32));
            envelope.insert("categories".to_string(), Value::Array(categories));
            Value::Object(envelope)
        }
        root @ Value::Object(_) => root,
        _ => {
            return Err(SnapshotError::InvalidData(
                "snapshot root must be an array or an object".to_string(),
            ));
        }
    };

    let version = root
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .and_then(|version| u32::try_from(version).ok())
        .ok_or_else(|| {
            SnapshotError::InvalidData(
                "snapshot object is missing a numeric schemaVersion".to_string(),
            )
        })?;

    let migrated = migrate::migrate(root, version)?;
    let categories = migrated
        .get("categories")
        .cloned()
        .ok_or_else(|| SnapshotError::InvalidData("snapshot has no categories".to_string()))?;

    Ok(serde_json::from_value(categories)?)
}

/// Serializes the tree into the pretty-printed export shape: the bare
/// category array, no envelope.
pub fn export_categories(categories: &[Category]) -> SnapshotResult<String> {
    Ok(serde_json::to_string_pretty(categories)?)
}

/// Backup filename for an export performed on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("notas-backup-{}.json", date.format("%Y-%m-%d"))
}
