//! Record types exchanged with the record store.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::MemoryId;

/// Table that holds memory records.
pub const MEMORIES_TABLE: &str = "memories";

/// A persisted memory: one uploaded photo plus its title and description.
///
/// Rows are created once per successful submission and never updated or
/// deleted by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// Server-assigned identifier.
    pub id: MemoryId,
    /// Non-empty title, at most [`crate::draft::TITLE_MAX_CHARS`] characters.
    pub title: String,
    /// Optional description; the column is nullable.
    #[serde(default)]
    pub description: Option<String>,
    /// Publicly resolvable address of the stored image.
    pub image_url: String,
    /// Server timestamp of the insert.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Parse a row timestamp.
///
/// Accepts RFC 3339 as well as the offset-less form a `timestamp` (without
/// time zone) column produces, which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

/// Insert payload for a new memory row.
///
/// The description is always sent as a string; an empty description is `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMemory {
    pub title: String,
    pub description: String,
    pub image_url: String,
}
