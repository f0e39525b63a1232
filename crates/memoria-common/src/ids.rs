//! Typed ID wrappers for persisted records.
//!
//! The record store assigns identifiers. Depending on the table's key column
//! that is a UUID, an integer sequence, or some other text key, so
//! [`MemoryId`] accepts all three. Tests and fakes mint UUIDs via
//! [`MemoryId::new`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned identifier of a persisted memory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemoryId {
    Uuid(Uuid),
    Int(i64),
    Text(String),
}

impl MemoryId {
    /// Generate a new random memory ID.
    #[must_use]
    pub fn new() -> Self {
        Self::Uuid(Uuid::new_v4())
    }
}

impl Default for MemoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for MemoryId {
    fn from(uuid: Uuid) -> Self {
        Self::Uuid(uuid)
    }
}

impl From<i64> for MemoryId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl std::fmt::Display for MemoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uuid(uuid) => write!(f, "{}", uuid),
            Self::Int(id) => write!(f, "{}", id),
            Self::Text(key) => f.write_str(key),
        }
    }
}

impl std::str::FromStr for MemoryId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Ok(uuid) = Uuid::parse_str(s) {
            return Ok(Self::Uuid(uuid));
        }
        if let Ok(id) = s.parse::<i64>() {
            return Ok(Self::Int(id));
        }
        Ok(Self::Text(s.to_string()))
    }
}
