//! Configuration structures for RosterDB.

use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};

/// Upper bound on the heap reservation requested up front.
pub const MAX_HEAP_CAPACITY: usize = 1 << 16;

/// What the id index does when a record arrives with an id that is
/// already indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateIdPolicy {
    /// Refuse the insert. Heap and both indexes are left untouched.
    #[default]
    Reject,
    /// Re-point the id at the new record and soft-delete the displaced one.
    Overwrite,
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Policy for inserts whose id is already indexed.
    pub duplicate_ids: DuplicateIdPolicy,
    /// Number of records reserved in the heap at construction.
    pub heap_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            duplicate_ids: DuplicateIdPolicy::Reject,
            heap_capacity: 1024,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration document. Missing fields
    /// take their default values.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| RosterError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every field holds a usable value.
    pub fn validate(&self) -> Result<()> {
        if self.heap_capacity > MAX_HEAP_CAPACITY {
            return Err(RosterError::InvalidParameter {
                name: "heap_capacity".to_string(),
                value: self.heap_capacity.to_string(),
            });
        }
        Ok(())
    }
}
