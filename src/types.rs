//! Common types used throughout warehouse-extract
//!
//! Shared type aliases, the warehouse identifier and the names of the
//! provenance columns appended to every extracted row.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Provenance Columns
// ============================================================================

/// Column holding the RFC 3339 time the row was fetched
pub const LOAD_TIMESTAMP_COLUMN: &str = "load_timestamp";

/// Column holding the name of the query that produced the row
pub const DATA_SOURCE_COLUMN: &str = "data_source";

/// Column holding the warehouse the row was fetched for
pub const WAREHOUSE_CODE_COLUMN: &str = "warehouse_code";

/// All provenance columns, in the order they are appended
pub const PROVENANCE_COLUMNS: [&str; 3] = [
    LOAD_TIMESTAMP_COLUMN,
    DATA_SOURCE_COLUMN,
    WAREHOUSE_CODE_COLUMN,
];

// ============================================================================
// Warehouse Code
// ============================================================================

/// Identifier scoping every query to one warehouse.
///
/// Free-form; the only normalisation applied is trimming surrounding
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseCode(String);

impl WarehouseCode {
    /// Create a warehouse code
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_string())
    }

    /// Parse a comma-separated list, dropping blank entries
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::new)
            .collect()
    }

    /// The raw code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WarehouseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WarehouseCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl AsRef<str> for WarehouseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
