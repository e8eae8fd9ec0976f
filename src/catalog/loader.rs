//! YAML loader for alternative catalogs
//!
//! A catalog file is a YAML list of `{name, page_cap, predicate}` entries,
//! fetched in file order.

use super::types::{Catalog, QueryDefinition};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Load a catalog from a YAML file
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read catalog file '{}': {e}",
            path.display()
        ))
    })?;
    load_catalog_from_str(&content)
}

/// Load a catalog from a YAML string
pub fn load_catalog_from_str(yaml: &str) -> Result<Catalog> {
    let definitions: Vec<QueryDefinition> = serde_yaml::from_str(yaml)
        .map_err(|e| Error::catalog(format!("Failed to parse catalog YAML: {e}")))?;
    Catalog::new(definitions)
}
