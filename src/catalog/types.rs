//! Catalog types

use super::builtin::builtin_definitions;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One catalog entry: a named filter fragment plus page-size cap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDefinition {
    /// Segment name, also written to the `data_source` column
    pub name: String,

    /// Maximum rows requested (`take`)
    pub page_cap: u32,

    /// Boolean filter fragment over transaction fields, unencoded
    pub predicate: String,
}

impl QueryDefinition {
    /// Create a query definition
    pub fn new(name: impl Into<String>, page_cap: u32, predicate: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            page_cap,
            predicate: predicate.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::catalog("Query name cannot be empty"));
        }
        if self.page_cap == 0 {
            return Err(Error::catalog(format!(
                "Query '{}' must have a positive page_cap",
                self.name
            )));
        }
        if self.predicate.trim().is_empty() {
            return Err(Error::catalog(format!(
                "Query '{}' predicate cannot be empty",
                self.name
            )));
        }
        Ok(())
    }
}

/// Ordered, non-empty, validated list of query definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    definitions: Vec<QueryDefinition>,
}

impl Catalog {
    /// Create a catalog, validating every definition
    pub fn new(definitions: Vec<QueryDefinition>) -> Result<Self> {
        if definitions.is_empty() {
            return Err(Error::catalog("Catalog must contain at least one query"));
        }

        for def in &definitions {
            def.validate()?;
        }

        let names: HashSet<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
        if names.len() != definitions.len() {
            return Err(Error::catalog("Duplicate query names found"));
        }

        Ok(Self { definitions })
    }

    /// The built-in movement-type catalog
    pub fn builtin() -> Self {
        Self {
            definitions: builtin_definitions(),
        }
    }

    /// Look up a definition by name
    pub fn get(&self, name: &str) -> Option<&QueryDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// Iterate definitions in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, QueryDefinition> {
        self.definitions.iter()
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definition names in order
    pub fn names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name.as_str()).collect()
    }

    /// Borrow the definitions as a slice
    pub fn definitions(&self) -> &[QueryDefinition] {
        &self.definitions
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a QueryDefinition;
    type IntoIter = std::slice::Iter<'a, QueryDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
