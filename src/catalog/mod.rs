//! Query catalog module
//!
//! The ordered list of transaction segments fetched for every warehouse.
//!
//! # Overview
//!
//! The catalog module provides:
//! - `QueryDefinition` - A named filter fragment with its page cap
//! - `Catalog` - A validated, ordered, non-empty list of definitions
//! - The built-in nine-segment movement taxonomy
//! - YAML loading for alternative catalogs

mod builtin;
mod loader;
mod types;

pub use builtin::{
    builtin_definitions, CONSUMPTION_PREFIX, DEDICATED_PREFIXES, OTHER_MOVEMENTS_EXCLUDED,
    RECEIPT_PREFIXES, SALES_PREFIX, TRANSFER_PREFIX,
};
pub use loader::{load_catalog, load_catalog_from_str};
pub use types::{Catalog, QueryDefinition};
