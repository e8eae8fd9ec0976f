// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Warehouse Extract
//!
//! Batch job that pulls recent inventory transactions for a set of
//! warehouses from an HTTP query API and stores one Parquet file per
//! warehouse.
//!
//! ## Features
//!
//! - **Query Catalog**: Nine named filters partitioning the transaction space
//! - **Resilient Fetch**: Bounded retry, failures degrade to zero rows
//! - **Normalization**: Nested JSON flattened to dotted columns with provenance
//! - **Parquet Output**: Schema inferred per warehouse, Snappy compressed
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use warehouse_extract::{config::ExtractorConfig, engine::Extractor, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ExtractorConfig::from_env()?;
//!     let extractor = Extractor::from_config(&config)?;
//!     let summary = extractor.run(&config.warehouses).await?;
//!     println!("{} warehouse(s) written", summary.succeeded());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Extractor::run(warehouses)                   │
//! └──────────────────────────────────────────────────────────────┘
//!                               │ per warehouse
//! ┌──────────┬──────────────┬───┴─────────┬───────────┬──────────┐
//! │ Catalog  │ QueryBuilder │  Fetcher    │  Decode   │ Persister│
//! ├──────────┼──────────────┼─────────────┼───────────┼──────────┤
//! │ 9 queries│ orderby/take │ Retry x2    │ Flatten   │ Arrow    │
//! │ YAML     │ where        │ Token header│ Provenance│ Parquet  │
//! └──────────┴──────────────┴─────────────┴───────────┴──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Query catalog
pub mod catalog;

/// Request URL construction
pub mod query;

/// HTTP client with retry
pub mod http;

/// Response decoding and flattening
pub mod decode;

/// Row collections with provenance
pub mod dataset;

/// Arrow/Parquet output
pub mod output;

/// Environment configuration
pub mod config;

/// Extraction engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use catalog::{load_catalog, Catalog, QueryDefinition};
pub use config::ExtractorConfig;
pub use engine::{Extractor, RunSummary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
