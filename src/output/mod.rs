//! Output module
//!
//! Handles Arrow RecordBatch creation and Parquet file writing.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Inferring Arrow schemas from flattened JSON rows
//! - Converting rows to Arrow RecordBatches and back
//! - Writing Parquet files
//! - Persisting one file per warehouse

mod persist;
mod schema;
mod writer;

pub use persist::{PersistOutcome, Persister, DEFAULT_OUTPUT_DIR};
pub use schema::{arrow_to_json, infer_schema, json_to_arrow};
pub use writer::{write_batch_to_parquet, ParquetWriter, ParquetWriterConfig};
