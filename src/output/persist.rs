//! One Parquet file per warehouse

use super::schema::json_to_arrow;
use super::writer::{write_batch_to_parquet, ParquetWriterConfig};
use crate::dataset::WarehouseDataset;
use crate::error::{Result, ResultExt};
use crate::types::WarehouseCode;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// What happened to a dataset handed to the persister
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The file was written
    Written {
        /// Location of the file
        path: PathBuf,
        /// Rows in the file
        rows: usize,
    },
    /// The dataset had no rows; nothing was written
    Skipped,
}

impl PersistOutcome {
    /// Whether a file was written
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Writes warehouse datasets to `<dir>/transactions_<code>.parquet`
#[derive(Debug, Clone)]
pub struct Persister {
    output_dir: PathBuf,
    writer_config: ParquetWriterConfig,
}

impl Persister {
    /// Create a persister writing under `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            writer_config: ParquetWriterConfig::default(),
        }
    }

    /// Directory files are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File a warehouse's dataset is written to
    pub fn path_for(&self, warehouse: &WarehouseCode) -> PathBuf {
        let safe: String = warehouse
            .as_str()
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.output_dir.join(format!("transactions_{safe}.parquet"))
    }

    /// Write the dataset, or skip it when empty
    pub fn persist(&self, dataset: &WarehouseDataset) -> Result<PersistOutcome> {
        if dataset.is_empty() {
            warn!(warehouse = %dataset.warehouse(), "No data obtained, skipping write");
            return Ok(PersistOutcome::Skipped);
        }

        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory '{}'",
                self.output_dir.display()
            )
        })?;

        let path = self.path_for(dataset.warehouse());
        let batch = json_to_arrow(dataset.rows(), None)?;
        let rows = write_batch_to_parquet(&path, &batch, Some(&self.writer_config))?;

        info!(
            warehouse = %dataset.warehouse(),
            rows,
            columns = batch.num_columns(),
            path = %path.display(),
            "Saved dataset"
        );

        Ok(PersistOutcome::Written { path, rows })
    }
}

impl Default for Persister {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}
