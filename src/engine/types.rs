//! Engine types
//!
//! Per-query outcomes, per-warehouse statistics and the run summary.

use crate::dataset::RecordSet;
use crate::error::{Error, Result};
use crate::types::WarehouseCode;
use serde::Serialize;
use tracing::warn;
use std::path::PathBuf;

/// Result of fetching one query
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The query returned rows
    Records(RecordSet),
    /// The query succeeded with no rows
    Empty,
    /// Every attempt failed, or the body could not be decoded
    Failed {
        /// Last error seen
        reason: String,
    },
}

impl FetchOutcome {
    /// Rows contributed to the dataset; empty unless the fetch produced rows
    pub fn into_records(self) -> RecordSet {
        match self {
            Self::Records(set) => set,
            Self::Empty | Self::Failed { .. } => RecordSet::empty(),
        }
    }

    /// Check if the fetch failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Query counts for one warehouse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryStats {
    /// Queries that returned rows
    pub with_rows: usize,
    /// Queries that returned no rows
    pub empty: usize,
    /// Queries that failed
    pub failed: usize,
}

impl QueryStats {
    /// Count one outcome
    pub fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Records(_) => self.with_rows += 1,
            FetchOutcome::Empty => self.empty += 1,
            FetchOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Queries attempted
    pub fn total(&self) -> usize {
        self.with_rows + self.empty + self.failed
    }
}

/// What happened to one warehouse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarehouseOutcome {
    /// Warehouse processed
    pub warehouse: WarehouseCode,
    /// Rows collected across all queries
    pub rows: usize,
    /// Query counts
    pub queries: QueryStats,
    /// File written, if any
    pub path: Option<PathBuf>,
    /// Why nothing was persisted
    pub failure: Option<String>,
}

impl WarehouseOutcome {
    /// Check if the dataset was persisted
    pub fn is_success(&self) -> bool {
        self.path.is_some()
    }
}

/// Outcomes of every warehouse in a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// One entry per warehouse, in processing order
    pub warehouses: Vec<WarehouseOutcome>,
}

impl RunSummary {
    /// Warehouses whose dataset was persisted
    pub fn succeeded(&self) -> usize {
        self.warehouses.iter().filter(|w| w.is_success()).count()
    }

    /// Warehouses with nothing persisted
    pub fn failed(&self) -> usize {
        self.warehouses.len() - self.succeeded()
    }

    /// Rows persisted across all warehouses
    pub fn total_rows(&self) -> usize {
        self.warehouses
            .iter()
            .filter(|w| w.is_success())
            .map(|w| w.rows)
            .sum()
    }

    /// Fail when no warehouse was persisted
    pub fn into_result(self) -> Result<Self> {
        if self.succeeded() == 0 {
            return Err(Error::AllWarehousesFailed {
                attempted: self.warehouses.len(),
            });
        }
        if self.failed() > 0 {
            warn!("{} warehouse(s) produced no file", self.failed());
        }
        Ok(self)
    }
}
