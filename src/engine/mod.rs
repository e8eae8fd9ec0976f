//! Execution engine module
//!
//! Sequential extraction: every catalog query for one warehouse, then the
//! next warehouse.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Fetcher` - One query with bounded retry, degrading to zero rows
//! - `Extractor` - The per-warehouse loop and the run over all warehouses
//! - `RunSummary` - What happened to every warehouse
//!
//! Nothing runs concurrently. The only waits are the fixed pauses between
//! attempts, between queries and between warehouses.

mod fetcher;
mod types;

pub use fetcher::Fetcher;
pub use types::{FetchOutcome, QueryStats, RunSummary, WarehouseOutcome};

use crate::catalog::Catalog;
use crate::config::{ExtractorConfig, Pacing};
use crate::dataset::WarehouseDataset;
use crate::error::Result;
use crate::output::{PersistOutcome, Persister};
use crate::query::QueryBuilder;
use crate::types::WarehouseCode;
use std::time::Duration;
use tracing::{error, info};

/// Runs the catalog against each warehouse and persists the results
#[derive(Debug)]
pub struct Extractor {
    fetcher: Fetcher,
    builder: QueryBuilder,
    catalog: Catalog,
    persister: Persister,
    pacing: Pacing,
}

impl Extractor {
    /// Create an extractor with default pacing
    pub fn new(
        fetcher: Fetcher,
        builder: QueryBuilder,
        catalog: Catalog,
        persister: Persister,
    ) -> Self {
        Self {
            fetcher,
            builder,
            catalog,
            persister,
            pacing: Pacing::default(),
        }
    }

    /// Build everything from configuration
    pub fn from_config(config: &ExtractorConfig) -> Result<Self> {
        let extractor = Self::new(
            Fetcher::with_config(config.http_config())?,
            config.query_builder()?,
            config.catalog()?,
            Persister::new(&config.output_dir),
        );
        Ok(extractor.with_pacing(config.pacing))
    }

    /// Set the pauses between queries and warehouses
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// The catalog in use
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fetch every catalog query for one warehouse
    ///
    /// The dataset holds the rows of every query that produced any, in
    /// catalog order. It is empty when all queries failed or were empty.
    pub async fn process_warehouse(&self, warehouse: &WarehouseCode) -> WarehouseDataset {
        self.collect(warehouse).await.0
    }

    async fn collect(&self, warehouse: &WarehouseCode) -> (WarehouseDataset, QueryStats) {
        let mut dataset = WarehouseDataset::new(warehouse.clone());
        let mut stats = QueryStats::default();
        let total = self.catalog.len();

        for (i, query) in self.catalog.iter().enumerate() {
            info!(%warehouse, query = %query.name, "Query {}/{total}", i + 1);

            let url = self.builder.build_url(query, warehouse);
            let outcome = self.fetcher.fetch(&url, &query.name, warehouse).await;
            stats.record(&outcome);

            let records = outcome.into_records();
            if !records.is_empty() {
                dataset.append(records);
            }

            if i + 1 < total {
                pause(self.pacing.query_delay, "next query").await;
            }
        }

        info!(
            %warehouse,
            rows = dataset.len(),
            with_rows = stats.with_rows,
            empty = stats.empty,
            failed = stats.failed,
            "Warehouse queries finished"
        );

        (dataset, stats)
    }

    /// Process and persist every warehouse
    ///
    /// Every warehouse is attempted. The run fails only when none of them
    /// ended with a persisted file.
    pub async fn run(&self, warehouses: &[WarehouseCode]) -> Result<RunSummary> {
        self.extract_all(warehouses).await.into_result()
    }

    /// Process and persist every warehouse, reporting failures in the summary
    pub async fn extract_all(&self, warehouses: &[WarehouseCode]) -> RunSummary {
        let mut summary = RunSummary::default();

        for (i, warehouse) in warehouses.iter().enumerate() {
            info!(%warehouse, "Starting warehouse {}/{}", i + 1, warehouses.len());

            let (dataset, queries) = self.collect(warehouse).await;
            let rows = dataset.len();

            let (path, failure) = match self.persister.persist(&dataset) {
                Ok(PersistOutcome::Written { path, .. }) => (Some(path), None),
                Ok(PersistOutcome::Skipped) => (None, Some("no data obtained".to_string())),
                Err(e) => {
                    error!(%warehouse, "Failed to save dataset: {e}");
                    (None, Some(e.to_string()))
                }
            };

            summary.warehouses.push(WarehouseOutcome {
                warehouse: warehouse.clone(),
                rows,
                queries,
                path,
                failure,
            });

            if i + 1 < warehouses.len() {
                pause(self.pacing.warehouse_delay, "next warehouse").await;
            }
        }

        info!(
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            rows = summary.total_rows(),
            "Run finished"
        );

        summary
    }
}

async fn pause(delay: Duration, before: &str) {
    if delay.is_zero() {
        return;
    }
    info!("Waiting {delay:?} before {before}");
    tokio::time::sleep(delay).await;
}

#[cfg(test)]
mod tests;
