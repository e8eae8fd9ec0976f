//! Resilient single-query fetch
//!
//! Wraps the retrying HTTP client and the decoder. A query that cannot be
//! fetched or decoded degrades to zero rows instead of failing the run.

use super::types::FetchOutcome;
use crate::dataset::RecordSet;
use crate::decode::decode_records;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::WarehouseCode;
use chrono::Utc;
use tracing::{info, warn};
use url::Url;

/// Fetches and normalizes one query at a time
#[derive(Debug)]
pub struct Fetcher {
    client: HttpClient,
}

impl Fetcher {
    /// Create a fetcher with its own client
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_config(config)?,
        })
    }

    /// Fetch one URL; never fails
    ///
    /// Rows are tagged with `source` and `warehouse` and the time the
    /// response arrived.
    pub async fn fetch(&self, url: &Url, source: &str, warehouse: &WarehouseCode) -> FetchOutcome {
        let body = match self.client.get_text(url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(%warehouse, query = source, "Giving up on query: {e}");
                return FetchOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };
        let loaded_at = Utc::now();

        match decode_records(&body) {
            Ok(rows) if rows.is_empty() => {
                info!(%warehouse, query = source, "Query returned no rows");
                FetchOutcome::Empty
            }
            Ok(rows) => {
                info!(%warehouse, query = source, rows = rows.len(), "Query returned rows");
                FetchOutcome::Records(RecordSet::with_provenance(
                    rows, source, warehouse, loaded_at,
                ))
            }
            Err(e) => {
                warn!(%warehouse, query = source, "Discarding undecodable response: {e}");
                FetchOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
