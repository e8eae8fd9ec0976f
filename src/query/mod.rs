//! Request URL construction
//!
//! Composes the warehouse-scoped, date-windowed base filter with a catalog
//! predicate and encodes the result into a request URL.
//!
//! The look-back window is emitted as a relative expression
//! (`current_date -182`) and evaluated by the server at request time.

use crate::catalog::QueryDefinition;
use crate::error::Result;
use crate::types::WarehouseCode;
use url::form_urlencoded;
use url::Url;

/// Default look-back window in days
pub const DEFAULT_LOOKBACK_DAYS: u32 = 182;

/// Ordering applied to every query
pub const ORDER_BY: &str = "ctxn_transaction_date desc";

/// Builds request URLs against one endpoint
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base_url: Url,
    lookback_days: u32,
}

impl QueryBuilder {
    /// Create a builder for an endpoint
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url.trim())?,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        })
    }

    /// Set the look-back window
    #[must_use]
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    /// The endpoint
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The look-back window in days
    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Composite filter text, before encoding
    pub fn filter(&self, query: &QueryDefinition, warehouse: &WarehouseCode) -> String {
        format!(
            "ctxn_warehouse_code ilike '{warehouse}' \
             and (ctxn_transaction_date > current_date -{days}) \
             and ({predicate})",
            days = self.lookback_days,
            predicate = query.predicate,
        )
    }

    /// Full request URL for one query and warehouse
    pub fn build_url(&self, query: &QueryDefinition, warehouse: &WarehouseCode) -> Url {
        let params = [
            ("orderby", ORDER_BY.to_string()),
            ("take", query.page_cap.to_string()),
            ("where", self.filter(query, warehouse)),
        ];

        let mut encoded = params
            .iter()
            .map(|(key, value)| format!("{key}={}", encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        if let Some(existing) = self.base_url.query().filter(|q| !q.is_empty()) {
            encoded = format!("{existing}&{encoded}");
        }

        let mut url = self.base_url.clone();
        url.set_query(Some(&encoded));
        url
    }
}

/// Percent-encode a query value, spaces as `%20`
fn encode(value: &str) -> String {
    // form encoding maps a literal '+' to %2B, so every '+' left is a space
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests;
