//! Run configuration
//!
//! All settings come from the process environment; nothing is read
//! interactively. Missing required values are reported before any request
//! is made.
//!
//! | variable | default |
//! |----------|---------|
//! | `API_TOKEN` | required |
//! | `API_BASE_URL` | required |
//! | `WAREHOUSE_CODES` | `1145,1290` |
//! | `OUTPUT_DIR` | `data` |
//! | `AUTH_HEADER` | `token` |
//! | `CATALOG_FILE` | built-in catalog |
//! | `REQUEST_TIMEOUT_SECS` | 30 |
//! | `MAX_RETRIES` | 2 |
//! | `RETRY_DELAY_SECS` | 10 |
//! | `QUERY_DELAY_SECS` | 30 |
//! | `WAREHOUSE_DELAY_SECS` | 30 |
//! | `LOOKBACK_DAYS` | 182 |

use crate::catalog::{load_catalog, Catalog};
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, TokenAuth, DEFAULT_TOKEN_HEADER};
use crate::output::DEFAULT_OUTPUT_DIR;
use crate::query::{QueryBuilder, DEFAULT_LOOKBACK_DAYS};
use crate::types::WarehouseCode;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_API_TOKEN: &str = "API_TOKEN";
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_WAREHOUSE_CODES: &str = "WAREHOUSE_CODES";
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";
pub const ENV_AUTH_HEADER: &str = "AUTH_HEADER";
pub const ENV_CATALOG_FILE: &str = "CATALOG_FILE";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "MAX_RETRIES";
pub const ENV_RETRY_DELAY_SECS: &str = "RETRY_DELAY_SECS";
pub const ENV_QUERY_DELAY_SECS: &str = "QUERY_DELAY_SECS";
pub const ENV_WAREHOUSE_DELAY_SECS: &str = "WAREHOUSE_DELAY_SECS";
pub const ENV_LOOKBACK_DAYS: &str = "LOOKBACK_DAYS";

/// Warehouses processed when none are configured
pub const DEFAULT_WAREHOUSES: &str = "1145,1290";

/// Fixed sleeps between requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Sleep between consecutive queries of one warehouse
    pub query_delay: Duration,
    /// Sleep between consecutive warehouses
    pub warehouse_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            query_delay: Duration::from_secs(30),
            warehouse_delay: Duration::from_secs(30),
        }
    }
}

impl Pacing {
    /// No sleeping at all
    pub fn none() -> Self {
        Self {
            query_delay: Duration::ZERO,
            warehouse_delay: Duration::ZERO,
        }
    }
}

/// Everything a run needs
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Transactions endpoint
    pub base_url: String,
    /// Token and header it travels under
    pub auth: TokenAuth,
    /// Warehouses in processing order
    pub warehouses: Vec<WarehouseCode>,
    /// Where Parquet files go
    pub output_dir: PathBuf,
    /// Alternative catalog; `None` uses the built-in one
    pub catalog_file: Option<PathBuf>,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Additional attempts after the first
    pub max_retries: u32,
    /// Sleep between attempts
    pub retry_delay: Duration,
    /// Sleeps between queries and warehouses
    pub pacing: Pacing,
    /// Look-back window of every query
    pub lookback_days: u32,
}

impl ExtractorConfig {
    /// Minimal config with defaults for everything optional
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let http = HttpClientConfig::default();
        Self {
            base_url: base_url.into(),
            auth: TokenAuth::new(token),
            warehouses: WarehouseCode::parse_list(DEFAULT_WAREHOUSES),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            catalog_file: None,
            request_timeout: http.timeout,
            max_retries: http.max_retries,
            retry_delay: http.retry_delay,
            pacing: Pacing::default(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    /// Read the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = required_var(&lookup, ENV_API_TOKEN)?;
        let base_url = required_var(&lookup, ENV_API_BASE_URL)?;
        // Fail on a malformed endpoint now rather than at the first request
        QueryBuilder::new(&base_url)?;

        let header = optional_var(&lookup, ENV_AUTH_HEADER)
            .unwrap_or_else(|| DEFAULT_TOKEN_HEADER.to_string());

        let warehouses = WarehouseCode::parse_list(
            &optional_var(&lookup, ENV_WAREHOUSE_CODES)
                .unwrap_or_else(|| DEFAULT_WAREHOUSES.to_string()),
        );
        if warehouses.is_empty() {
            return Err(Error::invalid_value(
                ENV_WAREHOUSE_CODES,
                "no warehouse codes given",
            ));
        }

        let defaults = Self::new(&base_url, &token);

        Ok(Self {
            auth: TokenAuth::with_header(header, token),
            warehouses,
            output_dir: optional_var(&lookup, ENV_OUTPUT_DIR)
                .map_or(defaults.output_dir, PathBuf::from),
            catalog_file: optional_var(&lookup, ENV_CATALOG_FILE).map(PathBuf::from),
            request_timeout: parse_secs(&lookup, ENV_REQUEST_TIMEOUT_SECS)?
                .unwrap_or(defaults.request_timeout),
            max_retries: parse_var(&lookup, ENV_MAX_RETRIES)?.unwrap_or(defaults.max_retries),
            retry_delay: parse_secs(&lookup, ENV_RETRY_DELAY_SECS)?
                .unwrap_or(defaults.retry_delay),
            pacing: Pacing {
                query_delay: parse_secs(&lookup, ENV_QUERY_DELAY_SECS)?
                    .unwrap_or(defaults.pacing.query_delay),
                warehouse_delay: parse_secs(&lookup, ENV_WAREHOUSE_DELAY_SECS)?
                    .unwrap_or(defaults.pacing.warehouse_delay),
            },
            lookback_days: parse_var(&lookup, ENV_LOOKBACK_DAYS)?
                .unwrap_or(defaults.lookback_days),
            base_url,
        })
    }

    /// HTTP client settings
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .timeout(self.request_timeout)
            .max_retries(self.max_retries)
            .retry_delay(self.retry_delay)
            .auth(self.auth.clone())
            .build()
    }

    /// URL builder for the configured endpoint
    pub fn query_builder(&self) -> Result<QueryBuilder> {
        Ok(QueryBuilder::new(&self.base_url)?.with_lookback_days(self.lookback_days))
    }

    /// The configured catalog, loading it from file when one is set
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_file {
            Some(path) => load_catalog(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

/// A setting that must be present and non-blank
pub fn required_var<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional_var(lookup, key).ok_or_else(|| Error::missing_field(key))
}

pub(crate) fn optional_var<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    optional_var(lookup, key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| Error::invalid_value(key, format!("'{raw}': {e}")))
        })
        .transpose()
}

fn parse_secs<F>(lookup: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_var::<u64, F>(lookup, key)?.map(Duration::from_secs))
}
