//! CLI runner - executes commands

use crate::catalog::{load_catalog, Catalog};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{
    optional_var, parse_var, required_var, ExtractorConfig, ENV_API_BASE_URL, ENV_CATALOG_FILE,
    ENV_LOOKBACK_DAYS,
};
use crate::engine::Extractor;
use crate::error::{Error, Result};
use crate::query::{QueryBuilder, DEFAULT_LOOKBACK_DAYS};
use crate::types::WarehouseCode;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            None | Some(Commands::Run) => self.extract().await,
            Some(Commands::Catalog { format }) => self.show_catalog(*format),
            Some(Commands::Urls { warehouse }) => self.urls(warehouse),
        }
    }

    /// Environment config with command-line overrides applied
    fn load_config(&self) -> Result<ExtractorConfig> {
        let mut config = ExtractorConfig::from_env()?;

        if let Some(raw) = &self.cli.warehouses {
            let warehouses = WarehouseCode::parse_list(raw);
            if warehouses.is_empty() {
                return Err(Error::invalid_value(
                    "--warehouses",
                    "no warehouse codes given",
                ));
            }
            config.warehouses = warehouses;
        }
        if let Some(dir) = &self.cli.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(path) = &self.cli.catalog {
            config.catalog_file = Some(path.clone());
        }

        Ok(config)
    }

    /// Catalog from the flag, then the environment, then the built-in table
    fn load_catalog(&self) -> Result<Catalog> {
        let env = |key: &str| std::env::var(key).ok();
        let path = self
            .cli
            .catalog
            .clone()
            .or_else(|| optional_var(&env, ENV_CATALOG_FILE).map(PathBuf::from));

        match path {
            Some(path) => load_catalog(path),
            None => Ok(Catalog::builtin()),
        }
    }

    /// Full extraction
    async fn extract(&self) -> Result<()> {
        let config = self.load_config()?;
        info!(
            warehouses = config.warehouses.len(),
            output_dir = %config.output_dir.display(),
            "Starting extraction"
        );

        let extractor = Extractor::from_config(&config)?;
        let summary = extractor.extract_all(&config.warehouses).await;

        for outcome in &summary.warehouses {
            self.output_message(&json!({
                "type": "WAREHOUSE",
                "warehouse": outcome,
            }));
        }
        self.output_message(&json!({
            "type": "SUMMARY",
            "succeeded": summary.succeeded(),
            "failed": summary.failed(),
            "rows": summary.total_rows(),
        }));

        summary.into_result().map(|_| ())
    }

    /// Print the active catalog
    fn show_catalog(&self, format: OutputFormat) -> Result<()> {
        let catalog = self.load_catalog()?;

        match format {
            OutputFormat::Json => {
                for query in &catalog {
                    println!("{}", serde_json::to_string(query)?);
                }
            }
            OutputFormat::Pretty => {
                let width = catalog.names().iter().map(|n| n.len()).max().unwrap_or(0);
                for query in &catalog {
                    println!(
                        "{:<width$}  {:>6}  {}",
                        query.name, query.page_cap, query.predicate
                    );
                }
            }
        }

        Ok(())
    }

    /// Print every request URL for one warehouse
    fn urls(&self, warehouse: &str) -> Result<()> {
        let env = |key: &str| std::env::var(key).ok();
        let base_url = required_var(&env, ENV_API_BASE_URL)?;
        let lookback =
            parse_var::<u32, _>(&env, ENV_LOOKBACK_DAYS)?.unwrap_or(DEFAULT_LOOKBACK_DAYS);

        let builder = QueryBuilder::new(&base_url)?.with_lookback_days(lookback);
        let catalog = self.load_catalog()?;
        let warehouse = WarehouseCode::new(warehouse);

        for query in &catalog {
            println!("{}", builder.build_url(query, &warehouse));
        }

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        println!("{}", serde_json::to_string(msg).unwrap_or_default());
    }
}
