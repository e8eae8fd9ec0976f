//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Warehouse transaction extract
#[derive(Parser, Debug)]
#[command(name = "warehouse-extract")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Warehouses to process (comma-separated), overrides WAREHOUSE_CODES
    #[arg(short, long, global = true)]
    pub warehouses: Option<String>,

    /// Output directory, overrides OUTPUT_DIR
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Catalog file (YAML), overrides CATALOG_FILE
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run; `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Extract every warehouse and write Parquet files (default)
    Run,

    /// Show the active query catalog
    Catalog {
        /// Output format
        #[arg(short, long, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Print the request URLs for one warehouse without fetching
    Urls {
        /// Warehouse code
        #[arg(long)]
        warehouse: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one definition per line)
    Json,
    /// Human-readable table
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_run() {
        let cli = Cli::try_parse_from(["warehouse-extract", "--warehouses", "1145"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.warehouses.as_deref(), Some("1145"));
    }

    #[test]
    fn test_catalog_format() {
        let cli = Cli::try_parse_from(["warehouse-extract", "catalog", "--format", "json"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Catalog {
                format: OutputFormat::Json
            })
        );
    }

    #[test]
    fn test_urls_requires_warehouse() {
        assert!(Cli::try_parse_from(["warehouse-extract", "urls"]).is_err());

        let cli = Cli::try_parse_from(["warehouse-extract", "-v", "urls", "--warehouse", "1290"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Some(Commands::Urls {
                warehouse: "1290".to_string()
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "warehouse-extract",
            "run",
            "--output-dir",
            "/tmp/out",
            "--catalog",
            "queries.yaml",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Commands::Run));
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(cli.catalog, Some(PathBuf::from("queries.yaml")));
    }
}
