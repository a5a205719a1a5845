//! Command-line interface for fivex-search.
//!
//! Available commands:
//!
//! - **resolve**: Resolve one or more search queries and print where they lead
//! - **serve**: Start the search API server
//!
//! ## Usage
//!
//! ```text
//! # Positions and ranges resolve without any network access
//! fivex-search resolve chr7:101258000 2:1000-2000
//!
//! # rs-numbers and genes go through omnisearch and the best-variant API
//! fivex-search resolve rs7412 APOE --api-base-url http://localhost:5000
//!
//! # JSON output for scripting
//! fivex-search resolve APOE --format json
//!
//! # Start the API
//! fivex-search serve --port 8080 --config fivex.toml
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::SearchConfig;

pub mod resolve;

#[derive(Parser)]
#[command(name = "fivex-search")]
#[command(version)]
#[command(about = "Resolve genome browser searches into variant positions and regions")]
#[command(
    long_about = "fivex-search turns free-text searches into genome browser locations.\n\nAccepted searches:\n- Positions: chr7:101258000, X:5530600\n- Ranges: 2:1000-2000\n- rs-numbers: rs7412 (resolved through omnisearch)\n- Gene symbols or Ensembl ids: APOE, ENSG00000130203 (resolved to the gene's best variant)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve search queries to locations
    Resolve(resolve::ResolveArgs),

    /// Start the search API server
    Serve(ServeArgs),
}

/// Upstream lookup settings shared by all commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LookupArgs {
    /// TOML file with lookup settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Omnisearch endpoint URL
    #[arg(long)]
    pub omnisearch_url: Option<String>,

    /// Base URL of the API serving /api/gene/{gene_id}/bestvar/
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Genome build sent to omnisearch
    #[arg(long)]
    pub build: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl LookupArgs {
    /// Defaults, then the config file, then command-line flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the final
    /// configuration is invalid.
    pub fn to_config(&self) -> anyhow::Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load_from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SearchConfig::default(),
        };

        if let Some(url) = &self.omnisearch_url {
            config.omnisearch_url.clone_from(url);
        }
        if let Some(url) = &self.api_base_url {
            config.api_base_url.clone_from(url);
        }
        if let Some(build) = &self.build {
            config.build.clone_from(build);
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = timeout;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = LookupArgs {
            api_base_url: Some("http://fivex.example.org".to_string()),
            timeout: Some(2),
            ..LookupArgs::default()
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.api_base_url, "http://fivex.example.org");
        assert_eq!(config.timeout_seconds, 2);
        assert_eq!(config.build, "GRCh38");
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = LookupArgs {
            timeout: Some(0),
            ..LookupArgs::default()
        };
        assert!(args.to_config().is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "fivex-search",
            "resolve",
            "rs7412",
            "APOE",
            "--format",
            "json",
            "--build",
            "GRCh38",
        ])
        .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.queries, vec!["rs7412", "APOE"]);
                assert_eq!(args.lookup.build.as_deref(), Some("GRCh38"));
            }
            Commands::Serve(_) => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_serve_args() {
        let cli = Cli::try_parse_from(["fivex-search", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, 9000);
                assert_eq!(args.address, "127.0.0.1");
            }
            Commands::Resolve(_) => panic!("expected serve"),
        }

        assert!(Cli::try_parse_from(["fivex-search", "serve", "--open"]).is_err());
    }
}
