use clap::Args;

use crate::cli::{LookupArgs, OutputFormat};
use crate::core::types::{ErrorKind, LocationQuery};
use crate::lookup::client::HttpLookupClient;
use crate::navigation::{SearchResponse, UNRESOLVED_MESSAGE};
use crate::resolver::{Resolution, Resolver};
use crate::utils::validation::validate_query;

#[derive(Args)]
pub struct ResolveArgs {
    /// Search queries: positions, ranges, rs-numbers or gene terms
    #[arg(required = true)]
    pub queries: Vec<String>,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

/// Execute resolve subcommand
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the runtime cannot be
/// started, output fails, or any query is unresolved.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.lookup.to_config()?;
    if verbose {
        eprintln!(
            "Omnisearch: {} (build {}), best variant API: {}",
            config.omnisearch_url, config.build, config.api_base_url
        );
    }

    let resolver = Resolver::new(HttpLookupClient::new(&config)?);
    let rt = tokio::runtime::Runtime::new()?;
    let responses = rt.block_on(async {
        let mut responses: Vec<SearchResponse> = Vec::with_capacity(args.queries.len());
        for query in &args.queries {
            responses.push(SearchResponse::from(resolve_one(&resolver, query).await));
        }
        responses
    });

    match format {
        OutputFormat::Text => print_text_results(&responses, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&responses)?),
        OutputFormat::Tsv => print_tsv_results(&responses),
    }

    let failed = responses.iter().filter(|r| !r.result.is_resolved()).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} queries could not be resolved", responses.len());
    }
    Ok(())
}

async fn resolve_one(resolver: &Resolver<HttpLookupClient>, query: &str) -> Resolution {
    match validate_query(query) {
        Ok(text) => resolver.resolve_detailed(text).await,
        Err(e) => {
            tracing::warn!("Rejected query: {}", e);
            Resolution {
                query: query.to_string(),
                result: LocationQuery::unresolved(ErrorKind::ParseFailure),
                best_variant: None,
            }
        }
    }
}

fn print_text_results(responses: &[SearchResponse], verbose: bool) {
    for response in responses {
        let Some(destination) = &response.destination else {
            let reason = response.result.error().unwrap_or(ErrorKind::ParseFailure);
            println!("{}: {UNRESOLVED_MESSAGE} ({reason})", response.query);
            continue;
        };

        println!(
            "{}: {} {} -> {}",
            response.query,
            response.result.kind(),
            display_location(&response.result),
            destination.path()
        );

        if let Some(best) = &response.best_variant {
            if let Some(gene_id) = &best.gene_id {
                println!("  Gene: {gene_id}");
            }
            if let Some(variant_id) = &response.variant_id {
                println!("  Best variant: {variant_id}");
            }
            if verbose {
                if let (Some(study), Some(tissue)) = (&best.study, &best.tissue) {
                    println!("  Study: {study} ({tissue})");
                }
                if let Some(pvalue) = best.pvalue {
                    println!("  P-value: {pvalue:.3e}");
                }
            }
        }
    }
}

fn print_tsv_results(responses: &[SearchResponse]) {
    println!("query\ttype\tchrom\tstart\tend\tdestination\terror");
    for response in responses {
        let (start, end) = response
            .result
            .span()
            .map_or((String::new(), String::new()), |(s, e)| {
                (s.to_string(), e.to_string())
            });
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            response.query,
            response.result.kind(),
            response.result.display_chrom().unwrap_or(""),
            start,
            end,
            response
                .destination
                .as_ref()
                .map_or("", |d| d.path()),
            response.result.error().map_or("", ErrorKind::as_str),
        );
    }
}

/// Location with the `chr` prefix removed, as a view would show it
fn display_location(location: &LocationQuery) -> String {
    match (location.display_chrom(), location.span()) {
        (Some(chrom), Some((start, end))) if start == end => format!("{chrom}:{start}"),
        (Some(chrom), Some((start, end))) => format!("{chrom}:{start}-{end}"),
        _ => String::new(),
    }
}
