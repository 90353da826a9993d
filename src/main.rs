use catalog_graph::config::{DEFAULT_CONFIG_PATH, load_config};
use catalog_graph::graph::{GraphBatchWriter, GraphSink, MemoryGraphStore};
use catalog_graph::logger::{self, ConsoleLogger, LogLevel, init_logger};
use catalog_graph::mapping::EntityMapper;
use catalog_graph::pipeline::{Pipeline, Resource};
use catalog_graph::source::{CatalogSource, RateLimiter, SourceClient};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "catalog-graph")]
#[command(about = "Loads a video game catalog into a SPARQL graph store", long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Minimum level written to stderr
    #[arg(long, default_value = "info")]
    log_level: LogLevel,

    /// Keep triples in memory and print them as N-Triples instead of writing
    #[arg(long)]
    dry_run: bool,

    /// Log a failing resolver and continue with the next one
    #[arg(long)]
    keep_going: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every resolver: platforms, genres, games, groups
    Run,
    /// Run a single resolver
    Resource {
        #[arg(value_enum)]
        name: Resource,

        /// Fetch bare game ids instead of full game records
        #[arg(long)]
        no_details: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logger(ConsoleLogger::new(cli.log_level));

    let config = load_config(&cli.config)?;

    let limiter = Arc::new(RateLimiter::per_second(config.source.max_calls_per_second)?);
    let timeout = Duration::from_secs(config.source.timeout_secs);
    let source: Arc<dyn CatalogSource> = Arc::new(SourceClient::new(
        config.source.endpoint.clone(),
        config.source.api_key.clone(),
        limiter,
        timeout,
    )?);

    let dry_run_store = cli.dry_run.then(|| Arc::new(MemoryGraphStore::new()));
    let sink: Arc<dyn GraphSink> = match &dry_run_store {
        Some(store) => store.clone(),
        None => Arc::new(GraphBatchWriter::new(
            config.storage.sparql_update.clone(),
            config.storage.auth.user.clone(),
            config.storage.auth.password.clone(),
            timeout,
        )?),
    };

    let pipeline = Pipeline::new(
        source,
        sink,
        EntityMapper::default(),
        config.source.page_size,
    );

    let outcome: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Run => {
            let continue_on_error = cli.keep_going || config.pipeline.continue_on_error;
            match pipeline.run_all(continue_on_error).await {
                Ok(summary) if summary.is_success() => {
                    logger::info(&format!(
                        "run completed: {} triples written",
                        summary.triples_written()
                    ));
                    Ok(())
                }
                Ok(summary) => {
                    let failed: Vec<String> = summary
                        .failures
                        .iter()
                        .map(|(resource, _)| resource.to_string())
                        .collect();
                    Err(format!("resolvers failed: {}", failed.join(", ")).into())
                }
                Err(e) => Err(e.into()),
            }
        }
        Commands::Resource { name, no_details } => pipeline
            .run_with_details(name, !no_details)
            .await
            .map(|_| ())
            .map_err(Into::into),
    };

    if let Some(store) = dry_run_store {
        print!("{}", store.snapshot().to_ntriples());
    }
    logger::flush();

    outcome
}
