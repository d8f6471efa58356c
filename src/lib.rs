pub mod cli;
pub mod config;
pub mod display;
pub mod filter;
pub mod query;
pub mod server;
pub mod service;
pub mod store;

pub use cli::{Cli, Commands, OutputFormat, PagingArgs, cli_parse};
pub use config::{QueryConfig, load_config};
pub use filter::{Comparison, FieldFilter, FilterField, FilterSet, SearchParams, extract_number};
pub use query::{PageError, PageRequest, QueryResult};
pub use service::{RecipePage, RecipeService};
pub use store::{MemoryStore, Recipe, RecipeStore, StoreError};

use anyhow::{Context, bail};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber; `RUST_LOG` overrides the verbosity flags
fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn page_request(
    paging: &PagingArgs,
    config: &QueryConfig,
    max_limit: Option<usize>,
) -> anyhow::Result<PageRequest> {
    let limit = paging
        .limit
        .unwrap_or(config.paging.default_limit as i64);
    PageRequest::new(paging.page, limit, max_limit).context("Invalid paging")
}

fn print_page(page: &RecipePage, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", display::format_page_text(page)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(page).context("Failed to serialize results")?
        ),
    }
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_tracing(cli.verbose, cli.quiet);

    let mut config = load_config(cli.config.as_deref()).context("Failed to load config")?;
    tracing::debug!(?config, data = %cli.data.display(), "starting");

    let store = MemoryStore::load(&cli.data)
        .with_context(|| format!("Failed to load recipes from '{}'", cli.data.display()))?;
    let service = RecipeService::new(Arc::new(store))
        .with_preview_chars(config.listing.description_preview_chars);

    match &cli.command {
        Commands::List { paging } => {
            let page = service.list_recipes(page_request(
                paging,
                &config,
                Some(config.paging.max_limit),
            )?)?;
            print_page(&page, cli.format)?;
        }
        Commands::Search { paging, .. } => {
            let params = cli.command.search_params().unwrap_or_default();
            let request = page_request(paging, &config, config.paging.search_max_limit)?;
            let page = service.search_recipes(&params, request)?;
            print_page(&page, cli.format)?;
        }
        Commands::Get { id } => {
            let Some(recipe) = service.get_recipe(*id)? else {
                bail!("Recipe {} not found", id);
            };
            match cli.format {
                OutputFormat::Text => print!("{}", display::format_recipe_text(&recipe)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&recipe)
                        .context("Failed to serialize recipe")?
                ),
            }
        }
        Commands::Serve { bind, static_dir } => {
            if let Some(bind) = bind {
                config.server.bind = bind.clone();
            }
            if let Some(dir) = static_dir {
                config.server.static_dir = Some(dir.clone());
            }

            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime.block_on(server::serve(service, &config))?;
        }
    }

    Ok(())
}
