mod format;

use crate::filter::SearchParams;
use clap::{Args, Parser, Subcommand};
pub use format::OutputFormat;
use std::path::PathBuf;

/// Query a recipe collection: list, search with filters, or serve it over HTTP
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Recipe data file (JSON array, or object of records)
    #[arg(short, long, global = true, env = "RECIPES_DATA", default_value = "recipes.json")]
    pub data: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "RECIPES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all recipes, best-rated first
    List {
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Search recipes by title, cuisine, rating, total time and calories
    Search {
        /// Case-insensitive substring of the title
        #[arg(long)]
        title: Option<String>,

        /// Case-insensitive substring of the cuisine
        #[arg(long)]
        cuisine: Option<String>,

        /// Rating comparison (e.g. ">=4.5", "gte:4.5", "4.5")
        #[arg(long, allow_hyphen_values = true)]
        rating: Option<String>,

        /// Total time comparison in minutes (e.g. "<=30", "lte:30")
        #[arg(long, allow_hyphen_values = true)]
        total_time: Option<String>,

        /// Calories comparison (e.g. "lt:400")
        #[arg(long, allow_hyphen_values = true)]
        calories: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Show a single recipe by id
    Get {
        /// Recipe id
        id: i64,
    },
    /// Serve the recipe API over HTTP
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(short, long)]
        bind: Option<String>,

        /// Frontend directory served under /static (overrides the config file)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PagingArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    pub page: i64,

    /// Results per page (defaults to the configured limit)
    #[arg(short, long, allow_hyphen_values = true)]
    pub limit: Option<i64>,
}

impl Commands {
    /// Collect the search flags into raw filter values
    pub fn search_params(&self) -> Option<SearchParams> {
        match self {
            Commands::Search {
                title,
                cuisine,
                rating,
                total_time,
                calories,
                ..
            } => Some(SearchParams {
                title: title.clone(),
                cuisine: cuisine.clone(),
                rating: rating.clone(),
                total_time: total_time.clone(),
                calories: calories.clone(),
            }),
            _ => None,
        }
    }
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_flags_become_params() {
        let cli = Cli::try_parse_from([
            "recipe-query",
            "search",
            "--rating",
            ">=4.5",
            "--title",
            "pie",
            "--limit",
            "5",
        ])
        .unwrap();

        let params = cli.command.search_params().unwrap();
        assert_eq!(params.rating.as_deref(), Some(">=4.5"));
        assert_eq!(params.title.as_deref(), Some("pie"));
        assert_eq!(params.cuisine, None);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "recipe-query",
            "list",
            "--format",
            "json",
            "-vv",
            "--data",
            "data.json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data, PathBuf::from("data.json"));
    }
}
