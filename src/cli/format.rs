use clap::ValueEnum;

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tables for people
    #[default]
    Text,
    /// `{page, limit, total, data}` documents for scripts
    Json,
}
