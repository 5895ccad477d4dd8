use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "dashboard-cli",
    version,
    about = "Resolve date variables and render dashboard tables from JSON records."
)]
pub struct Args {
    /// Reference date used as TODAY. Defaults to the config, then the local date.
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    /// Config file. Defaults to config.json in the platform config directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to stderr as well (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the date each token resolves to.
    Resolve {
        #[arg(required = true, value_name = "TOKEN")]
        tokens: Vec<String>,
    },

    /// Replace date variables in a condition with quoted dates.
    Rewrite { condition: String },

    /// Split a list expression and resolve its date variables, one part per line.
    Split { expression: String },

    /// Sort, filter and paginate a JSON record file.
    Table(TableArgs),

    /// Inspect or change the stored session.
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(clap::Args)]
pub struct TableArgs {
    /// JSON array of records, or an object of records keyed by id.
    pub file: PathBuf,

    /// Column to sort by.
    #[arg(long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Column the search query applies to.
    #[arg(long, value_name = "KEY")]
    pub filter_column: Option<String>,

    /// Case-insensitive search text.
    #[arg(long, requires = "filter_column")]
    pub query: Option<String>,

    /// Page to show, starting at 1.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,

    /// Rows per page. Defaults to the configured page size.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Treat the file as one server page out of this many (manual pagination).
    #[arg(long)]
    pub page_count: Option<usize>,

    /// Columns to hide (repeatable).
    #[arg(long = "hide", value_name = "KEY")]
    pub hidden: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Show whether a token is stored.
    Show,
    /// Store an auth token.
    SetToken { token: String },
    /// Drop everything the session holds.
    SignOut,
}
