//! `payroll-view`: browse the demo tables from the command line.
//!
//! ```text
//! payroll-view payrolls --status pending --sort total_amount:desc
//! payroll-view payrolls --query 'tab=payroll&search=alice' --json
//! payroll-view characters --status Alive --page-size 5
//! ```
//!
//! Set `LISTVIEW_LOG=debug` to watch state transitions on stderr.

use std::io::stderr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use clap::{Args, Parser, Subcommand};
use listview::{DateRange, SortKey, ViewConfig, ViewController};
use listview_demo::character::{self, CharacterPage};
use listview_demo::payroll::{self, Payroll};
use listview_demo::{render, OutputFormat, ViewRequest};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "LISTVIEW_LOG";

#[derive(Parser)]
#[command(name = "payroll-view", version, about = "Filter, sort and page demo tables")]
struct Cli {
    /// Table layout (YAML or JSON) replacing the built-in one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mock payroll records
    Payrolls {
        /// Number of mock records
        #[arg(long, default_value_t = 40)]
        count: usize,

        /// received, pending, processed, failed or all
        #[arg(long)]
        status: Option<String>,

        /// "Bank Transfer", "Direct Deposit", "Wire Transfer" or all
        #[arg(long)]
        method: Option<String>,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// A saved page of the Rick and Morty character API
    Characters {
        #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/characters.json"))]
        file: PathBuf,

        /// Alive, Dead, unknown or all
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Debug, Args)]
struct ViewArgs {
    /// URL query string, e.g. 'search=alice'
    #[arg(long)]
    query: Option<String>,

    /// Free-text search
    #[arg(long, short)]
    search: Option<String>,

    /// all, today, yesterday, last7days or last30days
    #[arg(long)]
    date: Option<DateRange>,

    /// Sort key as column or column:desc; repeat for secondary keys
    #[arg(long = "sort")]
    sort: Vec<SortKey>,

    /// One-based page number
    #[arg(long, short)]
    page: Option<usize>,

    #[arg(long)]
    page_size: Option<usize>,

    /// Hide a column
    #[arg(long = "hide")]
    hide: Vec<String>,

    /// Select a row by key
    #[arg(long = "select")]
    select: Vec<String>,

    /// Toggle selection of every row on the page
    #[arg(long)]
    select_page: bool,

    /// Print the view snapshot as JSON
    #[arg(long)]
    json: bool,
}

impl ViewArgs {
    fn request(&self, filters: Vec<(String, String)>) -> ViewRequest {
        ViewRequest {
            query: self.query.clone(),
            search: self.search.clone(),
            filters,
            date_range: self.date,
            sort: self.sort.clone(),
            page: self.page,
            page_size: self.page_size,
            hide: self.hide.clone(),
            select: self.select.clone(),
            select_page: self.select_page,
        }
    }

    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

fn filters(pairs: &[(&str, &Option<String>)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
        .collect()
}

fn start_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .without_time()
        .init();
}

fn load_config(path: Option<&PathBuf>, default: fn() -> ViewConfig) -> Result<ViewConfig> {
    match path {
        Some(path) => ViewConfig::from_file(path)
            .with_context(|| format!("failed to load view config {}", path.display())),
        None => Ok(default()),
    }
}

fn main() -> Result<()> {
    start_logging();
    let cli = Cli::parse();

    let output = match &cli.command {
        Command::Payrolls {
            count,
            status,
            method,
            view,
        } => {
            let config = load_config(cli.config.as_ref(), payroll::config)?;
            let now: DateTime<FixedOffset> = Local::now().into();
            let records = payroll::mock_payrolls(*count, now);

            let request = view.request(filters(&[
                (Payroll::STATUS, status),
                (Payroll::PAYMENT_METHOD, method),
            ]));
            let controller = request.apply(ViewController::new(records, config)?)?;
            render(&controller, view.format())?
        }
        Command::Characters { file, status, view } => {
            let config = load_config(cli.config.as_ref(), character::config)?;
            let page = CharacterPage::load(file)?;
            tracing::info!(
                count = page.info.count,
                pages = page.info.pages,
                "loaded character page"
            );

            let request = view.request(filters(&[(character::Character::STATUS, status)]));
            let controller = request.apply(ViewController::new(page.results, config)?)?;
            render(&controller, view.format())?
        }
    };

    print!("{output}");
    Ok(())
}
