use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tally_core::ALL_REGIONS;
use tally_ledger::{Collection, EntryKind, FileStore, Ledger, Submission};
use tally_metrics::{DashboardView, MetricsClient, export_table_csv};

mod config;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")"),
    about = "Metrics dashboard and personal ledger"
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG wins if set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch department and time-series metrics and print the dashboard
    Dashboard {
        /// Metrics API base URL (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Region to show, or "All"
        #[arg(long, default_value = ALL_REGIONS)]
        region: String,

        /// Also write the department table as CSV
        #[arg(long)]
        export_csv: Option<PathBuf>,
    },

    /// Personal ledger of cash transactions and investments
    Ledger {
        #[command(subcommand)]
        command: LedgerCommand,
    },

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LedgerCommand {
    /// Record an income, expense or investment
    Add {
        #[arg(value_enum)]
        kind: KindArg,

        /// Description for cash entries, holding name for investments
        #[arg(long)]
        label: String,

        #[arg(long)]
        amount: f64,

        /// YYYY-MM-DD (default: today in the configured timezone)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete an entry by id
    Delete {
        #[arg(value_enum)]
        collection: CollectionArg,

        id: i64,
    },

    /// Print totals, lists and breakdowns
    Show,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective configuration
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Income,
    Expense,
    Investment,
}

impl From<KindArg> for EntryKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Income => EntryKind::Income,
            KindArg::Expense => EntryKind::Expense,
            KindArg::Investment => EntryKind::Investment,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CollectionArg {
    Transaction,
    Investment,
}

impl From<CollectionArg> for Collection {
    fn from(c: CollectionArg) -> Self {
        match c {
            CollectionArg::Transaction => Collection::Transactions,
            CollectionArg::Investment => Collection::Investments,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Dashboard {
            host,
            region,
            export_csv,
        } => {
            dashboard(host, &region, export_csv).await?;
        }

        Command::Ledger { command } => ledger(command)?,

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let loaded = config::load_config()?;
                print!("{}", config::describe(&loaded)?);
            }
        },
    }

    Ok(())
}

async fn dashboard(host: Option<String>, region: &str, export_csv: Option<PathBuf>) -> Result<()> {
    let cfg = config::load_config()?.config;
    let host = host.unwrap_or(cfg.metrics.host.clone());
    let client = MetricsClient::new(&host, cfg.metrics.timeout())?;

    eprintln!("Loading metrics from {}...", client.host());
    let data = client.fetch_or_empty().await;

    let view = DashboardView::build(&data, region);
    if view.region_unknown() {
        tracing::warn!(region, "no department reports this region");
    }
    print!("{}", render::render_dashboard(&view));

    if let Some(path) = export_csv {
        export_table_csv(&view.rows, &path)?;
        println!("\nWrote {} rows to {}", view.rows.len(), path.display());
    }
    Ok(())
}

fn ledger(command: LedgerCommand) -> Result<()> {
    let cfg = config::load_config()?.config;
    let store = FileStore::open(cfg.ledger.data_dir()?)?;
    let mut ledger = Ledger::open(store)?;
    let symbol = cfg.ledger.currency_symbol.as_str();

    match command {
        LedgerCommand::Add {
            kind,
            label,
            amount,
            date,
        } => {
            let date = match date {
                Some(d) => d,
                None => cfg.ledger.today()?,
            };
            let kind = EntryKind::from(kind);
            let id = ledger.add(Submission::new(kind, label, amount, date))?;
            println!("Added {kind} [{id}]\n");
        }
        LedgerCommand::Delete { collection, id } => {
            if ledger.delete(collection.into(), id)? {
                println!("Deleted [{id}]\n");
            } else {
                println!("No entry with id {id}\n");
            }
        }
        LedgerCommand::Show => {}
    }

    print!("{}", render::render_ledger(&ledger.view(), symbol));
    Ok(())
}
