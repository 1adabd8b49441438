use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::error;
use serde::Serialize;
use std::path::PathBuf;

use spendview_core::{
    ReportError, build_home_page, cashback_by_category, parse_input_date, parse_reference_date,
    spend_by_category,
};
use spendview_ingest::load_statement_csv;
use spendview_market::MarketClient;

mod config;
mod persist;

#[derive(Parser, Debug)]
#[command(name = "spendview", version, about = "Reports over a personal bank statement export")]
struct Cli {
    /// Path to the statement CSV export
    #[arg(long, default_value = "operations.csv")]
    csv: PathBuf,

    /// Path to the config file
    #[arg(long, default_value = "spendview.toml")]
    config: PathBuf,

    /// Also write the report JSON to this file
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Home page: cards, top transactions, market quotes, greeting
    Home {
        /// Reference date, DD.MM.YYYY (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Cashback totals per category for one month
    Cashback {
        #[arg(long)]
        year: i32,

        #[arg(long)]
        month: u32,
    },

    /// Spend in one category over the trailing three months
    Spending {
        #[arg(long)]
        category: String,

        /// Reference date, YYYY.MM.DD (default: now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a starter config file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let payload = match cli.command {
        Command::Home { ref date } => home_report(&cli, date.clone()).await?,
        Command::Cashback { year, month } => cashback_report(&cli, year, month)?,
        Command::Spending { ref category, ref date } => {
            spending_report(&cli, category, date.clone())?
        }
        Command::Config { command } => match command {
            ConfigCommand::Init => {
                config::init_config(&cli.config)?;
                return Ok(());
            }
        },
    };

    println!("{payload}");
    if let Some(out) = &cli.out {
        persist::write_report(out, &payload)?;
    }
    Ok(())
}

fn load_records(cli: &Cli) -> Result<Vec<spendview_core::Transaction>> {
    if !cli.csv.exists() {
        bail!("statement not found: {} (pass --csv <path>)", cli.csv.display());
    }
    load_statement_csv(&cli.csv)
}

async fn home_report(cli: &Cli, date: Option<String>) -> Result<String> {
    let cfg = config::load_config(&cli.config)?;
    let records = load_records(cli)?;

    let reference = match date {
        Some(raw) => parse_input_date(&raw).context("--date")?,
        None => Local::now().date_naive(),
    };

    let client = MarketClient::new(cfg.market_config());
    let exchange_rates = client.exchange_rates(&cfg.user.currencies).await;
    let stocks = client.stock_prices(&cfg.user.stocks).await;

    let local_time = Local::now().time();
    render(
        build_home_page(&records, reference, local_time, exchange_rates, stocks),
        "{}",
    )
}

fn cashback_report(cli: &Cli, year: i32, month: u32) -> Result<String> {
    let records = load_records(cli)?;
    render(cashback_by_category(&records, year, month), "{}")
}

fn spending_report(cli: &Cli, category: &str, date: Option<String>) -> Result<String> {
    let records = load_records(cli)?;
    let reference = date
        .map(|raw| {
            parse_reference_date(&raw)
                .context("--date")
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .transpose()?;
    render(spend_by_category(&records, category, reference), "[]")
}

/// Serialize a report, or degrade to an empty payload on failure.
/// Reporting never takes the process down; the failure is logged so it
/// stays distinguishable from a genuinely empty result.
fn render<T: Serialize>(result: Result<T, ReportError>, empty: &str) -> Result<String> {
    match result {
        Ok(report) => serde_json::to_string_pretty(&report).context("serialize report"),
        Err(e) => {
            error!("report failed: {e}");
            Ok(empty.to_string())
        }
    }
}
