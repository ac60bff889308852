use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use configuration::{Config, Credentials, load_config};
use core_types::{Allocation, InvestmentAnalysis};
use engine::{JsonFileSource, PipelineReport, RecommendationSource, RunRequest, TradePipeline};
use events::{OutcomeKind, TradeOutcome};
use rust_decimal::{Decimal, RoundingStrategy};
use std::path::PathBuf;

mod logging;

/// The main entry point for the newstrade application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; credentials may come from flags or the shell.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    let _log_guard = logging::init(&config.logging)?;

    match cli.command {
        Commands::Execute(args) => handle_execute(args, config).await,
        Commands::Plan(args) => handle_plan(args, config).await,
        Commands::Validate(args) => handle_validate(args, config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Turns ranked buy/avoid recommendations into brokerage orders.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Missing files fall back to defaults.
    #[arg(long, short, global = true, default_value = "newstrade.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sell held "avoid" positions, then buy the recommended list.
    Execute(ExecuteArgs),
    /// Preview the rank-weighted allocation without contacting the broker.
    Plan(PlanArgs),
    /// Check that the brokerage credentials are accepted.
    Validate(ValidateArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
struct ExecuteArgs {
    /// Recommendation payload (JSON, wrapped in `investmentAnalysis` or bare).
    #[arg(long, short)]
    analysis: PathBuf,

    /// Total dollar amount to invest across the buy list.
    #[arg(long, default_value = "1000")]
    amount: String,

    #[command(flatten)]
    credentials: Credentials,

    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Args)]
struct PlanArgs {
    /// Recommendation payload (JSON, wrapped in `investmentAnalysis` or bare).
    #[arg(long, short)]
    analysis: PathBuf,

    /// Total dollar amount to invest across the buy list.
    #[arg(long, default_value = "1000")]
    amount: Decimal,

    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Args)]
struct ValidateArgs {
    #[command(flatten)]
    credentials: Credentials,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_execute(args: ExecuteArgs, config: Config) -> anyhow::Result<()> {
    let request = RunRequest::parse(args.credentials, &args.amount)?;
    let source = JsonFileSource::new(&args.analysis);
    let pipeline = TradePipeline::new(config);

    tracing::info!(amount = %request.amount, analysis = %args.analysis.display(), "Starting run.");
    let report = pipeline.run(&request, &source).await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => {
            println!("{}", recommendations_table(&report.recommendations));
            println!("{}", trade_log_table(&report));
        }
    }
    Ok(())
}

async fn handle_plan(args: PlanArgs, config: Config) -> anyhow::Result<()> {
    let payload = JsonFileSource::new(&args.analysis).fetch().await?;
    let allocations = TradePipeline::new(config).plan(&payload.analysis, args.amount)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&allocations)?),
        OutputFormat::Table => {
            if allocations.is_empty() {
                println!("{}", TradeOutcome::no_buy_recommendations());
            } else {
                println!("{}", allocation_table(&allocations));
            }
        }
    }
    Ok(())
}

async fn handle_validate(args: ValidateArgs, config: Config) -> anyhow::Result<()> {
    let account = TradePipeline::new(config)
        .check_account(&args.credentials)
        .await?;
    println!(
        "Account {} ({}) is {}. Buying power: ${}",
        account.account_number,
        account.id,
        account.status,
        money(account.buying_power)
    );
    Ok(())
}

// ==============================================================================
// Rendering
// ==============================================================================

fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    table
}

fn recommendations_table(analysis: &InvestmentAnalysis) -> Table {
    let mut table = new_table(&["Action", "Rank", "Company", "Ticker", "Reasoning"]);
    let rows = analysis
        .stocks_to_invest
        .iter()
        .enumerate()
        .map(|(rank, r)| (Cell::new("BUY").fg(Color::Green), Some(rank + 1), r))
        .chain(
            analysis
                .stocks_to_avoid
                .iter()
                .map(|r| (Cell::new("AVOID").fg(Color::Red), None, r)),
        );
    for (action, rank, recommendation) in rows {
        table.add_row(vec![
            action,
            Cell::new(rank.map(|r| r.to_string()).unwrap_or_default()),
            Cell::new(&recommendation.company_name),
            Cell::new(recommendation.ticker_symbol.as_deref().unwrap_or("-")),
            Cell::new(&recommendation.reasoning),
        ]);
    }
    table
}

fn trade_log_table(report: &PipelineReport) -> Table {
    let mut table = new_table(&["#", "Trade log"]);
    for (i, outcome) in report.outcomes.outcomes().iter().enumerate() {
        let color = match outcome.kind() {
            OutcomeKind::Sold | OutcomeKind::Bought => Color::Green,
            OutcomeKind::Skipped => Color::Reset,
            OutcomeKind::Failed => Color::Red,
            OutcomeKind::Warning => Color::Yellow,
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(outcome.message()).fg(color),
        ]);
    }
    table
}

fn allocation_table(allocations: &[Allocation]) -> Table {
    let mut table = new_table(&["Rank", "Company", "Ticker", "Weight", "Amount"]);
    for allocation in allocations {
        table.add_row(vec![
            Cell::new(allocation.rank + 1),
            Cell::new(&allocation.company_name),
            Cell::new(allocation.ticker.as_deref().unwrap_or("-")),
            Cell::new(allocation.weight),
            Cell::new(format!("${}", money(allocation.dollar_amount))),
        ]);
    }
    table
}
