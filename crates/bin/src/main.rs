//! tenk CLI binary.
//!
//! Fetches a company's most recent annual filing, normalizes its financial
//! statements, derives ratios, and writes the results to flat files.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tenk::pipeline::{FilingAnalysis, Pipeline};
use tenk_data::edgar::{CikLookup, CompanyFilings};
use tenk_extract::StatementKind;
use tenk_output::{ExportFormat, export_footnotes, export_ratio_report, export_statement};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tenk")]
#[command(about = "Annual-filing statement extraction and ratio analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the most recent annual filing of a company
    Analyze {
        /// Ticker symbol
        ticker: String,

        /// Output directory (defaults to the platform data dir)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Output file format
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// List a company's recent annual filings
    Filings {
        /// Ticker symbol
        ticker: String,

        /// Maximum number of filings to list
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// List the report manifest of the most recent annual filing
    Reports {
        /// Ticker symbol
        ticker: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
        }
    }
}

/// Filename fragment for a statement kind.
const fn kind_slug(kind: StatementKind) -> &'static str {
    match kind {
        StatementKind::BalanceSheet => "balance_sheet",
        StatementKind::IncomeStatement => "income_statement",
        StatementKind::CashFlow => "cash_flow",
        StatementKind::Equity => "equity",
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Analyze {
            ticker,
            out,
            format,
        } => analyze(&ticker, out, format.into()).await,
        Commands::Filings { ticker, limit } => list_filings(&ticker, limit).await,
        Commands::Reports { ticker } => list_reports(&ticker).await,
    }
}

async fn analyze(
    ticker: &str,
    out: Option<PathBuf>,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::new()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Analyzing {}", ticker.to_uppercase()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let analysis = pipeline.analyze(ticker).await;
    spinner.finish_and_clear();
    let analysis = analysis?;

    print_summary(&analysis);

    let out_dir = match out {
        Some(dir) => dir,
        None => dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tenk")
            .join(&analysis.company.ticker),
    };
    std::fs::create_dir_all(&out_dir)?;

    let prefix = format!("{}_{}", analysis.company.ticker, analysis.filing.filing_date);

    for (kind, statement) in &analysis.statements {
        let path = out_dir.join(format!(
            "{}_{}.{}",
            prefix,
            kind_slug(*kind),
            format.extension()
        ));
        export_statement(&path, statement, format)?;
        println!("wrote {}", path.display());

        if !statement.footnotes().is_empty() {
            let path = out_dir.join(format!("{}_{}_footnotes.csv", prefix, kind_slug(*kind)));
            export_footnotes(&path, statement.footnotes())?;
            println!("wrote {}", path.display());
        }
    }

    let path = out_dir.join(format!("{}_analysis.{}", prefix, format.extension()));
    export_ratio_report(&path, &analysis.ratios, format)?;
    println!("wrote {}", path.display());

    Ok(())
}

fn print_summary(analysis: &FilingAnalysis) {
    println!(
        "{} ({}) - {} filed {}",
        analysis.company.name,
        analysis.company.ticker,
        analysis.filing.form,
        analysis.filing.filing_date
    );
    if !analysis.company.sic_description.is_empty() {
        println!("  {}", analysis.company.sic_description);
    }

    for (kind, statement) in &analysis.statements {
        println!(
            "  {}: {} accounts x {} periods, {} footnotes",
            kind,
            statement.row_count(),
            statement.period_count(),
            statement.footnotes().len()
        );
    }
    for failure in &analysis.failures {
        println!("  {} FAILED: {} ({})", failure.kind, failure.error, failure.url);
    }

    for table in analysis.ratios.tables() {
        if table.periods().is_empty() {
            continue;
        }
        println!("\n{}", table.title());
        print!("  {:<26}", "");
        for period in table.periods() {
            print!("{:>16}", period);
        }
        println!();
        for (name, values) in table.rows() {
            print!("  {:<26}", name);
            for value in values {
                match value {
                    Some(v) => print!("{:>16.4}", v),
                    None => print!("{:>16}", "-"),
                }
            }
            println!();
        }
    }
}

async fn list_filings(ticker: &str, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::new()?;
    let client = pipeline.client();

    let lookup = CikLookup::fetch(client).await?;
    let (cik, name) = lookup.require_cik(ticker)?.clone();
    let filings = CompanyFilings::fetch(client, &cik).await?;

    println!("{} (CIK {})", name, cik);
    for filing in filings.all_10k().into_iter().take(limit) {
        println!(
            "  {}  {}  {}",
            filing.filing_date, filing.accession_number, filing.primary_document
        );
    }
    Ok(())
}

async fn list_reports(ticker: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::new()?;
    let client = pipeline.client();

    let lookup = CikLookup::fetch(client).await?;
    let (cik, name) = lookup.require_cik(ticker)?.clone();
    let filings = CompanyFilings::fetch(client, &cik).await?;
    let filing = filings
        .latest_10k()
        .ok_or_else(|| format!("no 10-K on file for {}", name))?;

    let summary = pipeline.filing_summary(&cik, &filing).await?;
    println!(
        "{} - {} filed {} ({} reports)",
        name,
        filing.form,
        filing.filing_date,
        summary.reports.len()
    );
    for report in &summary.reports {
        println!("  [{:<10}] {}", report.category, report.short_name);
    }
    Ok(())
}
