//! LadderChart CLI — load bars, run the indicator pipeline, report or save.
//!
//! Commands:
//! - `chart` — run the pipeline and write the render bundle as pretty JSON
//! - `signals` — run the pipeline and print only the bottom-reversal signals
//!
//! Logging goes through `tracing`; set `RUST_LOG` to change the level
//! (default `info`).

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ladderchart_core::data::{BarSource, CsvBarSource};
use ladderchart_core::fingerprint::config_hash;
use ladderchart_core::{analyze, ChartAnalysis, EngineConfig};

#[derive(Parser)]
#[command(
    name = "ladderchart",
    about = "LadderChart CLI — EMA ladder, MACD/RSI and bottom-reversal signals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and write `<SYMBOL>.json` to the output directory.
    Chart {
        #[command(flatten)]
        load: LoadArgs,

        /// Output directory for the chart bundle.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Run the pipeline and print the detected bottom signals.
    Signals {
        #[command(flatten)]
        load: LoadArgs,
    },
}

/// Arguments shared by every command: what to load and how to analyze it.
#[derive(Args)]
struct LoadArgs {
    /// Ticker symbol.
    #[arg(long, default_value = "META")]
    symbol: String,

    /// Directory holding `<SYMBOL>.csv` bar files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Start date (YYYY-MM-DD), inclusive.
    #[arg(long, default_value = "2022-01-01")]
    start: String,

    /// End date (YYYY-MM-DD), inclusive.
    #[arg(long, default_value = "2024-12-31")]
    end: String,

    /// Path to a TOML engine config. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chart { load, output_dir } => run_chart(&load, &output_dir),
        Commands::Signals { load } => run_signals(&load),
    }
}

fn run_chart(load: &LoadArgs, output_dir: &Path) -> Result<()> {
    let (symbol, analysis) = load_and_analyze(load)?;
    print_summary(&symbol, &analysis);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    let path = output_dir.join(format!("{symbol}.json"));
    let json = serde_json::to_string_pretty(&analysis.render)?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;

    info!(path = %path.display(), "chart bundle written");
    println!("Chart saved to: {}", path.display());
    Ok(())
}

fn run_signals(load: &LoadArgs) -> Result<()> {
    let (symbol, analysis) = load_and_analyze(load)?;

    if analysis.render.signals.is_empty() {
        println!("No bottom signals for {symbol}.");
        return Ok(());
    }

    println!("Bottom signals for {symbol}:");
    for event in &analysis.render.signals {
        println!("  {}  {:>10.2}", event.date, event.price);
    }
    Ok(())
}

fn load_and_analyze(load: &LoadArgs) -> Result<(String, ChartAnalysis)> {
    let symbol = load.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        bail!("--symbol must not be empty");
    }
    let start = parse_date(&load.start).context("--start")?;
    let end = parse_date(&load.end).context("--end")?;

    let config = match &load.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    info!(config = %config_hash(&config).short(), "engine config loaded");

    let source = CsvBarSource::new(&load.data_dir);
    let bars = source
        .fetch(&symbol, start, end)
        .with_context(|| format!("loading bars for {symbol} from {}", source.name()))?;

    let analysis = analyze(&symbol, &bars, &config)?;
    if analysis.warmup_bars >= bars.len() {
        warn!(
            bars = bars.len(),
            warmup = analysis.warmup_bars,
            "range shorter than indicator warmup; RSI will be undefined"
        );
    }
    Ok((symbol, analysis))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn print_summary(symbol: &str, analysis: &ChartAnalysis) {
    let render = &analysis.render;
    println!();
    println!("=== {} ===", render.title);
    println!("Symbol:         {symbol}");
    if let (Some(first), Some(last)) = (render.bars.first(), render.bars.last()) {
        println!("Period:         {} to {}", first.date, last.date);
        println!("Last Close:     {:.2}", last.close);
    }
    println!(
        "Bars:           {} ({} warmup)",
        render.bars.len(),
        analysis.warmup_bars
    );
    for group in &render.groups {
        let spans: Vec<String> = group.traces.iter().map(|t| t.label.clone()).collect();
        println!("{:<16}{}", format!("{}:", group.name), spans.join(" "));
    }
    println!("Signals:        {}", render.signals.len());
    if let Some(last) = render.signals.last() {
        println!("Last Signal:    {} @ {:.2}", last.date, last.price);
    }
    println!("Fingerprint:    {}", analysis.fingerprint().short());
    println!();
}
