use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cyclebot::config::AppConfig;
use cyclebot::data::{load_price_history, MarketScenario, SyntheticDataGenerator};
use cyclebot::indicators::compute_sam_detailed;
use cyclebot::runner::{evaluate_batch, TickerOutcome, TickerReport};
use cyclebot::strategy::{SamTrendStrategy, SmaTrendStrategy, Strategy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cyclebot", version, about = "SAM adaptive-cycle oscillator")]
struct Cli {
    /// Config file (defaults to ./cyclebot.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute SAM for every ticker in a price history JSON file
    Sam {
        /// JSON file of {"TICKER": [bars...]}
        #[arg(long)]
        input: PathBuf,

        /// Only evaluate these tickers (overrides config)
        #[arg(long = "ticker")]
        tickers: Vec<String>,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the pipeline over generated data
    Demo {
        #[arg(long, value_enum, default_value_t = Scenario::Sine)]
        scenario: Scenario,

        #[arg(long, default_value_t = 200)]
        bars: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scenario {
    Sine,
    Constant,
    Trend,
    NoisyCycle,
}

impl From<Scenario> for MarketScenario {
    fn from(scenario: Scenario) -> Self {
        match scenario {
            Scenario::Sine => MarketScenario::Sine {
                period: 20.0,
                amplitude: 5.0,
            },
            Scenario::Constant => MarketScenario::Constant,
            Scenario::Trend => MarketScenario::Trend,
            Scenario::NoisyCycle => MarketScenario::NoisyCycle {
                period: 20.0,
                amplitude: 5.0,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    setup_logging(&config.log_filter);

    match cli.command {
        Command::Sam {
            input,
            tickers,
            json,
        } => run_sam(&config, input, tickers, json).await,
        Command::Demo {
            scenario,
            bars,
            seed,
        } => run_demo(&config, scenario, bars, seed),
    }
}

// ============================================================================
// Initialization Functions
// ============================================================================

fn setup_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// ============================================================================
// Commands
// ============================================================================

async fn run_sam(
    config: &AppConfig,
    input: PathBuf,
    cli_tickers: Vec<String>,
    json: bool,
) -> Result<()> {
    let mut history = load_price_history(&input)?;

    let wanted = if cli_tickers.is_empty() {
        config.tickers.clone()
    } else {
        cli_tickers
    };
    if !wanted.is_empty() {
        for ticker in &wanted {
            if !history.contains_key(ticker) {
                tracing::warn!(ticker = %ticker, "Ticker not found in {}", input.display());
            }
        }
        history.retain(|ticker, _| wanted.contains(ticker));
    }

    tracing::info!("📊 Evaluating {} tickers from {}", history.len(), input.display());

    let reports = evaluate_batch(history, SamTrendStrategy::new(config.strategy.clone())).await;

    if json {
        let out = serde_json::to_string_pretty(&reports).context("Failed to encode reports")?;
        println!("{}", out);
    } else {
        print_reports(&reports);
    }

    Ok(())
}

fn run_demo(config: &AppConfig, scenario: Scenario, bars: usize, seed: u64) -> Result<()> {
    let mut generator = SyntheticDataGenerator::new(seed).with_token("DEMO");
    let candles = generator.generate(scenario.into(), bars, 1440);

    tracing::info!(?scenario, bars, seed, "Running demo");

    let output = compute_sam_detailed(&candles, &config.sam)
        .with_context(|| format!("SAM failed on {} generated bars", bars))?;

    println!("\n╔═══════════════════════════════════════════════════════╗");
    println!("║              SAM DEMO ({:?})", scenario);
    println!("╚═══════════════════════════════════════════════════════╝\n");

    println!("{:>6} {:>10} {:>10} {:>8} {:>10}", "Bar", "Close", "Period", "Lookback", "SAM");
    println!("{}", "─".repeat(50));
    let start = candles.len().saturating_sub(20);
    for i in start..candles.len() {
        println!(
            "{:>6} {:>10.3} {:>10.2} {:>8} {:>10.4}",
            i, candles[i].close, output.period[i], output.lookback[i], output.values[i]
        );
    }

    println!("\n📈 Diagnostics:");
    println!("   Undefined phase bars: {}", output.diagnostics.undefined_phase_bars);
    if let Some(atr) = output.diagnostics.atr {
        println!("   ATR: {:.4} (zero volatility: {})", atr, output.diagnostics.zero_volatility);
    }

    let strategies: Vec<Box<dyn Strategy>> = vec![
        Box::new(SamTrendStrategy::new(config.strategy.clone())),
        Box::new(SmaTrendStrategy::new(config.sma_trend.clone())),
    ];
    println!("\n🧭 Signals:");
    for strategy in &strategies {
        match strategy.generate_signal(&candles) {
            Ok(signal) => println!("   {:<20} {}", strategy.name(), signal),
            Err(e) => println!("   {:<20} n/a ({})", strategy.name(), e),
        }
    }
    println!();

    Ok(())
}

fn print_reports(reports: &[TickerReport]) {
    println!(
        "\n{:<10} {:>6} {:>10} {:>10} {:>8}",
        "Ticker", "Bars", "SAM", "Period", "Signal"
    );
    println!("{}", "─".repeat(50));

    for report in reports {
        match &report.outcome {
            TickerOutcome::Ready(reading) => {
                let period = reading
                    .dominant_period
                    .map(|p| format!("{:.2}", p))
                    .unwrap_or_else(|| "-".to_string());
                let signal = reading
                    .signal
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<10} {:>6} {:>10.4} {:>10} {:>8}",
                    report.ticker, report.bars, reading.sam, period, signal
                );
            }
            TickerOutcome::Skipped { reason } => {
                println!("{:<10} {:>6} skipped: {}", report.ticker, report.bars, reason);
            }
        }
    }

    println!();
}
