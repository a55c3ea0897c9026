//! Command-line interface for market-signals

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Value, json};
use signals_engine::tools::RatioKind;
use signals_engine::{EngineConfig, FileDataLoader, register_market_tools};
use signals_tools::ToolRegistry;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "market-signals")]
#[command(about = "Technical and sentiment signals from OHLCV market data", long_about = None)]
struct Cli {
    /// Directory with one sub-directory of JSON files per symbol
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Latest price and change against the previous close
    Price { company: String },
    /// RSI, MACD, SMA and EMA
    Indicators {
        company: String,
        /// RSI and moving average period
        #[arg(short, long)]
        period: Option<usize>,
    },
    /// Trend direction, support and resistance
    Trend {
        company: String,
        /// Number of most recent bars to analyze
        #[arg(short, long)]
        lookback: Option<usize>,
    },
    /// Weighted sentiment score
    Sentiment {
        company: String,
        /// Number of most recent bars to score
        #[arg(short, long)]
        lookback: Option<usize>,
    },
    /// Valuation multiples from the company overview
    Valuation { company: String },
    /// Dividend yield, payout ratio and dividend dates
    Dividend { company: String },
    /// Ratios from the annual statements
    Ratios {
        company: String,
        #[arg(value_enum)]
        family: RatioFamily,
        /// Number of most recent fiscal years
        #[arg(short, long)]
        years: Option<usize>,
    },
    /// List the registered tools and their input schemas
    Tools,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum RatioFamily {
    Profitability,
    Liquidity,
    Leverage,
    Efficiency,
    Growth,
}

impl From<RatioFamily> for RatioKind {
    fn from(family: RatioFamily) -> Self {
        match family {
            RatioFamily::Profitability => Self::Profitability,
            RatioFamily::Liquidity => Self::Liquidity,
            RatioFamily::Leverage => Self::Leverage,
            RatioFamily::Efficiency => Self::Efficiency,
            RatioFamily::Growth => Self::Growth,
        }
    }
}

impl Commands {
    /// Tool name and parameters for commands that dispatch to a tool
    fn tool_call(&self) -> Option<(&'static str, Value)> {
        let call = match self {
            Self::Price { company } => ("get_latest_price", json!({ "company": company })),
            Self::Indicators { company, period } => (
                "get_technical_indicators",
                json!({ "company": company, "period": period }),
            ),
            Self::Trend { company, lookback } => (
                "get_price_trend_summary",
                json!({ "company": company, "lookback_periods": lookback }),
            ),
            Self::Sentiment { company, lookback } => (
                "get_market_sentiment",
                json!({ "company": company, "lookback_periods": lookback }),
            ),
            Self::Valuation { company } => ("get_valuation_metrics", json!({ "company": company })),
            Self::Dividend { company } => ("get_dividend_info", json!({ "company": company })),
            Self::Ratios {
                company,
                family,
                years,
            } => (
                RatioKind::from(*family).tool_name(),
                json!({ "company": company, "year_range": years }),
            ),
            Self::Tools => return None,
        };
        Some(call)
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    }
    .with_env();

    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }
    config.validate()?;
    Ok(config)
}

fn describe_tools(registry: &ToolRegistry) -> Value {
    registry
        .list_tools()
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name(),
                "description": tool.description(),
                "inputSchema": tool.input_schema(),
            })
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    signals_utils::init_tracing();

    let cli = Cli::parse();
    let config = Arc::new(load_config(&cli)?);

    let registry = ToolRegistry::new();
    let loader = Arc::new(FileDataLoader::new(&config));
    info!(data_dir = %loader.root().display(), "Starting market-signals");
    register_market_tools(&registry, loader, config);

    let Some((tool, params)) = cli.command.tool_call() else {
        println!("{}", serde_json::to_string_pretty(&describe_tools(&registry))?);
        return Ok(ExitCode::SUCCESS);
    };

    info!(tool, "Running tool");
    let output = registry.execute(tool, params).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    if output.get("errorKind").is_some() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
