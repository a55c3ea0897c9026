//! Basic signal analysis example
//!
//! Builds a synthetic intraday series in memory and prints the indicator,
//! trend and sentiment reports for it.
//!
//! To run this example:
//! ```bash
//! RUST_LOG=debug cargo run -p signals-engine --example basic_analysis
//! ```

use signals_engine::{
    Bar, OverviewFacts, Series, compute_indicators, compute_sentiment, compute_trend, latest_price,
};

fn synthetic_series(len: u32) -> Series {
    let bars = (0..len)
        .map(|i| {
            let drift = 150.0 - f64::from(i) * 0.2;
            let close = drift + (f64::from(i) * 0.9).sin();
            let minute = 59 - i % 60;
            let hour = 15 - i / 60;
            Bar::new(
                format!("2024-01-15 {hour:02}:{minute:02}:00"),
                close - 0.1,
                close + 0.4,
                close - 0.5,
                close,
                10_000 + u64::from(i % 7) * 500,
            )
        })
        .collect();
    Series::from_descending(bars)
}

fn main() -> anyhow::Result<()> {
    signals_utils::init_tracing();

    let series = synthetic_series(120);
    let overview = OverviewFacts {
        beta: 1.05,
        week52_high: 175.0,
        week52_low: 110.0,
        sma50: Some(142.0),
        sma200: Some(131.5),
    };

    println!("=== Market Signals ===\n");

    println!("=== 1. Latest Price ===");
    println!("{}\n", serde_json::to_string_pretty(&latest_price(&series)?)?);

    println!("=== 2. Technical Indicators ===");
    println!(
        "{}\n",
        serde_json::to_string_pretty(&compute_indicators(&series, &overview, 14)?)?
    );

    println!("=== 3. Price Trend ===");
    println!("{}\n", serde_json::to_string_pretty(&compute_trend(&series, 50)?)?);

    println!("=== 4. Market Sentiment ===");
    println!("{}", serde_json::to_string_pretty(&compute_sentiment(&series, 30)?)?);

    Ok(())
}
