//! Report assemblers
//!
//! Each function takes an already-loaded [`Series`](crate::series::Series),
//! runs the relevant calculators and attaches interpretive labels. Reports are
//! plain serializable values; nothing is cached between calls.

pub mod indicators;
pub mod price;
pub mod sentiment;
pub mod trend;

pub use indicators::{IndicatorReport, compute_indicators};
pub use price::{PriceSnapshot, latest_price};
pub use sentiment::{SentimentReport, compute_sentiment};
pub use trend::{TrendReport, compute_trend};
