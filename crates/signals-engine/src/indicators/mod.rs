//! Momentum and moving-average indicators over most-recent-first price slices
//!
//! All functions here are pure and never fail: short input yields a documented
//! sentinel (`0.0` for moving averages, `50.0` for RSI, a zero triple for MACD).

pub mod macd;
pub mod momentum;
pub mod moving_average;

pub use macd::{MacdValues, macd};
pub use momentum::{DEFAULT_RSI_PERIOD, rsi};
pub use moving_average::{ema, sma};
