//! Loading bars, overview facts and annual statements for a symbol
//!
//! The analytics never touch the file system; they receive a [`Series`]
//! built here. Loaders must hand back bars most-recent-first.
//!
//! [`Series`]: crate::series::Series

pub mod alpha_vantage;
pub(crate) mod fields;
pub mod loader;

pub use alpha_vantage::{
    overview_fields, parse_earnings, parse_overview, parse_statement, parse_time_series,
};
pub use loader::{DataLoader, EARNINGS_FILE, FileDataLoader, OVERVIEW_FILE, TIME_SERIES_FILE};

#[cfg(test)]
pub use loader::MockDataLoader;
