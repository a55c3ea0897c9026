//! Shared utilities for market-signals
//!
//! This crate provides common functionality used across the workspace,
//! currently the tracing subscriber setup used by the binaries.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with_default};
