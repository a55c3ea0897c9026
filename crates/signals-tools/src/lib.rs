//! Tool management and dispatch for market-signals
//!
//! This crate provides a small framework for defining tools (named JSON-in /
//! JSON-out functions with an input schema) and dispatching calls to them by
//! name through a [`ToolRegistry`].

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Error, Result};
pub use registry::ToolRegistry;
pub use tool::Tool;
