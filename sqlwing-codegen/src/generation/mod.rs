//! Code generation output helpers.
//!
//! - [`ImportCollector`] - Import tracking and deduplication

mod imports;

pub use imports::ImportCollector;
