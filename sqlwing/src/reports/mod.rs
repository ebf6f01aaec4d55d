//! Command results as data, rendered separately to an output sink.
//!
//! Operations return a report; commands pick the output and render it.

mod bake;
mod check;
mod output;

pub use bake::{BakeReport, GenerationResult, PreviewResult, WrittenResult};
pub use check::CheckReport;
pub use output::{Report, TerminalOutput};
