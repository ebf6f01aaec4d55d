//! Building blocks for emitting indented source text.

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
