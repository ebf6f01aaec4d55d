//! Language-specific abstractions.
//!
//! - [`LanguageCodegen`] - Main trait for language code generators
//! - [`TypeMapper`] - Trait for mapping target types to language types
//! - [`GenerateResult`] - Result of code generation
//! - [`PreviewFile`] - Generated file preview

mod traits;

pub use traits::{GenerateResult, LanguageCodegen, PreviewFile, SkippedFile, TypeMapper, WrittenFile};
