//! Shared code generation utilities for sqlwing.
//!
//! This crate provides language-agnostic abstractions used by the
//! language-specific generators (e.g., `sqlwing-codegen-dart`).
//!
//! # Module Organization
//!
//! - [`builder`] - Indented code building (CodeBuilder, Indent)
//! - [`generation`] - Output helpers (ImportCollector)
//! - [`language`] - Language abstractions (LanguageCodegen, TypeMapper, etc.)
//! - [`config`] - Generation settings shared by all generators

pub mod builder;
pub mod config;
pub mod generation;
pub mod language;

pub use config::GenerateConfig;
pub use language::{GenerateResult, LanguageCodegen, PreviewFile, SkippedFile, TypeMapper, WrittenFile};
