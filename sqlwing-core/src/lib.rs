//! Core utilities and types for the sqlwing generator.
//!
//! This crate provides the naming and file primitives shared by the
//! schema parser and the code generators.

mod file;
mod naming;

// File operations
pub use file::{GeneratedFile, WriteResult, write_replacing};
// Naming utilities
pub use naming::{NameVariant, capitalize_first, to_camel_case, to_title_words};
