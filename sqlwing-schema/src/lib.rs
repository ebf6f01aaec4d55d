//! SQL schema extraction for sqlwing.
//!
//! Reads PostgreSQL-flavoured DDL (as produced by Supabase and schema diagram
//! exporters) and builds a [`Schema`] of tables, columns and enums that code
//! generators consume.

// Suppress false positive warnings from miette derive macro
#![allow(unused_assignments)]

mod document;
mod enums;
mod error;
mod foreign_keys;
mod model;
mod table;
mod types;

pub use document::{ParsedDocument, parse_document, parse_document_with, parse_file};
pub use enums::extract_enums;
pub use error::{Error, Result, SourceContext};
pub use foreign_keys::{ForeignKey, ForeignKeys, reconcile_foreign_keys};
pub use model::{Column, Schema, SqlEnum, Table, find_enum};
pub use table::{ParseContext, parse_table};
pub use types::{TYPE_MAP, TargetType, map_sql_type};
