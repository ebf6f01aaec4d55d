//! Dart code generator for sqlwing.
//!
//! Turns a parsed [`Schema`](sqlwing_schema::Schema) into the Flutter
//! files of a Supabase-backed app.
//!
//! # Usage
//!
//! ```ignore
//! use sqlwing_codegen::{GenerateConfig, LanguageCodegen};
//! use sqlwing_codegen_dart::Generator;
//! use sqlwing_schema::parse_document;
//! use std::path::Path;
//!
//! let schema = parse_document(sql, "schema.sql").schema;
//! let config = GenerateConfig::default();
//! let generator = Generator::new(&schema, "my_app", &config);
//!
//! // Preview files without writing
//! let files = generator.preview();
//!
//! // Generate files into the Flutter project
//! let result = generator.generate(Path::new("my_app"))?;
//! ```
//!
//! # Generated Output
//!
//! - `lib/models/<table>_model.dart` - freezed data classes
//! - `lib/providers/<table>_provider.dart` - riverpod notifiers
//! - `lib/providers/<table>_provider_query.dart` - select queries (optional)
//! - `lib/views/<table>_view.dart` - list views with an edit modal
//! - `lib/sql_enums_dart_classes/<enum>_class.dart` - enum wrapper classes

mod generator;
mod naming;
mod type_mapper;

pub mod files;

pub use generator::Generator;
pub use naming::{enum_value_identifier, foreign_detail_name};
pub use sqlwing_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use type_mapper::DartTypeMapper;
