//! Language-agnostic code generation traits.

use std::path::{Path, PathBuf};

use eyre::Result;
use sqlwing_core::WriteResult;
use sqlwing_schema::TargetType;

/// Trait for language-specific code generators.
///
/// Implement this trait to add support for generating client code in a new
/// language from a parsed schema.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "dart")
    fn language(&self) -> &'static str;

    /// Preview generated files without writing to disk
    fn preview(&self) -> Vec<PreviewFile>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files written, in generation order
    pub written: Vec<WrittenFile>,
    /// Files that were not generated and why
    pub skipped: Vec<SkippedFile>,
}

impl GenerateResult {
    /// Number of files that replaced an earlier version.
    pub fn replaced_count(&self) -> usize {
        self.written
            .iter()
            .filter(|f| f.result == WriteResult::Replaced)
            .count()
    }
}

/// A file written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub result: WriteResult,
}

/// A file the generator decided not to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Relative path the file would have had
    pub path: String,
    pub reason: String,
}

/// A generated file for preview
#[derive(Debug)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// Trait for mapping schema target types to language-specific type strings.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Map a target type to a language-specific type string
    fn map_type(&self, target: TargetType) -> &'static str;

    /// Map a nullable target type (e.g., `String?` in Dart)
    fn map_nullable_type(&self, target: TargetType) -> String {
        format!("{}?", self.map_type(target))
    }
}
