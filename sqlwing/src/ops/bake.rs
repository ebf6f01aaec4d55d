//! Bake operation - Dart code generation from the project's SQL files.

use eyre::{Context, Result};
use sqlwing_codegen::{GenerateConfig, LanguageCodegen};
use sqlwing_codegen_dart::Generator;
use tracing::info;

use super::sources::parse_sources;
use crate::{
    project::FlutterProject,
    reports::{BakeReport, GenerationResult, PreviewResult, WrittenResult},
};

/// Options for the bake operation.
pub struct BakeOptions {
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the bake operation.
///
/// Parses every SQL file under `lib/sqls` and generates the Dart files
/// into the project.
pub fn bake(
    project: &FlutterProject,
    config: &GenerateConfig,
    opts: BakeOptions,
) -> Result<BakeReport> {
    let sources = parse_sources(project, config.fallback_type)?;

    let project_name = config
        .project_name
        .clone()
        .unwrap_or_else(|| project.name().to_string());

    let mut warnings = Vec::new();
    if sources.files.is_empty() {
        warnings.push(format!(
            "no SQL files found in '{}'",
            project.sqls_dir().display()
        ));
    } else if sources.schema.is_empty() {
        warnings.push("no tables or enums found".to_string());
    }

    let generator = Generator::new(&sources.schema, &project_name, config);
    let result = if opts.dry_run {
        GenerationResult::Preview(PreviewResult {
            files: generator.preview(),
        })
    } else {
        let created_dirs = project
            .ensure_output_dirs()
            .wrap_err("Failed to create output directories")?;
        for dir in &created_dirs {
            info!(dir = %dir, "created directory");
        }

        let generated = generator
            .generate(project.root())
            .wrap_err("Failed to generate code")?;

        GenerationResult::Written(WrittenResult {
            output_dir: project.root().to_path_buf(),
            created_dirs,
            replaced_count: generated.replaced_count(),
            files: generated.written,
            skipped: generated.skipped,
        })
    };

    let language = generator.language();
    Ok(BakeReport {
        project_name,
        language,
        sql_file_count: sources.files.len(),
        table_count: sources.schema.tables.len(),
        enum_count: sources.schema.enums.len(),
        diagnostics: sources.diagnostics,
        warnings,
        result,
    })
}
