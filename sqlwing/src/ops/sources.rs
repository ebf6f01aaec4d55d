//! Reading and parsing the SQL files of a project.

use std::path::PathBuf;

use eyre::{Context, Result};
use sqlwing_schema::{Schema, TargetType, parse_file};
use tracing::{info, warn};

use crate::project::FlutterProject;

/// Every SQL file of a project merged into one schema.
pub(crate) struct ParsedSources {
    pub files: Vec<PathBuf>,
    pub schema: Schema,
    /// Miette-rendered errors, one per skipped table or unreadable file.
    pub diagnostics: Vec<String>,
}

/// Parse each file in `lib/sqls`, in path order.
///
/// Tables that fail to parse are left out and reported; the rest of the
/// file is still used. Files that cannot be read as UTF-8 text are
/// reported and skipped.
pub(crate) fn parse_sources(project: &FlutterProject, fallback: TargetType) -> Result<ParsedSources> {
    let files = project
        .sql_files()
        .wrap_err("Failed to list SQL files")?;

    let mut schema = Schema::default();
    let mut diagnostics = Vec::new();

    for path in &files {
        let document = match parse_file(path, fallback) {
            Ok(document) => document,
            Err(err) => {
                warn!(file = %path.display(), "skipping unreadable SQL file");
                diagnostics.push(format!("{:?}", miette::Report::new(*err)));
                continue;
            }
        };
        info!(
            file = %path.display(),
            tables = document.schema.tables.len(),
            enums = document.schema.enums.len(),
            errors = document.errors.len(),
            "parsed SQL file"
        );

        schema.merge(document.schema);
        diagnostics.extend(
            document
                .errors
                .into_iter()
                .map(|err| format!("{:?}", miette::Report::new(err))),
        );
    }

    Ok(ParsedSources {
        files,
        schema,
        diagnostics,
    })
}
