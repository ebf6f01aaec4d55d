//! Check operation - parse the SQL files without generating anything.

use eyre::Result;
use sqlwing_schema::TargetType;

use super::sources::parse_sources;
use crate::{project::FlutterProject, reports::CheckReport};

/// Execute the check operation.
pub fn check(project: &FlutterProject, fallback: TargetType) -> Result<CheckReport> {
    let sources = parse_sources(project, fallback)?;

    Ok(CheckReport {
        sqls_dir: project.sqls_dir(),
        sql_file_count: sources.files.len(),
        schema: sources.schema,
        errors: sources.diagnostics,
    })
}
