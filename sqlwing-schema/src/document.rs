//! Whole-document parsing: every enum, table and foreign key in a SQL file.

use std::{path::Path, sync::LazyLock};

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::{
    Result,
    enums::extract_enums,
    error::{Error, SourceContext},
    foreign_keys::reconcile_foreign_keys,
    model::Schema,
    table::{ParseContext, parse_table_at},
    types::TargetType,
};

static CREATE_TABLE_STATEMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)create\s+table\s+[^(;]*\(.*?\)\s*;").expect("valid regex")
});

static COMMENT_OR_STRING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'(?:[^'\\]|\\.)*'|--[^\n]*|/\*[\s\S]*?\*/").expect("valid regex")
});

/// Result of parsing one document.
///
/// Tables with a malformed column are left out of `schema` and reported in
/// `errors`; the rest of the document is still parsed.
#[derive(Debug, Default)]
pub struct ParsedDocument {
    pub schema: Schema,
    pub errors: Vec<Error>,
}

impl ParsedDocument {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a SQL document with the default fallback type.
pub fn parse_document(source: &str, filename: &str) -> ParsedDocument {
    parse_document_with(source, filename, TargetType::default())
}

/// Parse a SQL document, mapping unknown column types to `fallback`.
///
/// Comments are blanked out before scanning, so a commented-out
/// `CREATE TABLE` is ignored. Error spans still point into `source`.
pub fn parse_document_with(source: &str, filename: &str, fallback: TargetType) -> ParsedDocument {
    let context = SourceContext::new(source, filename);
    let masked = mask_comments(source);

    let enums = extract_enums(&masked);
    let foreign_keys = reconcile_foreign_keys(&masked);
    let ctx = ParseContext::new(&enums, &foreign_keys)
        .with_fallback(fallback)
        .with_source(&context);

    let mut tables = Vec::new();
    let mut errors = Vec::new();

    for statement in CREATE_TABLE_STATEMENT_REGEX.find_iter(&masked) {
        match parse_table_at(statement.as_str(), statement.start(), &ctx) {
            Ok(Some(table)) => tables.push(table),
            Ok(None) => {}
            Err(err) => {
                warn!(
                    file = filename,
                    table = err.table().unwrap_or_default(),
                    "skipping table with a malformed column"
                );
                errors.push(*err);
            }
        }
    }

    debug!(
        file = filename,
        tables = tables.len(),
        enums = enums.len(),
        foreign_keys = foreign_keys.len(),
        "parsed document"
    );

    ParsedDocument {
        schema: Schema { tables, enums },
        errors,
    }
}

/// Read and parse a SQL file.
pub fn parse_file(path: &Path, fallback: TargetType) -> Result<ParsedDocument> {
    let source = std::fs::read_to_string(path).map_err(|source| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source,
        })
    })?;
    Ok(parse_document_with(
        &source,
        &path.display().to_string(),
        fallback,
    ))
}

/// Replace `--` and `/* */` comments with spaces, keeping byte offsets.
///
/// String literals are matched first so a `--` inside quotes survives.
fn mask_comments(sql: &str) -> String {
    COMMENT_OR_STRING_REGEX
        .replace_all(sql, |caps: &Captures<'_>| {
            let matched = &caps[0];
            if matched.starts_with('\'') {
                matched.to_string()
            } else {
                " ".repeat(matched.len())
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_comments_preserves_offsets() {
        let sql = "a -- note\nb /* é */ c 'x -- y'";
        let masked = mask_comments(sql);

        assert_eq!(masked.len(), sql.len());
        assert_eq!(masked.find('b'), sql.find('b'));
        assert_eq!(masked.find('c'), sql.find(" c ").map(|i| i + 1));
        assert!(masked.contains("'x -- y'"));
        assert!(!masked.contains("note"));
    }

    #[test]
    fn test_commented_out_table_is_ignored() {
        let sql = "-- CREATE TABLE old (id bigint);\n\
                   /* CREATE TABLE older (id bigint); */\n\
                   CREATE TABLE current (id bigint);";
        let doc = parse_document(sql, "schema.sql");

        assert_eq!(doc.schema.tables.len(), 1);
        assert_eq!(doc.schema.tables[0].name.original, "current");
    }

    #[test]
    fn test_tables_in_document_order() {
        let sql = "CREATE TABLE b (id bigint);\nCREATE TABLE IF NOT EXISTS a (id bigint);";
        let doc = parse_document(sql, "schema.sql");

        let names: Vec<_> = doc
            .schema
            .tables
            .iter()
            .map(|t| t.name.original.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_malformed_table_is_skipped() {
        let sql = "CREATE TABLE ok (id bigint);\n\
                   CREATE TABLE broken (id bigint, lonely);\n\
                   CREATE TABLE also_ok (id bigint);";
        let doc = parse_document(sql, "schema.sql");

        assert_eq!(doc.schema.tables.len(), 2);
        assert_eq!(doc.errors.len(), 1);
        assert_eq!(doc.errors[0].table(), Some("broken"));

        match &doc.errors[0] {
            Error::MalformedColumn { span, .. } => {
                let start = span.offset();
                assert_eq!(&sql[start..start + span.len()], "lonely");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(&dir.path().join("missing.sql"), TargetType::String).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
