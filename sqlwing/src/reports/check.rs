//! Check command report data structures.

use std::path::PathBuf;

use eyre::{Context, Result};
use sqlwing_schema::Schema;

use super::output::{Output, Report};

/// Report data from parsing the project's SQL files.
#[derive(Debug)]
pub struct CheckReport {
    /// Directory the SQL files were read from.
    pub sqls_dir: PathBuf,
    /// Number of SQL files read.
    pub sql_file_count: usize,
    /// Everything parsed successfully.
    pub schema: Schema,
    /// Rendered diagnostics for skipped tables and unreadable files.
    pub errors: Vec<String>,
}

impl CheckReport {
    /// Whether every file was read and every table parsed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Write the schema as pretty JSON, with any diagnostics on stderr.
    pub fn render_json(&self, out: &mut dyn Output) -> Result<()> {
        for error in &self.errors {
            out.diagnostic(error);
        }
        let json =
            serde_json::to_string_pretty(&self.schema).wrap_err("Failed to serialize schema")?;
        out.preformatted(&json);
        Ok(())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.diagnostic(error);
        }

        out.section(&format!("Tables ({})", self.schema.tables.len()));
        for table in &self.schema.tables {
            let mut line = format!("{} ({} columns)", table.name.original, table.columns.len());
            let references: Vec<String> = table
                .foreign_keys()
                .map(|c| format!("{} -> {}", c.column_name.original, c.related_table_name.original))
                .collect();
            if !references.is_empty() {
                line.push_str(&format!(" [{}]", references.join(", ")));
            }
            out.list_item(&line);
        }

        if !self.schema.enums.is_empty() {
            out.newline();
            out.section(&format!("Enums ({})", self.schema.enums.len()));
            for sql_enum in &self.schema.enums {
                out.list_item(&format!(
                    "{}: {}",
                    sql_enum.name.original,
                    sql_enum.values.join(", ")
                ));
            }
        }

        out.newline();
        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} SQL file(s) in {} parsed",
                self.sql_file_count,
                self.sqls_dir.display()
            ));
        } else {
            out.preformatted(&format!(
                "✗ {} parse error(s) in {}",
                self.errors.len(),
                self.sqls_dir.display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlwing_schema::parse_document;

    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_valid() {
        let schema = parse_document(
            "CREATE TYPE mood AS ENUM ('ok', 'meh');\n\
             CREATE TABLE users (id bigint);\n\
             CREATE TABLE notes (id bigint, user_ref bigint REFERENCES users, body text);",
            "schema.sql",
        )
        .schema;
        let report = CheckReport {
            sqls_dir: PathBuf::from("lib/sqls"),
            sql_file_count: 1,
            schema,
            errors: vec![],
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(report.is_valid());
        assert_eq!(
            out.stdout_text(),
            "Tables (2):\n\
             \x20 - users (1 columns)\n\
             \x20 - notes (3 columns) [user_ref -> users]\n\
             \n\
             Enums (1):\n\
             \x20 - mood: ok, meh\n\
             \n\
             ✓ 1 SQL file(s) in lib/sqls parsed"
        );
    }

    #[test]
    fn test_render_invalid() {
        let report = CheckReport {
            sqls_dir: PathBuf::from("lib/sqls"),
            sql_file_count: 1,
            schema: Schema::default(),
            errors: vec!["malformed column".to_string()],
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(!report.is_valid());
        assert_eq!(out.stderr, vec!["malformed column"]);
        assert_eq!(
            out.stdout.last().unwrap(),
            "✗ 1 parse error(s) in lib/sqls"
        );
    }

    #[test]
    fn test_render_json_with_malformed_table() {
        let document = parse_document(
            "CREATE TABLE ok (id bigint);\nCREATE TABLE bad (id bigint, broken);",
            "schema.sql",
        );
        let report = CheckReport {
            sqls_dir: PathBuf::from("lib/sqls"),
            sql_file_count: 1,
            schema: document.schema,
            errors: document
                .errors
                .into_iter()
                .map(|err| format!("{:?}", miette::Report::new(err)))
                .collect(),
        };

        let mut out = BufferOutput::default();
        report.render_json(&mut out).unwrap();

        assert!(!report.is_valid());
        assert_eq!(out.stderr.len(), 1);
        assert!(out.stderr[0].contains("bad"));

        let json: serde_json::Value = serde_json::from_str(&out.stdout_text()).unwrap();
        let tables = json["tables"].as_array().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0]["name"]["original"], "ok");
    }
}
