//! Bake command report data structures.

use std::path::PathBuf;

use sqlwing_codegen::{PreviewFile, SkippedFile, WrittenFile};
use sqlwing_core::WriteResult;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct BakeReport {
    /// Dart package name used in imports.
    pub project_name: String,

    /// Target language of the generator.
    pub language: &'static str,

    /// Number of SQL files read.
    pub sql_file_count: usize,

    /// Number of tables parsed.
    pub table_count: usize,

    /// Number of enums parsed.
    pub enum_count: usize,

    /// Rendered diagnostics for skipped tables and unreadable files.
    pub diagnostics: Vec<String>,

    /// Warning messages.
    pub warnings: Vec<String>,

    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Project root the files were written under.
    pub output_dir: PathBuf,
    /// Output directories that did not exist before.
    pub created_dirs: Vec<String>,
    /// Files written, in generation order.
    pub files: Vec<WrittenFile>,
    /// How many of `files` overwrote an earlier version.
    pub replaced_count: usize,
    /// Files left out and why.
    pub skipped: Vec<SkippedFile>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

impl Report for BakeReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.diagnostics {
            out.diagnostic(diagnostic);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl BakeReport {
    fn render_header(&self, out: &mut dyn Output) {
        out.key_value("Project", &self.project_name);
        out.key_value("Language", self.language);
        out.key_value(
            "Parsed",
            &format!(
                "{} from {}, {}",
                plural(self.table_count, "table"),
                plural(self.sql_file_count, "SQL file"),
                plural(self.enum_count, "enum"),
            ),
        );
    }

    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        self.render_header(out);

        if !written.created_dirs.is_empty() {
            out.newline();
            out.section("Created directories");
            for dir in &written.created_dirs {
                out.added_item(dir);
            }
        }

        out.newline();
        if written.replaced_count > 0 {
            out.section(&format!(
                "Generated ({}, {} replaced)",
                written.files.len(),
                written.replaced_count
            ));
        } else {
            out.section(&format!("Generated ({})", written.files.len()));
        }
        for file in &written.files {
            let path = file
                .path
                .strip_prefix(&written.output_dir)
                .unwrap_or(&file.path)
                .display()
                .to_string();
            match file.result {
                WriteResult::Created => out.added_item(&path),
                WriteResult::Replaced => out.replaced_item(&path),
            }
        }

        if !written.skipped.is_empty() {
            out.newline();
            out.section("Skipped");
            for skipped in &written.skipped {
                out.list_item(&format!("{} ({})", skipped.path, skipped.reason));
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        self.render_header(out);
        out.preformatted(&format!(
            "{} would be generated",
            plural(preview.files.len(), "file")
        ));
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
