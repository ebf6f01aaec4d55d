//! Dart code generator for Flutter + Supabase projects.

use std::{collections::HashSet, path::Path};

use eyre::Result;
use sqlwing_codegen::{
    GenerateConfig,
    language::{GenerateResult, LanguageCodegen, PreviewFile, SkippedFile, WrittenFile},
};
use sqlwing_core::GeneratedFile;
use sqlwing_schema::Schema;
use tracing::{debug, info};

use crate::files::{EnumClassDart, ModelDart, ProviderDart, QueryDart, ViewDart};

/// Dart code generator producing models, providers, views and enum classes.
pub struct Generator<'a> {
    schema: &'a Schema,
    project_name: &'a str,
    config: &'a GenerateConfig,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "dart"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        let (files, _) = self.plan();
        files
            .iter()
            .map(|file| PreviewFile {
                path: file.path(Path::new("")).display().to_string(),
                content: file.render(),
            })
            .collect()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let (files, skipped) = self.plan();
        let mut result = GenerateResult {
            written: Vec::with_capacity(files.len()),
            skipped,
        };

        for file in &files {
            let path = file.path(output_dir);
            let write = file.write(output_dir)?;
            info!(path = %path.display(), result = ?write, "wrote file");
            result.written.push(WrittenFile {
                path,
                result: write,
            });
        }

        for skipped in &result.skipped {
            info!(path = %skipped.path, reason = %skipped.reason, "skipped file");
        }

        Ok(result)
    }
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema, project_name: &'a str, config: &'a GenerateConfig) -> Self {
        Self {
            schema,
            project_name,
            config,
        }
    }

    /// Files to produce, in generation order, plus the ones left out.
    ///
    /// A table or enum name seen twice (across documents) is generated
    /// once, from its first declaration.
    fn plan(&self) -> (Vec<Box<dyn GeneratedFile + 'a>>, Vec<SkippedFile>) {
        let schema: &'a Schema = self.schema;
        let project_name: &'a str = self.project_name;
        let mut files: Vec<Box<dyn GeneratedFile + 'a>> = Vec::new();
        let mut skipped = Vec::new();
        let mut seen_tables = HashSet::new();

        for table in &schema.tables {
            let snake = &table.name.original;
            if !seen_tables.insert(snake.as_str()) {
                skipped.push(SkippedFile {
                    path: format!("lib/models/{snake}_model.dart"),
                    reason: format!("table '{snake}' is declared more than once"),
                });
                continue;
            }

            debug!(table = %snake, "planning table files");
            files.push(Box::new(ModelDart::new(table, project_name)));
            files.push(Box::new(
                ProviderDart::new(table, project_name)
                    .with_debug_print(self.config.debug_print)
                    .with_separate_query_file(self.config.separate_query_file),
            ));
            if self.config.separate_query_file {
                files.push(Box::new(QueryDart::new(table)));
            }

            let view = ViewDart::new(table, &schema.enums, project_name);
            if view.is_renderable() {
                files.push(Box::new(view));
            } else {
                skipped.push(SkippedFile {
                    path: format!("lib/views/{snake}_view.dart"),
                    reason: format!("table '{snake}' has no 'id' column"),
                });
            }
        }

        let mut seen_enums = HashSet::new();
        for sql_enum in &schema.enums {
            let snake = &sql_enum.name.original;
            if seen_enums.insert(snake.as_str()) {
                files.push(Box::new(EnumClassDart::new(sql_enum)));
            } else {
                skipped.push(SkippedFile {
                    path: format!("lib/sql_enums_dart_classes/{snake}_class.dart"),
                    reason: format!("enum '{snake}' is declared more than once"),
                });
            }
        }

        (files, skipped)
    }
}

#[cfg(test)]
mod tests {
    use sqlwing_schema::parse_document;

    use super::*;

    #[test]
    fn test_plan_order_and_skips() {
        let schema = parse_document(
            "CREATE TYPE mood AS ENUM ('ok');\n\
             CREATE TABLE notes (id bigint, body text);\n\
             CREATE TABLE pairs (a bigint, b bigint);",
            "schema.sql",
        )
        .schema;
        let config = GenerateConfig::default();
        let generator = Generator::new(&schema, "app", &config);

        let paths: Vec<String> = generator.preview().into_iter().map(|f| f.path).collect();
        assert_eq!(
            paths,
            vec![
                "lib/models/notes_model.dart",
                "lib/providers/notes_provider.dart",
                "lib/views/notes_view.dart",
                "lib/models/pairs_model.dart",
                "lib/providers/pairs_provider.dart",
                "lib/sql_enums_dart_classes/mood_class.dart",
            ]
        );

        let (_, skipped) = generator.plan();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].path, "lib/views/pairs_view.dart");
    }

    #[test]
    fn test_separate_query_file() {
        let schema = parse_document("CREATE TABLE notes (id bigint);", "schema.sql").schema;
        let config = GenerateConfig {
            separate_query_file: true,
            ..Default::default()
        };
        let generator = Generator::new(&schema, "app", &config);

        let paths: Vec<String> = generator.preview().into_iter().map(|f| f.path).collect();
        assert!(paths.contains(&"lib/providers/notes_provider_query.dart".to_string()));
    }

    #[test]
    fn test_duplicate_table_generated_once() {
        let mut schema = parse_document("CREATE TABLE notes (id bigint);", "a.sql").schema;
        schema.merge(parse_document("CREATE TABLE notes (id bigint, body text);", "b.sql").schema);
        let config = GenerateConfig::default();
        let generator = Generator::new(&schema, "app", &config);

        assert_eq!(generator.preview().len(), 3);
        let (_, skipped) = generator.plan();
        assert!(skipped[0].reason.contains("more than once"));
    }
}
