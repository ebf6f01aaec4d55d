//! End-to-end tests for Dart code generation.

use sqlwing_codegen::GenerateConfig;
use sqlwing_codegen_dart::{Generator, LanguageCodegen};
use sqlwing_core::WriteResult;
use sqlwing_schema::parse_document;

const SCHEMA: &str = r#"
CREATE TYPE "priority" AS ENUM ('low', 'medium', 'high');

CREATE TABLE "categories" (
  "id" bigint PRIMARY KEY,
  "name" varchar NOT NULL
);

CREATE TABLE "items" (
  "id" bigint PRIMARY KEY,
  "user_id" uuid NOT NULL,
  "title" varchar NOT NULL,
  "priority" priority,
  "category_id" bigint
);

ALTER TABLE "items" ADD FOREIGN KEY ("category_id") REFERENCES "categories" ("id");
ALTER TABLE "items" ADD FOREIGN KEY ("user_id") REFERENCES "auth"."users" ("id");
"#;

/// Generate code from SQL and return files sorted by path.
fn generate_files(sql: &str, config: &GenerateConfig) -> Vec<(String, String)> {
    let schema = parse_document(sql, "schema.sql").schema;
    let generator = Generator::new(&schema, "todo_app", config);
    let mut result: Vec<(String, String)> = generator
        .preview()
        .into_iter()
        .map(|f| (f.path, f.content))
        .collect();
    result.sort_by(|a, b| a.0.cmp(&b.0));
    result
}

/// Get a specific file from the generated output.
fn get_file<'a>(files: &'a [(String, String)], path: &str) -> Option<&'a str> {
    files
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, c)| c.as_str())
}

#[test]
fn test_generated_file_set() {
    let files = generate_files(SCHEMA, &GenerateConfig::default());
    let paths: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();

    assert_eq!(
        paths,
        vec![
            "lib/models/categories_model.dart",
            "lib/models/items_model.dart",
            "lib/providers/categories_provider.dart",
            "lib/providers/items_provider.dart",
            "lib/sql_enums_dart_classes/priority_class.dart",
            "lib/views/categories_view.dart",
            "lib/views/items_view.dart",
        ]
    );
}

#[test]
fn test_items_model_embeds_category() {
    let files = generate_files(SCHEMA, &GenerateConfig::default());
    let model = get_file(&files, "lib/models/items_model.dart").expect("model not found");

    assert!(model.contains("import 'package:todo_app/models/categories_model.dart';"));
    assert!(model.contains("class ItemsModel with _$ItemsModel {"));
    assert!(model.contains("@JsonKey(name: 'category') CategoriesModel? category,"));
    assert!(model.contains("@JsonKey(name: 'user_id') required String userId,"));
    assert!(model.contains("String? priority,"));
}

#[test]
fn test_items_provider_query() {
    let files = generate_files(SCHEMA, &GenerateConfig::default());
    let provider = get_file(&files, "lib/providers/items_provider.dart").expect("provider not found");

    assert!(provider.contains("const itemsQuery = '''\n*,\ncategory:category_id ( * )\n''';"));
    assert!(provider.contains("class Items extends _$Items {"));
    assert!(!provider.contains("debugPrint"));
}

#[test]
fn test_config_flags() {
    let config = GenerateConfig {
        debug_print: true,
        separate_query_file: true,
        ..Default::default()
    };
    let files = generate_files(SCHEMA, &config);

    let query = get_file(&files, "lib/providers/items_provider_query.dart").expect("query not found");
    assert!(query.starts_with("const itemsQuery = '''"));

    let provider = get_file(&files, "lib/providers/items_provider.dart").unwrap();
    assert!(provider.contains("debugPrint("));
    assert!(provider.contains("import 'package:todo_app/providers/items_provider_query.dart';"));
}

#[test]
fn test_enum_class_snapshot() {
    let files = generate_files(SCHEMA, &GenerateConfig::default());
    let class = get_file(&files, "lib/sql_enums_dart_classes/priority_class.dart").unwrap();

    insta::assert_snapshot!(class, @r#"
    class Priority {
      final String name;

      const Priority._(this.name);

      @override
      String toString() => name;

      static const Priority low = Priority._("low");
      static const Priority medium = Priority._("medium");
      static const Priority high = Priority._("high");

      static const List<Priority> all = [
        low,
        medium,
        high,
      ];

      static Priority fromJson(String value) {
        return Priority._(value);
      }

      static String toJson(Priority priority) {
        return priority.toString();
      }

      static Priority fromString(String value) {
        return Priority.fromJson(value);
      }
    }
    "#);
}

#[test]
fn test_generation_is_deterministic() {
    let config = GenerateConfig::default();
    assert_eq!(generate_files(SCHEMA, &config), generate_files(SCHEMA, &config));
}

#[test]
fn test_generate_writes_and_replaces() {
    let dir = tempfile::tempdir().unwrap();
    let schema = parse_document(SCHEMA, "schema.sql").schema;
    let config = GenerateConfig::default();
    let generator = Generator::new(&schema, "todo_app", &config);

    let first = generator.generate(dir.path()).unwrap();
    assert_eq!(first.written.len(), 7);
    assert!(first.written.iter().all(|f| f.result == WriteResult::Created));
    assert!(dir.path().join("lib/views/items_view.dart").exists());

    let second = generator.generate(dir.path()).unwrap();
    assert_eq!(second.replaced_count(), 7);
}
