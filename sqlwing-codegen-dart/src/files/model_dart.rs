//! freezed model class generator.

use std::path::{Path, PathBuf};

use sqlwing_codegen::{builder::CodeBuilder, generation::ImportCollector};
use sqlwing_core::GeneratedFile;
use sqlwing_schema::{Column, Table};

use crate::{
    naming::{foreign_detail_name, related_model},
    type_mapper::DartTypeMapper,
};

/// `lib/models/<table>_model.dart`: a freezed data class for one table.
///
/// Every foreign key (other than to `auth.users`) adds a nullable field
/// holding the embedded related row.
pub struct ModelDart<'a> {
    table: &'a Table,
    project_name: &'a str,
}

impl<'a> ModelDart<'a> {
    pub fn new(table: &'a Table, project_name: &'a str) -> Self {
        Self {
            table,
            project_name,
        }
    }

    fn class_name(&self) -> String {
        format!("{}Model", self.table.name.capitalized)
    }

    fn field_lines(&self) -> (ImportCollector, Vec<String>) {
        let mapper = DartTypeMapper;
        let mut imports = ImportCollector::new();
        let mut fields = Vec::new();

        for column in &self.table.columns {
            fields.push(field(
                json_key(&column.column_name.original),
                column.is_not_null,
                &mapper.column_type(column),
                &column.column_name.camel,
            ));

            if let Some(related) = related_model(column) {
                imports.add_package(
                    self.project_name,
                    &format!("models/{}_model.dart", related.original),
                );
                fields.push(detail_field(column, &related.capitalized));
            }
        }

        (imports, fields)
    }
}

fn json_key(snake: &str) -> Option<String> {
    snake
        .contains('_')
        .then(|| format!("@JsonKey(name: '{snake}')"))
}

fn field(json_key: Option<String>, required: bool, ty: &str, name: &str) -> String {
    let mut parts = Vec::with_capacity(4);
    parts.extend(json_key);
    if required {
        parts.push("required".to_string());
    }
    parts.push(ty.to_string());
    parts.push(format!("{name},"));
    parts.join(" ")
}

fn detail_field(column: &Column, related_class: &str) -> String {
    let detail = foreign_detail_name(&column.column_name.original);
    let key = column
        .column_name
        .original
        .contains('_')
        .then(|| format!("@JsonKey(name: '{}')", detail.original));
    field(key, false, &format!("{related_class}Model?"), &detail.camel)
}

impl GeneratedFile for ModelDart<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("lib")
            .join("models")
            .join(format!("{}_model.dart", self.table.name.original))
    }

    fn render(&self) -> String {
        let snake = &self.table.name.original;
        let class = self.class_name();
        let (imports, fields) = self.field_lines();

        let mut builder = CodeBuilder::dart()
            .line("import 'package:freezed_annotation/freezed_annotation.dart';");
        for uri in imports.iter() {
            builder = builder.line(&format!("import '{uri}';"));
        }

        builder
            .blank()
            .line(&format!("part '{snake}_model.freezed.dart';"))
            .line(&format!("part '{snake}_model.g.dart';"))
            .blank()
            .line("@freezed")
            .block_with_close(&format!("class {class} with _${class} {{"), "}", |b| {
                b.line("@JsonSerializable(includeIfNull: false)")
                    .block_with_close(
                        &format!("factory {class}({{"),
                        &format!("}}) = _{class};"),
                        |b| b.each(&fields, |b, f| b.line(f)),
                    )
                    .blank()
                    .line(&format!(
                        "factory {class}.fromJson(Map<String, dynamic> json) =>"
                    ))
                    .indent()
                    .indent()
                    .line(&format!("_${class}FromJson(json);"))
                    .dedent()
                    .dedent()
            })
            .build()
    }
}
