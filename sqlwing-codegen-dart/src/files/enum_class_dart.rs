//! Dart wrapper class for a SQL enum.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use sqlwing_codegen::builder::CodeBuilder;
use sqlwing_core::GeneratedFile;
use sqlwing_schema::SqlEnum;

use crate::naming::{dart_string, enum_value_identifier};

/// `lib/sql_enums_dart_classes/<enum>_class.dart`: a class with one
/// `static const` instance per enum value.
pub struct EnumClassDart<'a> {
    sql_enum: &'a SqlEnum,
}

impl<'a> EnumClassDart<'a> {
    pub fn new(sql_enum: &'a SqlEnum) -> Self {
        Self { sql_enum }
    }

    /// `(identifier, value)` pairs; clashing identifiers get the value index
    /// appended.
    fn members(&self) -> Vec<(String, &'a str)> {
        let mut seen = HashSet::new();
        self.sql_enum
            .values
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let mut identifier = enum_value_identifier(value, idx);
                if !seen.insert(identifier.clone()) {
                    identifier = format!("{identifier}{idx}");
                    seen.insert(identifier.clone());
                }
                (identifier, value.as_str())
            })
            .collect()
    }
}

impl GeneratedFile for EnumClassDart<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("lib")
            .join("sql_enums_dart_classes")
            .join(format!("{}_class.dart", self.sql_enum.name.original))
    }

    fn render(&self) -> String {
        let class = &self.sql_enum.name.capitalized;
        let param = &self.sql_enum.name.camel;
        let members = self.members();

        CodeBuilder::dart()
            .block_with_close(&format!("class {class} {{"), "}", |b| {
                b.line("final String name;")
                    .blank()
                    .line(&format!("const {class}._(this.name);"))
                    .blank()
                    .line("@override")
                    .line("String toString() => name;")
                    .blank()
                    .each(&members, |b, (identifier, value)| {
                        b.line(&format!(
                            "static const {class} {identifier} = {class}._({});",
                            dart_string(value)
                        ))
                    })
                    .when(!members.is_empty(), |b| b.blank())
                    .block_with_close(&format!("static const List<{class}> all = ["), "];", |b| {
                        b.each(&members, |b, (identifier, _)| b.line(&format!("{identifier},")))
                    })
                    .blank()
                    .block_with_close(&format!("static {class} fromJson(String value) {{"), "}", |b| {
                        b.line(&format!("return {class}._(value);"))
                    })
                    .blank()
                    .block_with_close(
                        &format!("static String toJson({class} {param}) {{"),
                        "}",
                        |b| b.line(&format!("return {param}.toString();")),
                    )
                    .blank()
                    .block_with_close(&format!("static {class} fromString(String value) {{"), "}", |b| {
                        b.line(&format!("return {class}.fromJson(value);"))
                    })
            })
            .build()
    }
}
