//! riverpod provider generator.

use std::path::{Path, PathBuf};

use sqlwing_codegen::{builder::CodeBuilder, generation::ImportCollector};
use sqlwing_core::GeneratedFile;
use sqlwing_schema::Table;

use super::QueryDart;

/// `lib/providers/<table>_provider.dart`: an async notifier that loads,
/// upserts and deletes rows through Supabase.
pub struct ProviderDart<'a> {
    table: &'a Table,
    project_name: &'a str,
    debug_print: bool,
    separate_query_file: bool,
}

impl<'a> ProviderDart<'a> {
    pub fn new(table: &'a Table, project_name: &'a str) -> Self {
        Self {
            table,
            project_name,
            debug_print: false,
            separate_query_file: false,
        }
    }

    /// Print the first fetched row from `build`.
    pub fn with_debug_print(mut self, enabled: bool) -> Self {
        self.debug_print = enabled;
        self
    }

    /// Import the query from its own file instead of embedding it.
    pub fn with_separate_query_file(mut self, enabled: bool) -> Self {
        self.separate_query_file = enabled;
        self
    }

    fn imports(&self) -> ImportCollector {
        let snake = &self.table.name.original;
        let mut imports = ImportCollector::new();
        imports.add("dart:async");
        if self.debug_print {
            imports.add("package:flutter/widgets.dart");
        }
        imports.add_package(self.project_name, &format!("models/{snake}_model.dart"));
        if self.separate_query_file {
            imports.add_package(
                self.project_name,
                &format!("providers/{snake}_provider_query.dart"),
            );
        }
        imports.add("package:riverpod_annotation/riverpod_annotation.dart");
        imports.add("package:supabase_flutter/supabase_flutter.dart");
        imports
    }
}

impl GeneratedFile for ProviderDart<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("lib")
            .join("providers")
            .join(format!("{}_provider.dart", self.table.name.original))
    }

    fn render(&self) -> String {
        let snake = &self.table.name.original;
        let class = &self.table.name.capitalized;
        let model = format!("{class}Model");
        let query = QueryDart::new(self.table);

        let mut builder = CodeBuilder::dart();
        builder.push_lines(&self.imports().render());

        builder
            .blank()
            .line(&format!("part '{snake}_provider.g.dart';"))
            .blank()
            .line("final supabase = Supabase.instance.client;")
            .blank()
            .when(!self.separate_query_file, |b| b.lines(&query.render()).blank())
            .line("@riverpod")
            .block_with_close(&format!("class {class} extends _${class} {{"), "}", |b| {
                b.line("@override")
                    .block_with_close(
                        &format!("Future<List<{model}>> build() async {{"),
                        "}",
                        |b| {
                            b.line(&format!(
                                "final response = await supabase.from('{snake}').select({});",
                                query.const_name()
                            ))
                            .when(self.debug_print, |b| {
                                b.line(&format!(
                                    "debugPrint(\">> {snake}_provider response[0]:\\n${{(response.isNotEmpty ? response[0] : 'empty')}}\\n\");"
                                ))
                            })
                            .line(&format!("return response.map({model}.fromJson).toList();"))
                        },
                    )
                    .blank()
                    .block_with_close("String? getUserId() {", "}", |b| {
                        b.line("return supabase.auth.currentUser?.id;")
                    })
                    .blank()
                    .block_with_close(
                        &format!("Future<void> upsert({model} type) async {{"),
                        "}",
                        |b| {
                            b.line("await supabase")
                                .indent()
                                .indent()
                                .line(&format!(".from('{snake}')"))
                                .line(".upsert(type.toJson(), onConflict: \"id\");")
                                .dedent()
                                .dedent()
                                .blank()
                                .line("ref.invalidateSelf();")
                                .line("await future;")
                        },
                    )
                    .blank()
                    .block_with_close("Future<void> delete(int? id) async {", "}", |b| {
                        b.block_with_close("if (id != null) {", "}", |b| {
                            b.line(&format!(
                                "await supabase.from('{snake}').delete().eq('id', id);"
                            ))
                        })
                        .blank()
                        .line("ref.invalidateSelf();")
                        .line("await future;")
                    })
            })
            .build()
    }
}
