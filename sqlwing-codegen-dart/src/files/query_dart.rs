//! Supabase select query generator.

use std::path::{Path, PathBuf};

use sqlwing_codegen::builder::CodeBuilder;
use sqlwing_core::GeneratedFile;
use sqlwing_schema::Table;

use crate::naming::{USER_ID_COLUMN, foreign_detail_name};

/// The `<table>Query` select string embedding every related row.
///
/// Rendered inline by [`ProviderDart`](super::ProviderDart), or written on
/// its own to `lib/providers/<table>_provider_query.dart`.
pub struct QueryDart<'a> {
    table: &'a Table,
}

impl<'a> QueryDart<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Name of the generated constant.
    pub fn const_name(&self) -> String {
        format!("{}Query", self.table.name.camel)
    }

    fn select_lines(&self) -> Vec<String> {
        let related: Vec<String> = self
            .table
            .foreign_keys()
            .filter(|c| c.column_name.original != USER_ID_COLUMN)
            .map(|c| {
                let detail = foreign_detail_name(&c.column_name.original);
                format!("{}:{} ( * )", detail.original, c.column_name.original)
            })
            .collect();

        let mut lines = Vec::with_capacity(related.len() + 1);
        lines.push("*".to_string());
        lines.extend(related);

        let last = lines.len() - 1;
        for line in &mut lines[..last] {
            line.push(',');
        }
        lines
    }
}

impl GeneratedFile for QueryDart<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("lib")
            .join("providers")
            .join(format!("{}_provider_query.dart", self.table.name.original))
    }

    fn render(&self) -> String {
        CodeBuilder::dart()
            .line(&format!("const {} = '''", self.const_name()))
            .each(self.select_lines(), |b, line| b.line(&line))
            .line("''';")
            .build()
    }
}

#[cfg(test)]
mod tests {
    use sqlwing_schema::{ForeignKeys, ParseContext, parse_table};

    use super::*;

    fn table(sql: &str) -> Table {
        let fks = ForeignKeys::default();
        parse_table(sql, &ParseContext::new(&[], &fks))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_query_with_relations() {
        let table = table(
            "CREATE TABLE task_items (id bigint, category_id bigint references categories, \
             user_id uuid references auth.users, parent bigint references task_items);",
        );
        let code = QueryDart::new(&table).render();

        insta::assert_snapshot!(code, @r"
        const taskItemsQuery = '''
        *,
        category:category_id ( * ),
        parent_detail:parent ( * )
        ''';
        ");
    }

    #[test]
    fn test_query_without_relations() {
        let table = table("CREATE TABLE tags (id bigint, label text);");
        assert_eq!(
            QueryDart::new(&table).render(),
            "const tagsQuery = '''\n*\n''';\n"
        );
    }
}
