//! `CREATE TABLE` statement parsing.

use std::sync::LazyLock;

use regex::Regex;
use sqlwing_core::NameVariant;
use tracing::debug;

use crate::{
    Result,
    error::{Error, SourceContext},
    foreign_keys::ForeignKeys,
    model::{Column, SqlEnum, Table, find_enum},
    types::{TargetType, map_sql_type},
};

static CREATE_TABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?is)create\s+table\s+(?:if\s+not\s+exists\s+)?"#,
        r#""?(?:\w+"?\."?)?(\w+)"?\s*\((.*)\)\s*;"#,
    ))
    .expect("valid regex")
});

static PRIMARY_KEY_CONSTRAINT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(?:constraint\s+\w+\s+)?primary\s+key\s*\(([^)]*)\)").expect("valid regex")
});

static FOREIGN_KEY_CONSTRAINT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^(?:constraint\s+\w+\s+)?foreign\s+key\s*\(([^)]*)\)\s*references\s+([\w.]+)",
    )
    .expect("valid regex")
});

/// Leading keywords of table-level constraints inside a `CREATE TABLE` body.
const CONSTRAINT_KEYWORDS: &[&str] = &["constraint", "primary", "foreign", "unique", "check", "exclude"];

/// Document-wide context needed to classify columns.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    /// Enums declared in the same document.
    pub enums: &'a [SqlEnum],
    /// `ALTER TABLE` foreign keys declared in the same document.
    pub foreign_keys: &'a ForeignKeys,
    /// Target type for SQL types missing from the type map.
    pub fallback: TargetType,
    source: Option<&'a SourceContext>,
}

impl<'a> ParseContext<'a> {
    pub fn new(enums: &'a [SqlEnum], foreign_keys: &'a ForeignKeys) -> Self {
        Self {
            enums,
            foreign_keys,
            fallback: TargetType::default(),
            source: None,
        }
    }

    pub fn with_fallback(mut self, fallback: TargetType) -> Self {
        self.fallback = fallback;
        self
    }

    /// Report errors against the whole document instead of the statement.
    pub fn with_source(mut self, source: &'a SourceContext) -> Self {
        self.source = Some(source);
        self
    }

    fn malformed_column(
        &self,
        table: &str,
        declaration: &str,
        offset: usize,
        statement: &str,
    ) -> Box<Error> {
        let span = (offset, declaration.len());
        match self.source {
            Some(source) => source.malformed_column(table, declaration, span),
            None => SourceContext::new(statement, "<statement>")
                .malformed_column(table, declaration, span),
        }
    }
}

/// Parse one `CREATE TABLE name ( ... );` statement.
///
/// Returns `Ok(None)` when `statement` does not have that shape or declares
/// no columns. A column declaration with fewer than two tokens fails the
/// whole table.
///
/// ```
/// use sqlwing_schema::{ForeignKeys, ParseContext, TargetType, parse_table};
///
/// let fks = ForeignKeys::default();
/// let ctx = ParseContext::new(&[], &fks);
/// let table = parse_table(
///     "CREATE TABLE items (id bigint, name varchar, category_id bigint references categories (id));",
///     &ctx,
/// )
/// .unwrap()
/// .unwrap();
///
/// let category = &table.columns[2];
/// assert!(category.is_foreign_key);
/// assert_eq!(category.related_table_name.original, "categories");
/// assert_eq!(category.target_type, TargetType::Integer);
/// ```
pub fn parse_table(statement: &str, ctx: &ParseContext<'_>) -> Result<Option<Table>> {
    parse_table_at(statement, 0, ctx)
}

/// Parse a statement found at byte `offset` of the context's source.
pub(crate) fn parse_table_at(
    statement: &str,
    offset: usize,
    ctx: &ParseContext<'_>,
) -> Result<Option<Table>> {
    let Some(caps) = CREATE_TABLE_REGEX.captures(statement) else {
        return Ok(None);
    };
    let (Some(name), Some(body)) = (caps.get(1), caps.get(2)) else {
        return Ok(None);
    };
    let table_name = name.as_str();
    let body_offset = offset + body.start();

    let mut columns = Vec::new();
    let mut constraints = Vec::new();

    for (start, raw) in split_declarations(body.as_str()) {
        let declaration = raw.trim();
        if declaration.is_empty() {
            continue;
        }

        if let Some(constraint) = TableConstraint::parse(declaration) {
            constraints.push(constraint);
            continue;
        }

        let Some(tokens) = ColumnTokens::parse(declaration) else {
            let leading = raw.len() - raw.trim_start().len();
            return Err(ctx.malformed_column(
                table_name,
                declaration,
                body_offset + start + leading,
                statement,
            ));
        };
        columns.push(tokens.into_column(table_name, ctx));
    }

    if columns.is_empty() {
        return Ok(None);
    }

    for constraint in &constraints {
        constraint.apply(&mut columns);
    }

    // ALTER TABLE declarations override anything declared inline.
    for column in &mut columns {
        if let Some(fk) = ctx
            .foreign_keys
            .lookup(table_name, &column.column_name.original)
        {
            column.set_foreign_key(&fk.referenced_table);
        }
    }

    debug!(
        table = table_name,
        columns = columns.len(),
        foreign_keys = columns.iter().filter(|c| c.is_foreign_key).count(),
        "parsed table"
    );

    Ok(Some(Table {
        name: NameVariant::new(table_name),
        columns,
    }))
}

/// Split a table body on commas outside parentheses and string literals.
///
/// Returns each piece with its byte offset in `body`. Keeping
/// `numeric(10,2)` in one piece is a deliberate departure from a plain
/// comma split.
fn split_declarations(body: &str) -> Vec<(usize, &str)> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        match c {
            '\'' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => depth = depth.saturating_sub(1),
            ',' if !in_string && depth == 0 => {
                parts.push((start, &body[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push((start, &body[start..]));
    parts
}

/// Whitespace separated tokens of one column declaration.
#[derive(Debug)]
struct ColumnTokens {
    tokens: Vec<String>,
}

impl ColumnTokens {
    /// Tokenize a declaration; `None` when it lacks a name and a type.
    fn parse(declaration: &str) -> Option<Self> {
        let tokens: Vec<String> = declaration
            .split_whitespace()
            .map(|t| t.replace('"', ""))
            .filter(|t| !t.is_empty())
            .collect();

        (tokens.len() >= 2).then_some(Self { tokens })
    }

    fn name(&self) -> &str {
        &self.tokens[0]
    }

    fn sql_type(&self) -> String {
        self.tokens[1].to_lowercase()
    }

    fn has_pair(&self, first: &str, second: &str) -> bool {
        self.tokens
            .windows(2)
            .any(|w| w[0].eq_ignore_ascii_case(first) && w[1].eq_ignore_ascii_case(second))
    }

    /// Table named after an inline `REFERENCES` keyword.
    fn referenced_table(&self) -> Option<&str> {
        let position = self
            .tokens
            .iter()
            .position(|t| t.eq_ignore_ascii_case("references"))?;
        let token = self.tokens.get(position + 1)?;
        let table = token.split('(').next().unwrap_or(token).trim();
        (!table.is_empty()).then_some(table)
    }

    fn into_column(self, table_name: &str, ctx: &ParseContext<'_>) -> Column {
        let sql_type = self.sql_type();
        let target_type = map_sql_type(&sql_type, ctx.fallback);
        let is_enum = find_enum(ctx.enums, &sql_type).is_some();

        let mut column = Column {
            table_name: NameVariant::new(table_name),
            column_name: NameVariant::new(self.name()),
            target_type,
            related_table_name: NameVariant::empty(),
            is_not_null: self.has_pair("not", "null"),
            is_primary_key: self.has_pair("primary", "key"),
            is_foreign_key: false,
            is_enum,
            sql_type,
        };
        if let Some(related) = self.referenced_table() {
            column.set_foreign_key(related);
        }
        column
    }
}

/// A table-level constraint line such as `PRIMARY KEY (a, b)`.
#[derive(Debug, PartialEq, Eq)]
enum TableConstraint {
    PrimaryKey(Vec<String>),
    ForeignKey { columns: Vec<String>, table: String },
    Other,
}

impl TableConstraint {
    fn parse(declaration: &str) -> Option<Self> {
        let first = declaration.split_whitespace().next()?.to_lowercase();
        if !CONSTRAINT_KEYWORDS.contains(&first.as_str()) {
            return None;
        }

        let unquoted = declaration.replace('"', "");
        if let Some(caps) = PRIMARY_KEY_CONSTRAINT_REGEX.captures(&unquoted) {
            return Some(Self::PrimaryKey(column_list(&caps[1])));
        }
        if let Some(caps) = FOREIGN_KEY_CONSTRAINT_REGEX.captures(&unquoted) {
            return Some(Self::ForeignKey {
                columns: column_list(&caps[1]),
                table: caps[2].to_string(),
            });
        }
        Some(Self::Other)
    }

    fn apply(&self, columns: &mut [Column]) {
        match self {
            Self::PrimaryKey(names) => {
                for column in columns.iter_mut() {
                    if names.contains(&column.column_name.original) {
                        column.is_primary_key = true;
                    }
                }
            }
            Self::ForeignKey { columns: names, table } => {
                for column in columns.iter_mut() {
                    if names.contains(&column.column_name.original) {
                        column.set_foreign_key(table);
                    }
                }
            }
            Self::Other => {}
        }
    }
}

fn column_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{enums::extract_enums, foreign_keys::reconcile_foreign_keys, model::SqlEnum};

    fn parse(statement: &str) -> Option<Table> {
        let fks = ForeignKeys::default();
        parse_table(statement, &ParseContext::new(&[], &fks)).unwrap()
    }

    #[test]
    fn test_items_with_inline_reference() {
        let table = parse(
            "CREATE TABLE items (id bigint, name varchar, category_id bigint references categories (id));",
        )
        .unwrap();

        assert_eq!(table.name.original, "items");
        assert_eq!(table.columns.len(), 3);

        let category = &table.columns[2];
        assert_eq!(category.column_name.original, "category_id");
        assert!(category.is_foreign_key);
        assert_eq!(category.related_table_name.original, "categories");
        assert_eq!(category.target_type, TargetType::Integer);

        assert!(!table.columns[0].is_foreign_key);
        assert!(table.columns[0].related_table_name.is_empty());
    }

    #[test]
    fn test_every_column_shares_table_name() {
        let table = parse("create table notes (id bigint, body text);").unwrap();
        assert!(table.columns.iter().all(|c| c.table_name.original == "notes"));
    }

    #[test]
    fn test_not_null_and_primary_key() {
        let table = parse(
            "CREATE TABLE tasks (\n  id bigint generated by default as identity PRIMARY KEY,\n  title varchar NOT NULL,\n  note text\n);",
        )
        .unwrap();

        assert!(table.columns[0].is_primary_key);
        assert!(!table.columns[0].is_not_null);
        assert!(table.columns[1].is_not_null);
        assert!(!table.columns[1].is_primary_key);
        assert!(!table.columns[2].is_not_null);
    }

    #[test]
    fn test_enum_column() {
        let enums = vec![SqlEnum::new("status", vec!["open".into(), "done".into()])];
        let fks = ForeignKeys::default();
        let ctx = ParseContext::new(&enums, &fks);

        let table = parse_table(
            "CREATE TABLE tickets (id bigint, status status not null);",
            &ctx,
        )
        .unwrap()
        .unwrap();

        let status = &table.columns[1];
        assert!(status.is_enum);
        assert!(status.is_not_null);
        assert!(!table.columns[0].is_enum);
    }

    #[test]
    fn test_schema_qualified_enum_column() {
        let enums = extract_enums(r#"CREATE TYPE "public"."priority" AS ENUM ('low', 'high');"#);
        let fks = ForeignKeys::default();
        let ctx = ParseContext::new(&enums, &fks);

        let table = parse_table(
            r#"CREATE TABLE "public"."tasks" ("id" bigint, "priority" "public"."priority");"#,
            &ctx,
        )
        .unwrap()
        .unwrap();

        let priority = &table.columns[1];
        assert!(priority.is_enum);
        assert_eq!(priority.sql_type, "public.priority");
    }

    #[test]
    fn test_enum_type_is_case_insensitive_on_column() {
        let enums = vec![SqlEnum::new("status", vec![])];
        let fks = ForeignKeys::default();
        let ctx = ParseContext::new(&enums, &fks);

        let table = parse_table(r#"CREATE TABLE t (s "STATUS");"#, &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(table.columns[0].sql_type, "status");
        assert!(table.columns[0].is_enum);
    }

    #[test]
    fn test_alter_table_reconciliation() {
        let document = "CREATE TABLE entries (id bigint, item_id bigint);\n\
                        ALTER TABLE entries ADD FOREIGN KEY (item_id) REFERENCES items (id);";
        let fks = reconcile_foreign_keys(document);
        let ctx = ParseContext::new(&[], &fks);

        let table = parse_table("CREATE TABLE entries (id bigint, item_id bigint);", &ctx)
            .unwrap()
            .unwrap();

        let item = &table.columns[1];
        assert!(item.is_foreign_key);
        assert_eq!(item.related_table_name.original, "items");
        assert!(!table.columns[0].is_foreign_key);
    }

    #[test]
    fn test_alter_table_overrides_inline_reference() {
        let fks = reconcile_foreign_keys(
            "ALTER TABLE entries ADD FOREIGN KEY (owner_id) REFERENCES auth.users (id);",
        );
        let ctx = ParseContext::new(&[], &fks);

        let table = parse_table(
            "CREATE TABLE entries (owner_id uuid references profiles (id));",
            &ctx,
        )
        .unwrap()
        .unwrap();

        assert_eq!(table.columns[0].related_table_name.original, "auth.users");
    }

    #[test]
    fn test_not_a_create_table_statement() {
        assert!(parse("SELECT * FROM items;").is_none());
        assert!(parse("CREATE TYPE status AS ENUM ('a');").is_none());
    }

    #[test]
    fn test_quoted_identifiers() {
        let table = parse(
            r#"CREATE TABLE "public"."items" ("id" bigint PRIMARY KEY, "owner_id" uuid REFERENCES "auth"."users"("id"));"#,
        )
        .unwrap();

        assert_eq!(table.name.original, "items");
        assert_eq!(table.columns[0].column_name.original, "id");
        assert_eq!(table.columns[1].related_table_name.original, "auth.users");
    }

    #[test]
    fn test_parenthesized_type_arguments_stay_together() {
        let table = parse("CREATE TABLE prices (id bigint, amount numeric(10,2) not null, label varchar(80));")
            .unwrap();

        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.columns[1].sql_type, "numeric(10,2)");
        assert_eq!(table.columns[1].target_type, TargetType::String);
        assert!(table.columns[1].is_not_null);
        assert_eq!(table.columns[2].target_type, TargetType::String);
    }

    #[test]
    fn test_fallback_type() {
        let fks = ForeignKeys::default();
        let ctx = ParseContext::new(&[], &fks).with_fallback(TargetType::Dynamic);

        let table = parse_table("CREATE TABLE t (data jsonb, n real);", &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(table.columns[0].target_type, TargetType::Dynamic);
        assert_eq!(table.columns[1].target_type, TargetType::Float);
    }

    #[test]
    fn test_table_level_constraints() {
        let table = parse(
            "CREATE TABLE links (\n  a_id bigint,\n  b_id bigint,\n  PRIMARY KEY (a_id, b_id),\n  CONSTRAINT links_b_fk FOREIGN KEY (b_id) REFERENCES bees (id),\n  UNIQUE (a_id)\n);",
        )
        .unwrap();

        assert_eq!(table.columns.len(), 2);
        assert!(table.columns.iter().all(|c| c.is_primary_key));
        assert!(!table.columns[0].is_foreign_key);
        assert_eq!(table.columns[1].related_table_name.original, "bees");
    }

    #[test]
    fn test_malformed_column_is_an_error() {
        let fks = ForeignKeys::default();
        let ctx = ParseContext::new(&[], &fks);

        let err = parse_table("CREATE TABLE broken (id bigint, lonely);", &ctx).unwrap_err();
        match *err {
            Error::MalformedColumn {
                ref table,
                ref declaration,
                span,
                ..
            } => {
                assert_eq!(table, "broken");
                assert_eq!(declaration, "lonely");
                assert_eq!(span.offset(), 32);
                assert_eq!(span.len(), 6);
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_is_not_a_table() {
        assert!(parse("CREATE TABLE nothing ();").is_none());
    }

    #[test]
    fn test_split_declarations_offsets() {
        let parts = split_declarations("a int, b numeric(1,2), c text default 'x,y'");
        let texts: Vec<&str> = parts.iter().map(|(_, s)| s.trim()).collect();

        assert_eq!(texts, vec!["a int", "b numeric(1,2)", "c text default 'x,y'"]);
        assert_eq!(parts[1].0, 6);
    }

    #[test]
    fn test_deterministic() {
        let statement =
            "CREATE TABLE items (id bigint primary key, name varchar not null, kind_id bigint references kinds (id));";
        assert_eq!(parse(statement), parse(statement));
    }
}
