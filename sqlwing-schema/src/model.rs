//! The parsed schema handed to code generators.

use serde::Serialize;
use sqlwing_core::NameVariant;

use crate::types::TargetType;

/// One column of a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub table_name: NameVariant,
    pub column_name: NameVariant,
    /// Lower-cased type token as written (e.g. `bigint`, `varchar(255)`).
    pub sql_type: String,
    pub target_type: TargetType,
    /// Referenced table; empty when the column is not a foreign key.
    pub related_table_name: NameVariant,
    pub is_not_null: bool,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub is_enum: bool,
}

impl Column {
    /// The type token without any `(...)` arguments (`varchar(255)` -> `varchar`).
    pub fn base_sql_type(&self) -> &str {
        self.sql_type
            .split_once('(')
            .map_or(self.sql_type.as_str(), |(base, _)| base)
            .trim_end()
    }

    pub(crate) fn set_foreign_key(&mut self, related_table: &str) {
        self.related_table_name = NameVariant::new(related_table);
        self.is_foreign_key = !self.related_table_name.is_empty();
    }
}

/// An enumeration declared with `CREATE TYPE ... AS ENUM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlEnum {
    pub name: NameVariant,
    /// Values in declaration order, duplicates kept.
    pub values: Vec<String>,
}

impl SqlEnum {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: NameVariant::new(name),
            values,
        }
    }
}

/// A table and its columns in declaration order.
///
/// The column list is never empty and every column carries this table's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: NameVariant,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.column_name.original == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Columns that reference another table.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_foreign_key)
    }
}

/// Everything extracted from one or more SQL documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub tables: Vec<Table>,
    pub enums: Vec<SqlEnum>,
}

impl Schema {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.enums.is_empty()
    }

    /// Find the enum whose identifier equals `sql_type`.
    pub fn find_enum(&self, sql_type: &str) -> Option<&SqlEnum> {
        find_enum(&self.enums, sql_type)
    }

    /// Append another document's tables and enums.
    pub fn merge(&mut self, other: Schema) {
        self.tables.extend(other.tables);
        self.enums.extend(other.enums);
    }
}

/// Find the enum whose original identifier equals `sql_type`.
///
/// A schema qualifier on `sql_type` (`public.priority`) is ignored.
pub fn find_enum<'a>(enums: &'a [SqlEnum], sql_type: &str) -> Option<&'a SqlEnum> {
    let sql_type = unqualified(sql_type);
    enums.iter().find(|e| e.name.original == sql_type)
}

/// `auth.users` -> `users`.
pub(crate) fn unqualified(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, sql_type: &str) -> Column {
        Column {
            table_name: NameVariant::new("items"),
            column_name: NameVariant::new(name),
            sql_type: sql_type.to_string(),
            target_type: TargetType::String,
            related_table_name: NameVariant::empty(),
            is_not_null: false,
            is_primary_key: false,
            is_foreign_key: false,
            is_enum: false,
        }
    }

    #[test]
    fn test_base_sql_type() {
        assert_eq!(column("a", "varchar(255)").base_sql_type(), "varchar");
        assert_eq!(column("a", "numeric(10,2)").base_sql_type(), "numeric");
        assert_eq!(column("a", "bigint").base_sql_type(), "bigint");
    }

    #[test]
    fn test_set_foreign_key_keeps_invariant() {
        let mut col = column("owner_id", "uuid");
        col.set_foreign_key("auth.users");
        assert!(col.is_foreign_key);
        assert_eq!(col.related_table_name.original, "auth.users");

        col.set_foreign_key("");
        assert!(!col.is_foreign_key);
        assert!(col.related_table_name.is_empty());
    }

    #[test]
    fn test_schema_merge_and_find_enum() {
        let mut schema = Schema::default();
        assert!(schema.is_empty());

        schema.merge(Schema {
            tables: vec![],
            enums: vec![SqlEnum::new("status", vec!["open".into()])],
        });

        assert!(schema.find_enum("status").is_some());
        assert!(schema.find_enum("Status").is_none());
        assert!(schema.find_enum("public.status").is_some());
        assert!(schema.find_enum("public.other").is_none());
    }
}
