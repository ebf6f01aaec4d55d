//! `ALTER TABLE ... ADD FOREIGN KEY` reconciliation.
//!
//! Schema diagram exporters often declare relationships only through
//! `ALTER TABLE` statements placed after all the tables. The table parser
//! consults the entries collected here in addition to inline `REFERENCES`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::unqualified;

static ALTER_FOREIGN_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)alter\s+table\s+(?:only\s+)?([\w.]+)\s+",
        r"add\s+(?:constraint\s+\w+\s+)?foreign\s+key\s*\(\s*(\w+)\s*\)\s*",
        r"references\s+([\w.]+)\s*\(\s*(\w+)\s*\)[^;]*;",
    ))
    .expect("valid regex")
});

/// One `ALTER TABLE t ADD FOREIGN KEY (c) REFERENCES r (rc)` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
    /// Kept verbatim, including any schema qualifier (`auth.users`).
    pub referenced_table: String,
    pub referenced_column: String,
}

impl ForeignKey {
    fn applies_to(&self, table: &str, column: &str) -> bool {
        self.column == column && unqualified(&self.table) == unqualified(table)
    }
}

/// Foreign keys declared in one document, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKeys(Vec<ForeignKey>);

impl ForeignKeys {
    /// First entry declared for `table.column`.
    ///
    /// A schema qualifier on either table name is ignored, so
    /// `public.entries` matches `entries`.
    pub fn lookup(&self, table: &str, column: &str) -> Option<&ForeignKey> {
        self.0.iter().find(|fk| fk.applies_to(table, column))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Collect every `ALTER TABLE ... ADD FOREIGN KEY` statement in `sql`.
///
/// Double quotes are stripped before matching because exporters quote
/// identifiers inconsistently.
pub fn reconcile_foreign_keys(sql: &str) -> ForeignKeys {
    let unquoted = sql.replace('"', "");
    let keys = ALTER_FOREIGN_KEY_REGEX
        .captures_iter(&unquoted)
        .map(|caps| ForeignKey {
            table: caps[1].to_string(),
            column: caps[2].to_string(),
            referenced_table: caps[3].to_string(),
            referenced_column: caps[4].to_string(),
        })
        .collect();
    ForeignKeys(keys)
}
