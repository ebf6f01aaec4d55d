//! `CREATE TYPE ... AS ENUM` extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::SqlEnum;

static CREATE_ENUM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)create\s+type\s+"?(?:\w+"?\."?)?(\w+)"?\s+as\s+enum\s*\(([^)]*)\)\s*;"#)
        .expect("valid regex")
});

/// Extract every enum declared anywhere in `sql`.
///
/// Values keep their declaration order (duplicates included). Surrounding
/// whitespace and quote characters are trimmed from each value. A document
/// without enums yields an empty list.
///
/// ```
/// use sqlwing_schema::extract_enums;
///
/// let enums = extract_enums("CREATE TYPE \"status\" AS ENUM ('open', 'closed');");
/// assert_eq!(enums[0].name.original, "status");
/// assert_eq!(enums[0].values, vec!["open", "closed"]);
/// ```
pub fn extract_enums(sql: &str) -> Vec<SqlEnum> {
    CREATE_ENUM_REGEX
        .captures_iter(sql)
        .map(|caps| SqlEnum::new(&caps[1], split_values(&caps[2])))
        .collect()
}

fn split_values(list: &str) -> Vec<String> {
    list.split(',')
        .map(|value| value.trim().trim_matches(['\'', '"']).to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_enums() {
        assert!(extract_enums("CREATE TABLE items (id bigint);").is_empty());
        assert!(extract_enums("").is_empty());
    }

    #[test]
    fn test_quoted_and_bare() {
        let sql = r#"
            CREATE TYPE "priority" AS ENUM ('low', 'high');
            create type mood as enum (happy, sad);
        "#;
        let enums = extract_enums(sql);

        assert_eq!(enums.len(), 2);
        assert_eq!(enums[0].name.original, "priority");
        assert_eq!(enums[0].values, vec!["low", "high"]);
        assert_eq!(enums[1].name.original, "mood");
        assert_eq!(enums[1].values, vec!["happy", "sad"]);
    }

    #[test]
    fn test_multiline_keeps_order_and_duplicates() {
        let sql = "CREATE TYPE task_state AS ENUM (\n  'todo',\n  'in progress',\n  'todo'\n);";
        let enums = extract_enums(sql);

        assert_eq!(enums.len(), 1);
        assert_eq!(enums[0].name.camel, "taskState");
        assert_eq!(enums[0].values, vec!["todo", "in progress", "todo"]);
    }

    #[test]
    fn test_schema_qualified_name() {
        let enums = extract_enums(r#"CREATE TYPE "public"."status" AS ENUM ('a');"#);
        assert_eq!(enums[0].name.original, "status");
    }

    #[test]
    fn test_empty_value_list() {
        let enums = extract_enums("CREATE TYPE nothing AS ENUM ();");
        assert_eq!(enums.len(), 1);
        assert!(enums[0].values.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let sql = "CREATE TYPE a AS ENUM ('x', 'y'); CREATE TYPE b AS ENUM ('z');";
        assert_eq!(extract_enums(sql), extract_enums(sql));
    }
}
