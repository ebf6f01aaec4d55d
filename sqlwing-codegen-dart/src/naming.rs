//! Dart naming rules for generated identifiers and paths.

use std::sync::LazyLock;

use regex::Regex;
use sqlwing_core::NameVariant;
use sqlwing_schema::Column;

/// Supabase's built-in users table. Never modelled or fetched.
pub const AUTH_USERS_TABLE: &str = "auth.users";

/// Column holding the row owner, excluded from embedded selects.
pub const USER_ID_COLUMN: &str = "user_id";

static NON_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("valid regex"));

/// Reserved words that cannot name a static member.
const DART_RESERVED: &[&str] = &[
    "assert", "break", "case", "catch", "class", "const", "continue", "default", "do", "else",
    "enum", "extends", "false", "final", "finally", "for", "if", "in", "is", "new", "null",
    "rethrow", "return", "super", "switch", "this", "throw", "true", "try", "var", "void",
    "while", "with",
];

/// Whether the column references Supabase's `auth.users`.
pub fn is_auth_user(column: &Column) -> bool {
    column.related_table_name.original == AUTH_USERS_TABLE
}

/// Name of the table a column's related model is generated from.
///
/// `None` for plain columns and for references to `auth.users`. A schema
/// qualifier (`public.categories`) is dropped since generated files are
/// named after the bare table.
pub fn related_model(column: &Column) -> Option<NameVariant> {
    if !column.is_foreign_key || is_auth_user(column) {
        return None;
    }
    let related = &column.related_table_name.original;
    let bare = related.rsplit_once('.').map_or(related.as_str(), |(_, name)| name);
    Some(NameVariant::new(bare))
}

/// Name of the embedded related row for a foreign-key column.
///
/// `category_id` becomes `category`; a column without the `_id` suffix
/// gets `_detail` appended instead.
pub fn foreign_detail_name(column_name: &str) -> NameVariant {
    match column_name.strip_suffix("_id") {
        Some(stem) if !stem.is_empty() => NameVariant::new(stem),
        _ => NameVariant::new(format!("{column_name}_detail")),
    }
}

/// Column name with a trailing `_id` removed, used for dropdown labels.
pub fn without_id_suffix(column_name: &str) -> &str {
    column_name.strip_suffix("_id").unwrap_or(column_name)
}

/// Dart identifier for an enum value (`in progress` -> `inProgress`).
///
/// The value is split on non-word characters and the words joined in
/// lowerCamel case. Values yielding no usable identifier fall back to
/// `value<index>`.
pub fn enum_value_identifier(value: &str, index: usize) -> String {
    let joined: String = NON_WORD_REGEX
        .split(value)
        .map(capitalize_word)
        .collect();

    let mut chars = joined.chars();
    let identifier = match chars.next() {
        None => return format!("value{index}"),
        Some(first) if first.is_alphabetic() => {
            first.to_lowercase().chain(chars).collect::<String>()
        }
        Some(_) => format!("value{joined}"),
    };

    if DART_RESERVED.contains(&identifier.as_str()) {
        format!("{identifier}Value")
    } else {
        identifier
    }
}

/// Escape a value for a double-quoted Dart string literal.
pub fn dart_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}
