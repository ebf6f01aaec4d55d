//! Identifier case conversion.

use serde::Serialize;

/// An identifier together with the forms derived from it.
///
/// SQL identifiers are usually snake_case; generated Dart code needs the
/// lowerCamel and UpperCamel forms of the same name.
///
/// ```
/// use sqlwing_core::NameVariant;
///
/// let name = NameVariant::new("due_date");
/// assert_eq!(name.original, "due_date");
/// assert_eq!(name.camel, "dueDate");
/// assert_eq!(name.capitalized, "DueDate");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NameVariant {
    /// The identifier as written in the source.
    pub original: String,
    /// Medially capitalized form (`due_date` -> `dueDate`).
    pub camel: String,
    /// Camel form with its first character upper-cased (`DueDate`).
    pub capitalized: String,
}

impl NameVariant {
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        let camel = to_camel_case(&original);
        let capitalized = capitalize_first(&camel);
        Self {
            original,
            camel,
            capitalized,
        }
    }

    /// The empty name, used for "no related table".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl From<&str> for NameVariant {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for NameVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.original)
    }
}

/// Convert a snake_case identifier to camelCase (e.g., "due_date" -> "dueDate").
///
/// The first segment is kept as-is. Every later segment gets its first
/// character upper-cased and the rest left untouched, so `user_ID` becomes
/// `userID`. An identifier without `_` is returned unchanged.
pub fn to_camel_case(s: &str) -> String {
    let mut parts = s.split('_');
    let mut result = parts.next().unwrap_or_default().to_string();
    for part in parts {
        result.push_str(&capitalize_first(part));
    }
    result
}

/// Upper-case the first character, leaving the rest unchanged.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a snake_case identifier to space separated title words
/// (e.g., "due_date" -> "Due Date"), used for UI labels.
pub fn to_title_words(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
