//! Mapping from SQL column types to generated field types.

use serde::{Deserialize, Serialize};

/// Language-agnostic type of a generated field.
///
/// Code generators map this to a concrete type (`int`, `String`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Integer,
    #[default]
    String,
    Float,
    Dynamic,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Integer => "integer",
            TargetType::String => "string",
            TargetType::Float => "float",
            TargetType::Dynamic => "dynamic",
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQL type prefixes and the type they map to, checked in order.
///
/// The first matching prefix wins. None of the prefixes is a prefix of
/// another, so the order only matters for readability.
pub const TYPE_MAP: &[(&str, TargetType)] = &[
    ("bigint", TargetType::Integer),
    ("varchar", TargetType::String),
    ("uuid", TargetType::String),
    ("text", TargetType::String),
    ("date", TargetType::String),
    ("real", TargetType::Float),
    ("double", TargetType::Float),
];

/// Map a lower-cased SQL type token to its target type.
///
/// Unknown types map to `fallback`.
pub fn map_sql_type(sql_type: &str, fallback: TargetType) -> TargetType {
    TYPE_MAP
        .iter()
        .find(|(prefix, _)| sql_type.starts_with(prefix))
        .map(|(_, target)| *target)
        .unwrap_or(fallback)
}
