//! Dart type mapper implementation.

use sqlwing_codegen::TypeMapper;
use sqlwing_schema::{Column, TargetType};

/// Dart type mapper implementation.
pub struct DartTypeMapper;

impl DartTypeMapper {
    /// Field type of a column, nullable unless declared `NOT NULL`.
    pub fn column_type(&self, column: &Column) -> String {
        if column.is_not_null {
            self.map_type(column.target_type).to_string()
        } else {
            self.map_nullable_type(column.target_type)
        }
    }
}

impl TypeMapper for DartTypeMapper {
    fn language(&self) -> &'static str {
        "dart"
    }

    fn map_type(&self, target: TargetType) -> &'static str {
        match target {
            TargetType::Integer => "int",
            TargetType::String => "String",
            TargetType::Float => "double",
            TargetType::Dynamic => "dynamic",
        }
    }

    fn map_nullable_type(&self, target: TargetType) -> String {
        match target {
            // dynamic already admits null
            TargetType::Dynamic => "dynamic".to_string(),
            _ => format!("{}?", self.map_type(target)),
        }
    }
}
