//! Generation settings.

use serde::Deserialize;
use sqlwing_schema::TargetType;

/// Settings read from the `[generate]` table of `sqlwing.toml`.
///
/// Every field is optional; a missing table yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Dart package name used in `package:` imports.
    ///
    /// Defaults to the project directory name.
    pub project_name: Option<String>,
    /// Emit a `debugPrint` of the first fetched row in every provider.
    pub debug_print: bool,
    /// Write each provider's select query to its own file.
    pub separate_query_file: bool,
    /// Type used for SQL types missing from the type map.
    pub fallback_type: TargetType,
}
