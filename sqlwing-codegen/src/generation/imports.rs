//! Import collection utilities.

use indexmap::IndexSet;

/// Tracks import URIs and deduplicates them.
///
/// Keeps the first occurrence of each URI, in insertion order, so the
/// rendered import block is deterministic.
///
/// # Example
///
/// ```
/// use sqlwing_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add_package("my_app", "providers/categories_provider.dart");
/// imports.add("package:flutter/material.dart");
/// imports.add_package("my_app", "providers/categories_provider.dart");
///
/// assert_eq!(
///     imports.render(),
///     "import 'package:my_app/providers/categories_provider.dart';\n\
///      import 'package:flutter/material.dart';\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    uris: IndexSet<String>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import URI. Returns `false` if it was already present.
    pub fn add(&mut self, uri: impl Into<String>) -> bool {
        self.uris.insert(uri.into())
    }

    /// Add a `package:<package>/<path>` import.
    pub fn add_package(&mut self, package: &str, path: &str) -> bool {
        self.add(format!("package:{package}/{path}"))
    }

    /// Iterate over all URIs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.uris.iter().map(String::as_str)
    }

    /// Render one `import '<uri>';` line per URI.
    pub fn render(&self) -> String {
        self.iter().map(|uri| format!("import '{uri}';\n")).collect()
    }
}
