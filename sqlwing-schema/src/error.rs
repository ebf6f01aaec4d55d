use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Schema result; the error is boxed because spanned variants are large.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// A SQL document and its filename, attached to spanned errors.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// The full SQL text.
    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// `span` is a byte range of the declaration within the document.
    pub fn malformed_column(
        &self,
        table: impl Into<String>,
        declaration: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::MalformedColumn {
            src: self.named_source(),
            span: span.into(),
            table: table.into(),
            declaration: declaration.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed column declaration '{declaration}' in table '{table}'")]
    #[diagnostic(
        code(sqlwing::malformed_column),
        help("a column declaration needs at least a name and a type, e.g. 'title varchar not null'")
    )]
    MalformedColumn {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected '<name> <type> ...'")]
        span: SourceSpan,
        table: String,
        declaration: String,
    },
}

impl Error {
    /// Name of the table this error belongs to, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            Error::MalformedColumn { table, .. } => Some(table),
            Error::Io { .. } => None,
        }
    }
}
