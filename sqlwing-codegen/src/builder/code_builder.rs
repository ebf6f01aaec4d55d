//! Line-oriented source builder for generated Dart files.

use std::iter;

use super::Indent;

/// Accumulates generated source one line at a time at a tracked depth.
///
/// Chaining methods take and return `self`, so a whole file reads as one
/// expression. The `push_*` variants borrow mutably for use inside loops.
///
/// ```
/// use sqlwing_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::dart()
///     .block_with_close("class Item {", "}", |b| {
///         b.line("final int id;").blank().line("const Item(this.id);")
///     })
///     .build();
///
/// assert_eq!(code, "class Item {\n  final int id;\n\n  const Item(this.id);\n}\n");
/// ```
///
/// ```
/// use sqlwing_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::dart();
/// for field in ["id", "name"] {
///     builder.push_line(&format!("final String {field};"));
/// }
/// assert_eq!(builder.build(), "final String id;\nfinal String name;\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    out: String,
    depth: usize,
    unit: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            unit: indent.unit(),
        }
    }

    /// Builder with two-space indentation.
    pub fn dart() -> Self {
        Self::new(Indent::DART)
    }

    /// Append `text` as one line at the current depth.
    ///
    /// Empty text produces an empty line without trailing whitespace.
    pub fn push_line(&mut self, text: &str) -> &mut Self {
        if !text.is_empty() {
            self.out
                .extend(iter::repeat_n(self.unit.as_str(), self.depth));
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    /// Append each line of a multi-line template, re-indented to the
    /// current depth. Relative indentation inside `text` is kept.
    pub fn push_lines(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.push_line(line);
        }
        self
    }

    pub fn line(mut self, text: &str) -> Self {
        self.push_line(text);
        self
    }

    pub fn blank(mut self) -> Self {
        self.out.push('\n');
        self
    }

    pub fn lines(mut self, text: &str) -> Self {
        self.push_lines(text);
        self
    }

    pub fn indent(mut self) -> Self {
        self.depth += 1;
        self
    }

    /// One level out; never below zero.
    pub fn dedent(mut self) -> Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// `open`, then the body one level deeper, then `close`.
    pub fn block_with_close<F>(self, open: &str, close: &str, body: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        body(self.line(open).indent()).dedent().line(close)
    }

    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    pub fn each<T, I, F>(self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        items.into_iter().fold(self, f)
    }

    pub fn build(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_blocks() {
        let code = CodeBuilder::dart()
            .block_with_close("class Foo {", "}", |b| {
                b.block_with_close("void bar() {", "}", |b| b.line("return;"))
            })
            .build();

        assert_eq!(code, "class Foo {\n  void bar() {\n    return;\n  }\n}\n");
    }

    #[test]
    fn test_empty_line_has_no_indent() {
        let code = CodeBuilder::dart()
            .indent()
            .line("a")
            .line("")
            .blank()
            .line("b")
            .build();
        assert_eq!(code, "  a\n\n\n  b\n");
    }

    #[test]
    fn test_lines_keep_relative_indent() {
        let code = CodeBuilder::dart()
            .indent()
            .lines("foo(\n  bar,\n);")
            .build();
        assert_eq!(code, "  foo(\n    bar,\n  );\n");
    }

    #[test]
    fn test_dedent_stops_at_zero() {
        let code = CodeBuilder::new(Indent::DART)
            .dedent()
            .line("a")
            .indent()
            .line("b")
            .build();
        assert_eq!(code, "a\n  b\n");
    }

    #[test]
    fn test_when_and_each() {
        let code = CodeBuilder::dart()
            .when(false, |b| b.line("import 'package:flutter/widgets.dart';"))
            .block_with_close("const colors = [", "];", |b| {
                b.each(["red", "green"], |b, color| b.line(&format!("'{color}',")))
            })
            .build();

        assert_eq!(code, "const colors = [\n  'red',\n  'green',\n];\n");
    }
}
