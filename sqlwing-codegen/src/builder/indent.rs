//! Indentation unit used by [`CodeBuilder`](super::CodeBuilder).

/// Number of spaces written once per nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(usize);

impl Indent {
    /// Two spaces, as `dart format` writes.
    pub const DART: Self = Self(2);

    pub fn unit(self) -> String {
        " ".repeat(self.0)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::DART
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit() {
        assert_eq!(Indent::DART.unit(), "  ");
        assert_eq!(Indent::default(), Indent::DART);
    }
}
