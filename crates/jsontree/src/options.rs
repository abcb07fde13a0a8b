/// Configuration options for the [`Deserializer`](crate::Deserializer).
///
/// # Examples
///
/// ```rust
/// use jsontree::{DeserializerOptions, from_str_with_options};
///
/// let options = DeserializerOptions {
///     max_depth: Some(2),
///     ..Default::default()
/// };
/// assert!(from_str_with_options("[[1]]", options).is_ok());
/// assert!(from_str_with_options("[[[1]]]", options).is_err());
/// ```
///
/// # Default
///
/// JSON whitespace only, no depth limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeserializerOptions {
    /// Whether to skip any Unicode whitespace between tokens.
    ///
    /// By default, the deserializer only recognizes the four whitespace
    /// characters JSON defines: space (U+0020), line feed (U+000A), carriage
    /// return (U+000D), and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// How many arrays and objects may be open at once.
    ///
    /// Parsing recurses once per nesting level, so untrusted input should set
    /// a limit. Opening container number `limit + 1` fails with
    /// [`DeserializeError::DepthLimitExceeded`](crate::DeserializeError::DepthLimitExceeded).
    ///
    /// # Default
    ///
    /// `None`
    pub max_depth: Option<usize>,
}

impl DeserializerOptions {
    pub(crate) fn is_whitespace(self, c: char) -> bool {
        matches!(c, ' ' | '\n' | '\r' | '\t') || (self.allow_unicode_whitespace && c.is_whitespace())
    }
}

/// Output layout for the serializer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// No whitespace outside strings.
    #[default]
    Compact,
    /// One element or member per line, nested `indent` spaces per level, with
    /// a space after each `:`.
    Pretty {
        /// Spaces per nesting level.
        indent: usize,
    },
}

impl Style {
    /// Pretty output with four-space indentation.
    #[must_use]
    pub const fn pretty() -> Self {
        Style::Pretty { indent: 4 }
    }
}
