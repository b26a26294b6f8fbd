/// An inclusive `[start, end]` pair of character offsets into the
/// original query string.
///
/// Spans survive whitespace trimming and quote stripping so that errors
/// can point at the exact characters the user typed.
///
/// # Examples
/// ```
/// use btriev::ast::Span;
///
/// let span = Span::new(4, 7);
/// assert_eq!(span.start(), 4);
/// assert_eq!(span.end(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Offset of the first character covered by this span.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset of the last character covered by this span (inclusive).
    pub fn end(&self) -> usize {
        self.end
    }
}

/// The two lexical classes a token can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A tag name, quoted or unquoted
    ///
    /// # Examples
    /// ```text
    /// vacation photos
    /// "mixed content, \"quotes\" and all"
    /// ```
    Tag,

    /// An operator, textual or symbolic
    ///
    /// # Examples
    /// ```text
    /// and
    /// not
    /// (
    /// *
    /// ```
    Operator,
}

/// A single lexical unit of a query.
///
/// Tokens are immutable once created. The value carries the semantic
/// content (unescaped, trimmed, operators lowercased); the span carries
/// the exact location in the source query for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    span: Span,
    value: String,
    kind: TokenKind,
}

impl Token {
    pub fn new(start: usize, end: usize, value: impl Into<String>, kind: TokenKind) -> Self {
        Token {
            span: Span::new(start, end),
            value: value.into(),
            kind,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn start(&self) -> usize {
        self.span.start()
    }

    pub fn end(&self) -> usize {
        self.span.end()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }
}
