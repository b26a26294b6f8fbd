use crate::ast::{Span, Token};

/// A located query-compilation error.
///
/// Every variant carries an inclusive `[start, end]` character span
/// into the original query string, suitable for caret-style
/// diagnostics. Errors are surfaced to the caller unmodified: the
/// pipeline is deterministic and pure, so nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A syntactic fault: unmatched parens, missing operands, adjacent
    /// operands with no connecting operator.
    Syntax { message: String, span: Span },

    /// A tag name that does not exist in the supplied hierarchy.
    UnknownTag { name: String, span: Span },

    /// A `>` chain that resolves to no path in the hierarchy.
    InvalidPath { span: Span },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        ParseError::Syntax {
            message: message.into(),
            span,
        }
    }

    pub fn unknown_tag(token: &Token) -> Self {
        ParseError::UnknownTag {
            name: token.value().to_string(),
            span: token.span(),
        }
    }

    pub fn invalid_path(span: Span) -> Self {
        ParseError::InvalidPath { span }
    }

    /// The inclusive character span the error points at.
    pub fn location(&self) -> Span {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::UnknownTag { span, .. }
            | ParseError::InvalidPath { span } => *span,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Syntax { message, .. } => write!(f, "{}", message),
            ParseError::UnknownTag { name, .. } => {
                write!(f, "Tag name '{}' does not exist", name)
            }
            ParseError::InvalidPath { .. } => write!(f, "Path does not exist"),
        }
    }
}

impl std::error::Error for ParseError {}
