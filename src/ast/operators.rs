/// Where an operator sits relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Between two operands (`and`, `or`, `>`)
    Infix,
    /// Before its single operand (`not`, `(`)
    Prefix,
    /// After its single operand (`*`, `)`)
    Suffix,
}

/// The evaluation behavior an operator stands for.
///
/// The parenthesis kinds are structural sentinels: they direct parsing
/// but never survive into a finished AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// Grouping sentinel `(`
    OpenParen,
    /// Grouping sentinel `)`
    CloseParen,
    /// Path operator (`>`) - tags reachable through a named ancestor chain
    Path,
    /// Explode operator (`*`) - a tag plus everything reachable from it
    Explode,
    /// Set negation against the universe (`not`)
    Not,
    /// Sorted-set intersection (`and`)
    And,
    /// Sorted-set union (`or`)
    Or,
}

/// A descriptor in the fixed operator table.
///
/// The table is data-only: evaluation behavior lives in a single
/// dispatch over [`OpKind`] in the evaluator, not in the table itself.
#[derive(Debug, PartialEq, Eq)]
pub struct Operator {
    kind: OpKind,
    placement: Placement,
    /// None for the variadic parenthesis sentinels, which never appear
    /// in arity checks.
    arity: Option<usize>,
    precedence: u8,
    display_name: &'static str,
}

impl Operator {
    const fn new(
        kind: OpKind,
        placement: Placement,
        arity: Option<usize>,
        precedence: u8,
        display_name: &'static str,
    ) -> Self {
        Operator {
            kind,
            placement,
            arity,
            precedence,
            display_name,
        }
    }

    pub fn kind(&self) -> OpKind {
        self.kind
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn precedence(&self) -> u8 {
        self.precedence
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Look up the descriptor for a canonical (lowercased) operator
    /// symbol as emitted by the lexer.
    pub fn lookup(symbol: &str) -> Option<&'static Operator> {
        match symbol {
            "(" => Some(&OPEN_PAREN),
            ")" => Some(&CLOSE_PAREN),
            ">" => Some(&PATH),
            "*" => Some(&EXPLODE),
            "not" => Some(&NOT),
            "and" => Some(&AND),
            "or" => Some(&OR),
            _ => None,
        }
    }
}

// The quote "operator" is omitted - it is only meaningful during lexing.
// Parens sit at the top so explicit grouping always binds tightest.
pub static OPEN_PAREN: Operator =
    Operator::new(OpKind::OpenParen, Placement::Prefix, None, 6, "open parenthesis");
pub static CLOSE_PAREN: Operator =
    Operator::new(OpKind::CloseParen, Placement::Suffix, None, 6, "close parenthesis");
pub static PATH: Operator =
    Operator::new(OpKind::Path, Placement::Infix, Some(2), 5, "path operator");
pub static EXPLODE: Operator =
    Operator::new(OpKind::Explode, Placement::Suffix, Some(1), 4, "explode operator");
pub static NOT: Operator = Operator::new(OpKind::Not, Placement::Prefix, Some(1), 3, "NOT");
pub static AND: Operator = Operator::new(OpKind::And, Placement::Infix, Some(2), 2, "AND");
pub static OR: Operator = Operator::new(OpKind::Or, Placement::Infix, Some(2), 1, "OR");
