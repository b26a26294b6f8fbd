use crate::ast::{AstNode, OpKind, Operator, Placement, Span, Token, TokenKind};
use crate::errors::ParseError;
use crate::hierarchy::TagHierarchy;

/// The btriev query parser.
///
/// A two-stack precedence parser: operands accumulate on an expression
/// stack while operators wait on an operator stack until something of
/// lower precedence (or a close paren, or the end of input) forces a
/// reduction. A control-depth counter tracks paren nesting so that
/// reductions crossing a paren boundary are rejected.
///
/// When a [`TagHierarchy`] is supplied, tag names and `>` chains are
/// validated against it during parsing; without one, parsing is
/// syntax-only.
pub struct Parser<'a> {
    hierarchy: Option<&'a TagHierarchy>,
}

fn is_open_paren(node: &AstNode) -> bool {
    node.op().map(|op| op.kind()) == Some(OpKind::OpenParen)
}

impl<'a> Parser<'a> {
    pub fn new(hierarchy: Option<&'a TagHierarchy>) -> Self {
        Parser { hierarchy }
    }

    /// Parse a token sequence into an AST.
    ///
    /// Returns `Ok(None)` for an empty token list (an empty query is
    /// not an error). On success the returned tree has passed operand
    /// validation and path flattening and is ready for evaluation.
    pub fn parse(&self, tokens: Vec<Token>) -> Result<Option<AstNode>, ParseError> {
        let mut expressions: Vec<AstNode> = Vec::new();
        let mut operators: Vec<AstNode> = Vec::new();
        let mut control_depth: i32 = 0;
        let mut last_was_expression = false;

        for token in tokens {
            match token.kind() {
                TokenKind::Tag => {
                    if last_was_expression {
                        return Err(ParseError::syntax(
                            "Expected an operator before tag",
                            token.span(),
                        ));
                    }
                    if let Some(hierarchy) = self.hierarchy {
                        if !hierarchy.contains_tag(token.value()) {
                            return Err(ParseError::unknown_tag(&token));
                        }
                    }
                    expressions.push(AstNode::leaf(token, control_depth));
                    last_was_expression = true;
                }
                TokenKind::Operator => {
                    // The lexer only emits symbols from the operator
                    // table; anything else is a pipeline defect.
                    let operator = Operator::lookup(token.value()).unwrap_or_else(|| {
                        panic!("unknown operator symbol '{}'", token.value())
                    });

                    match operator.kind() {
                        OpKind::OpenParen => {
                            operators.push(AstNode::operator(token, operator, control_depth));
                            control_depth += 1;
                            last_was_expression = false;
                        }
                        OpKind::CloseParen => {
                            loop {
                                match operators.pop() {
                                    None => {
                                        return Err(ParseError::syntax(
                                            "Unmatched close parenthesis",
                                            token.span(),
                                        ));
                                    }
                                    Some(node) if is_open_paren(&node) => break,
                                    Some(node) => self.attach(node, &mut expressions)?,
                                }
                            }
                            control_depth -= 1;
                            // A parenthesized group belongs to its
                            // enclosing depth.
                            if let Some(top) = expressions.last_mut() {
                                top.set_control_depth(control_depth);
                            }
                            last_was_expression = true;
                        }
                        _ => {
                            // Strictly-greater only: equal precedence
                            // does not reduce, so equal-precedence
                            // operators nest to the right.
                            while operators.last().is_some_and(|prior| {
                                prior.op().is_some_and(|prior_op| {
                                    prior_op.kind() != OpKind::OpenParen
                                        && prior_op.precedence() > operator.precedence()
                                })
                            }) {
                                if let Some(prior) = operators.pop() {
                                    self.attach(prior, &mut expressions)?;
                                }
                            }
                            operators.push(AstNode::operator(token, operator, control_depth));
                            last_was_expression = false;
                        }
                    }
                }
            }
        }

        while let Some(node) = operators.pop() {
            if is_open_paren(&node) {
                return Err(ParseError::syntax(
                    "Unmatched open parenthesis",
                    node.token().span(),
                ));
            }
            self.attach(node, &mut expressions)?;
        }

        if expressions.len() > 1 {
            // Two operands abutted with no operator between them. Span
            // the gap between the neighboring expressions.
            let (_, lhs_end) = expressions[0].offset_edges();
            let (rhs_start, _) = expressions[1].offset_edges();
            return Err(ParseError::syntax(
                "Expected an operator between expressions",
                Span::new(lhs_end, rhs_start),
            ));
        }

        match expressions.pop() {
            None => Ok(None),
            Some(root) => {
                self.validate_operands(&root)?;
                Ok(Some(self.restructure(root)?))
            }
        }
    }

    /// Reduce an operator node: pop its operands off the expression
    /// stack and push the combined expression back.
    fn attach(&self, mut node: AstNode, expressions: &mut Vec<AstNode>) -> Result<(), ParseError> {
        let Some(operator) = node.op() else {
            panic!("only operator nodes are reduced");
        };
        let depth = node.control_depth();

        match operator.placement() {
            Placement::Infix => {
                let rhs = expressions.pop();
                let lhs = expressions.pop();
                let (Some(lhs), Some(rhs)) = (lhs, rhs) else {
                    return Err(self.operand_error(&node));
                };
                if lhs.control_depth() != depth || rhs.control_depth() != depth {
                    return Err(self.operand_error(&node));
                }
                node.add_child(lhs);
                node.add_child(rhs);
            }
            Placement::Prefix | Placement::Suffix => {
                let Some(operand) = expressions.pop() else {
                    return Err(self.operand_error(&node));
                };
                if operand.control_depth() != depth {
                    return Err(self.operand_error(&node));
                }
                node.add_child(operand);
            }
        }

        expressions.push(node);
        Ok(())
    }

    fn operand_error(&self, node: &AstNode) -> ParseError {
        let Some(operator) = node.op() else {
            panic!("only operator nodes are reduced");
        };
        let message = match operator.placement() {
            Placement::Infix => format!(
                "Operator {} requires left and right expressions to operate on",
                operator.display_name()
            ),
            Placement::Prefix => format!(
                "Operator {} requires an expression to the right to operate on",
                operator.display_name()
            ),
            Placement::Suffix => format!(
                "Operator {} requires an expression to the left to operate on",
                operator.display_name()
            ),
        };
        ParseError::syntax(message, node.token().span())
    }

    /// Recursive operand-type validation, run on the tree as parsed
    /// (before path flattening, while every operator still has its
    /// fixed arity).
    fn validate_operands(&self, node: &AstNode) -> Result<(), ParseError> {
        match node.op() {
            None => {
                // A tag leaf bearing children is a pipeline defect, not
                // a user error.
                assert!(
                    node.children().is_empty(),
                    "tag leaf '{}' unexpectedly bears children",
                    node.token().value()
                );
            }
            Some(operator) => {
                if let Some(arity) = operator.arity() {
                    assert_eq!(
                        node.children().len(),
                        arity,
                        "operator {} built with wrong operand count",
                        operator.display_name()
                    );
                }
                if matches!(operator.kind(), OpKind::Path | OpKind::Explode) {
                    for child in node.children() {
                        let child_is_tag_like = child.is_leaf()
                            || matches!(
                                child.op().map(|op| op.kind()),
                                Some(OpKind::Path | OpKind::Explode)
                            );
                        if !child_is_tag_like {
                            return Err(ParseError::syntax(
                                format!("{} expects only tag operands", operator.display_name()),
                                child.token().span(),
                            ));
                        }
                    }
                }
                for child in node.children() {
                    self.validate_operands(child)?;
                }
            }
        }
        Ok(())
    }

    /// Collapse right-nested `>` chains into single variadic path
    /// nodes, validating flattened name sequences against the
    /// hierarchy where one is supplied.
    fn restructure(&self, mut node: AstNode) -> Result<AstNode, ParseError> {
        if node.op().map(|op| op.kind()) == Some(OpKind::Path) {
            let span = node.token().span();
            let mut flattened = Vec::new();
            for child in node.take_children() {
                self.flatten_path_chain(child, &mut flattened)?;
            }

            // Name validation only applies when the whole chain is
            // literal tag names; segments produced by nested `*` are
            // resolved at evaluation time.
            if let Some(hierarchy) = self.hierarchy {
                if flattened.iter().all(|child| child.is_leaf()) {
                    let names: Vec<&str> =
                        flattened.iter().map(|child| child.token().value()).collect();
                    if !hierarchy.path_exists(&names) {
                        return Err(ParseError::invalid_path(span));
                    }
                }
            }

            node.set_children(flattened);
            Ok(node)
        } else {
            let mut rebuilt = Vec::with_capacity(node.children().len());
            for child in node.take_children() {
                rebuilt.push(self.restructure(child)?);
            }
            node.set_children(rebuilt);
            Ok(node)
        }
    }

    fn flatten_path_chain(
        &self,
        child: AstNode,
        out: &mut Vec<AstNode>,
    ) -> Result<(), ParseError> {
        if child.op().map(|op| op.kind()) == Some(OpKind::Path) {
            for grandchild in child.into_children() {
                self.flatten_path_chain(grandchild, out)?;
            }
        } else {
            out.push(self.restructure(child)?);
        }
        Ok(())
    }
}
