use crate::ast::operators::Operator;
use crate::ast::tokens::Token;

/// A node in the query AST.
///
/// A node without an operator is a tag leaf; in a fully validated tree
/// a leaf has no children. Child order is semantically significant
/// (left-to-right operand order).
///
/// The control depth records the parenthesis-nesting level the node was
/// built at. It only matters during parsing, where it rejects operators
/// whose operands were reduced across a paren boundary.
#[derive(Debug)]
pub struct AstNode {
    token: Token,
    operator: Option<&'static Operator>,
    children: Vec<AstNode>,
    control_depth: i32,
}

impl AstNode {
    /// Create a tag leaf.
    pub fn leaf(token: Token, control_depth: i32) -> Self {
        AstNode {
            token,
            operator: None,
            children: Vec::new(),
            control_depth,
        }
    }

    /// Create an operator node with no children attached yet.
    pub fn operator(token: Token, operator: &'static Operator, control_depth: i32) -> Self {
        AstNode {
            token,
            operator: Some(operator),
            children: Vec::new(),
            control_depth,
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn op(&self) -> Option<&'static Operator> {
        self.operator
    }

    pub fn is_leaf(&self) -> bool {
        self.operator.is_none()
    }

    pub fn children(&self) -> &[AstNode] {
        &self.children
    }

    /// Note, calls are order sensitive.
    pub fn add_child(&mut self, child: AstNode) {
        self.children.push(child);
    }

    pub fn into_children(self) -> Vec<AstNode> {
        self.children
    }

    pub fn take_children(&mut self) -> Vec<AstNode> {
        std::mem::take(&mut self.children)
    }

    pub fn set_children(&mut self, children: Vec<AstNode>) {
        self.children = children;
    }

    pub fn control_depth(&self) -> i32 {
        self.control_depth
    }

    pub fn set_control_depth(&mut self, depth: i32) {
        self.control_depth = depth;
    }

    /// The smallest and largest token offsets across this subtree,
    /// used to span diagnostics over whole expressions.
    pub fn offset_edges(&self) -> (usize, usize) {
        if self.children.is_empty() {
            return (self.token.start(), self.token.end());
        }

        let mut min = usize::MAX;
        let mut max = 0;
        for child in &self.children {
            let (child_min, child_max) = child.offset_edges();
            min = min.min(child_min);
            max = max.max(child_max);
        }

        (min, max)
    }

    /// Structural equality: same operator shape and tag values in the
    /// same order, ignoring spans and control depth. Intended for tests
    /// asserting parse shapes.
    pub fn structural_eq(&self, other: &AstNode) -> bool {
        if self.operator.map(|op| op.kind()) != other.operator.map(|op| op.kind()) {
            return false;
        }
        if self.is_leaf() && self.token.value() != other.token.value() {
            return false;
        }
        if self.children.len() != other.children.len() {
            return false;
        }
        self.children
            .iter()
            .zip(other.children.iter())
            .all(|(a, b)| a.structural_eq(b))
    }
}
