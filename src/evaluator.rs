use crate::ast::{AstNode, OpKind};
use crate::errors::ParseError;
use crate::hierarchy::{TagHierarchy, TagId};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::store::{DataId, DataStore};

/// Evaluation context: the long-lived, read-only structures a query
/// evaluates against.
///
/// Both are immutable after construction and may be shared across
/// concurrent evaluations without locking.
pub struct EvalContext<'a> {
    hierarchy: &'a TagHierarchy,
    store: &'a DataStore,
}

impl<'a> EvalContext<'a> {
    pub fn new(hierarchy: &'a TagHierarchy, store: &'a DataStore) -> Self {
        EvalContext { hierarchy, store }
    }

    pub fn hierarchy(&self) -> &TagHierarchy {
        self.hierarchy
    }

    pub fn store(&self) -> &DataStore {
        self.store
    }
}

/// The intermediate result of evaluating one AST node.
///
/// Operators work over two different domains: the hierarchy operators
/// (`>`, `*`) produce tag ids, the boolean operators produce data ids.
/// Tag results convert to data ids lazily, in exactly one place
/// ([`EvaluationResult::data_ids`]), so tag-domain work never touches
/// the inverted index.
pub enum EvaluationResult {
    /// A sorted, deduplicated list of data ids.
    Data(Vec<DataId>),
    /// A list of tag ids, not yet resolved against the index.
    Tags(Vec<TagId>),
}

impl EvaluationResult {
    /// Resolve this result to data ids, lazily converting a tag result
    /// through the store's inverted index.
    pub fn data_ids(self, context: &EvalContext) -> Vec<DataId> {
        match self {
            EvaluationResult::Data(data_ids) => data_ids,
            EvaluationResult::Tags(tag_ids) => context.store().data_ids_for_tags(&tag_ids),
        }
    }

    /// The tag ids of a tag-domain result. A data-domain result here
    /// means the AST was not properly vetted, which is a pipeline
    /// defect rather than a user error.
    fn tag_ids(self) -> Vec<TagId> {
        match self {
            EvaluationResult::Tags(tag_ids) => tag_ids,
            EvaluationResult::Data(_) => {
                panic!("attempting to read tags from a data-based evaluation result")
            }
        }
    }
}

/// Sorted-merge union of two sorted, deduplicated ascending id lists.
pub fn union(left: &[DataId], right: &[DataId]) -> Vec<DataId> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left_ix = 0;
    let mut right_ix = 0;

    while left_ix < left.len() && right_ix < right.len() {
        if left[left_ix] < right[right_ix] {
            merged.push(left[left_ix]);
            left_ix += 1;
        } else if left[left_ix] > right[right_ix] {
            merged.push(right[right_ix]);
            right_ix += 1;
        } else {
            merged.push(left[left_ix]);
            left_ix += 1;
            right_ix += 1;
        }
    }

    merged.extend_from_slice(&left[left_ix..]);
    merged.extend_from_slice(&right[right_ix..]);
    merged
}

/// Sorted-merge intersection of two sorted, deduplicated ascending id
/// lists.
pub fn intersect(left: &[DataId], right: &[DataId]) -> Vec<DataId> {
    let mut intersection = Vec::new();
    let mut left_ix = 0;
    let mut right_ix = 0;

    while left_ix < left.len() && right_ix < right.len() {
        if left[left_ix] < right[right_ix] {
            left_ix += 1;
        } else if left[left_ix] > right[right_ix] {
            right_ix += 1;
        } else {
            intersection.push(left[left_ix]);
            left_ix += 1;
            right_ix += 1;
        }
    }

    intersection
}

/// Set difference `universe - subtrahend` over sorted, deduplicated
/// ascending id lists. An empty subtrahend yields the full universe.
pub fn negate(subtrahend: &[DataId], universe: &[DataId]) -> Vec<DataId> {
    let mut negation = Vec::new();
    let mut sub_ix = 0;
    let mut all_ix = 0;

    while all_ix < universe.len() {
        if sub_ix >= subtrahend.len() || universe[all_ix] < subtrahend[sub_ix] {
            negation.push(universe[all_ix]);
            all_ix += 1;
        } else if universe[all_ix] > subtrahend[sub_ix] {
            sub_ix += 1;
        } else {
            sub_ix += 1;
            all_ix += 1;
        }
    }

    negation
}

fn unary(children: Vec<EvaluationResult>) -> EvaluationResult {
    let mut iter = children.into_iter();
    match (iter.next(), iter.next()) {
        (Some(operand), None) => operand,
        _ => panic!("unary operator evaluated with wrong operand count"),
    }
}

fn binary(children: Vec<EvaluationResult>) -> (EvaluationResult, EvaluationResult) {
    let mut iter = children.into_iter();
    match (iter.next(), iter.next(), iter.next()) {
        (Some(left), Some(right), None) => (left, right),
        _ => panic!("binary operator evaluated with wrong operand count"),
    }
}

/// Post-order walk: evaluate children first, then dispatch on the
/// node's operator kind. A tag leaf resolves to the ids bearing its
/// name (empty for names the hierarchy does not know).
pub fn dfs_evaluate(node: &AstNode, context: &EvalContext) -> EvaluationResult {
    let Some(operator) = node.op() else {
        return EvaluationResult::Tags(context.hierarchy().get_ids(node.token().value()));
    };

    let children: Vec<EvaluationResult> = node
        .children()
        .iter()
        .map(|child| dfs_evaluate(child, context))
        .collect();

    match operator.kind() {
        OpKind::Path => {
            let segments: Vec<Vec<TagId>> =
                children.into_iter().map(EvaluationResult::tag_ids).collect();
            EvaluationResult::Tags(context.hierarchy().get_ids_for_path(&segments))
        }
        OpKind::Explode => {
            let tags = unary(children).tag_ids();
            EvaluationResult::Tags(context.hierarchy().explode(&tags))
        }
        OpKind::Not => {
            let data = unary(children).data_ids(context);
            EvaluationResult::Data(negate(&data, context.store().all_data_ids()))
        }
        OpKind::And => {
            let (left, right) = binary(children);
            EvaluationResult::Data(intersect(
                &left.data_ids(context),
                &right.data_ids(context),
            ))
        }
        OpKind::Or => {
            let (left, right) = binary(children);
            EvaluationResult::Data(union(&left.data_ids(context), &right.data_ids(context)))
        }
        OpKind::OpenParen | OpKind::CloseParen => {
            panic!("this operator should not be evaluated")
        }
    }
}

/// Compile and evaluate a query against a data store and hierarchy,
/// returning the sorted, deduplicated matching data ids.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use btriev::{evaluate, DataStore, Edge, TagHierarchy, TagRecord};
///
/// let hierarchy = TagHierarchy::from_edge_list(
///     &[Edge { from: 1, to: 2 }],
///     &[TagRecord::new(1, "tag1"), TagRecord::new(2, "tag2")],
/// );
/// let store = DataStore::from_unsorted_index(
///     HashMap::from([(1, vec![10, 11]), (2, vec![11])]),
///     None,
/// );
///
/// let ids = evaluate("tag1 and tag2", &store, &hierarchy).unwrap();
/// assert_eq!(ids, vec![11]);
/// ```
pub fn evaluate(
    query: &str,
    store: &DataStore,
    hierarchy: &TagHierarchy,
) -> Result<Vec<DataId>, ParseError> {
    let tokens = Lexer::new().tokenize(query);
    let ast = Parser::new(Some(hierarchy)).parse(tokens)?;

    match ast {
        None => Ok(Vec::new()),
        Some(root) => {
            let context = EvalContext::new(hierarchy, store);
            Ok(dfs_evaluate(&root, &context).data_ids(&context))
        }
    }
}
