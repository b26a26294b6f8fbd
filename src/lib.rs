pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod errors;
pub mod evaluator;
pub mod hierarchy;
pub mod lexer;
pub mod parser;
pub mod store;

pub use ast::{AstNode, OpKind, Operator, Placement, Span, Token, TokenKind};
pub use errors::ParseError;
pub use evaluator::{evaluate, EvalContext, EvaluationResult};
pub use hierarchy::{Edge, TagHierarchy, TagId, TagRecord};
pub use lexer::Lexer;
pub use parser::Parser;
pub use store::{DataId, DataStore};
