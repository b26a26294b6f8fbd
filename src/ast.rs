//! # btriev - Abstract Syntax Tree
//!
//! This module defines the lexical and syntactic building blocks of the
//! btriev query language, a small boolean language for retrieving
//! records tagged against a directed tag hierarchy.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens with inclusive source spans
//! - **[operators]** - The fixed operator table (placement, arity, precedence)
//! - **[nodes]** - AST nodes pairing a token with an operator and children
//!
//! ## Core Concepts
//!
//! A query combines tag names with boolean operators and two
//! hierarchy-aware operators:
//!
//! ```text
//! vacation and not ("work" or archived)
//! projects > 2024 > "q3 report"
//! projects*
//! ```
//!
//! - **`and` / `or` / `not`** - sorted-set algebra over data ids
//! - **`>` (path)** - tags reachable through a named ancestor chain
//! - **`*` (explode)** - a tag plus everything reachable from it
//! - **`( )`** - explicit grouping, binds tightest
//!
//! Binding order from loosest to tightest: `or`, `and`, `not`, `*`, `>`.

pub mod nodes;
pub mod operators;
pub mod tokens;

pub use nodes::AstNode;
pub use operators::{OpKind, Operator, Placement};
pub use tokens::{Span, Token, TokenKind};
