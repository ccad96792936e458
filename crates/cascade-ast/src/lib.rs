// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Cascade language.
//!
//! This crate defines the tokens and AST nodes shared between the lexer,
//! parser, and interpreter. Type expressions here are syntactic: their meta
//! entries are plain expressions resolved at evaluation time.

pub mod span;
pub mod token;
pub mod expr;
pub mod stmt;

pub use span::{LineMap, Span};
