//! Rule parsing, combination and evaluation
//!
//! A rule string like "(age > 30 AND department == 'sales')" is split into
//! tokens, built into a binary AND/OR tree whose leaves hold the raw
//! condition text, and evaluated against a [`Context`](crate::Context).

mod ast;
mod builder;
pub mod cache;
mod combinator;
mod condition;
mod evaluator;
pub mod parser;
mod tokenizer;


pub use ast::*;
pub use cache::*;
pub use combinator::*;
pub use condition::*;
pub use evaluator::*;
pub use tokenizer::{tokenize, Token};
