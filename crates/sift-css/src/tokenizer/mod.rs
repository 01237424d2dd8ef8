//! CSS tokenizer module.
//!
//! The selector parser treats tokens as its input; this tokenizer is what
//! turns selector text into that input.

/// CSS token types per [CSS Syntax Level 3 § 4](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod token;
/// CSS tokenizer implementation.
#[allow(clippy::module_inception)]
pub mod tokenizer;

pub use token::{CSSToken, HashType, Numeric, NumericType, Span, TokenKind, TokenType};
pub use tokenizer::CSSTokenizer;
