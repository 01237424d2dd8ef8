//! CSS selector parsing for sift.
//!
//! This crate turns selector text into a typed syntax tree:
//! - [`tokenizer`] implements [CSS Syntax Level 3 § 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization)
//!   with source spans, comments kept, and function arguments nested inside
//!   their function token.
//! - [`selector`] implements the [Selectors Level 4 grammar](https://www.w3.org/TR/selectors-4/#grammar),
//!   an extended legacy dialect on top of it, and the
//!   [An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax).
//!
//! # Example
//!
//! ```
//! use sift_css::{parse_selector_list, Dialect, Selector};
//!
//! let list = parse_selector_list("ul > li:nth-child(2n+1)", Dialect::Standard).unwrap();
//! assert!(matches!(list[0], Selector::Complex(_)));
//! ```

pub mod selector;
pub mod tokenizer;

pub use selector::{
    Dialect, Node, ParserOptions, Selector, SelectorError, SelectorList, SelectorParser, Visitor,
    parse_selector_list,
};
pub use tokenizer::{CSSToken, CSSTokenizer, Span, TokenKind};
