//! CSS Selector parsing.
//!
//! [§ 3 Selector Syntax and Structure](https://www.w3.org/TR/selectors-4/#syntax)
//!
//! "A selector represents a particular pattern of element(s) in a tree
//! structure."
//!
//! The parser is a backtracking recursive descent over [`CSSToken`]s. It
//! produces a [`SelectorList`] of [`Selector`]s and never evaluates them;
//! turning the tree into a document query is the caller's job (see
//! [`Visitor`]).
//!
//! Two dialects share one grammar:
//! - [`Dialect::Standard`]: Selectors Level 4.
//! - [`Dialect::Extended`]: adds `//` and `/` combinators, the `!=` matcher,
//!   `@attr` and `text()` in type position, and `[@attr]`, `[2]` and
//!   `[text()]` attribute shorthands.
//!
//! Functional pseudo-class arguments are parsed again in isolation: first as
//! An+B (`:nth-child(2n+1)`), then as a selector list (`:not(.a, .b)`), and
//! failing both they are kept as tokens.

pub mod ast;
mod anplusb;
mod backtrack;
mod cursor;
mod error;
mod extended;
mod grammar;
pub mod visitor;

pub use ast::*;
pub use error::SelectorError;
pub use visitor::{Node, Visitor};

use backtrack::Parser;
use error::Failure;
use grammar::Grammar;

use crate::tokenizer::{CSSToken, CSSTokenizer};

/// Which selector grammar to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Selectors Level 4.
    #[default]
    Standard,
    /// Selectors Level 4 plus legacy path-style syntax.
    Extended,
}

impl Dialect {
    fn grammar(self) -> &'static Grammar {
        match self {
            Self::Standard => &grammar::STANDARD,
            Self::Extended => &extended::EXTENDED,
        }
    }
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Grammar to accept.
    pub dialect: Dialect,
    /// How deeply functional pseudo-class arguments may nest, e.g.
    /// `:not(:is(:not(a)))` is three levels. Input nested deeper fails with
    /// [`SelectorError::NestingTooDeep`].
    pub max_depth: usize,
}

impl ParserOptions {
    /// Default nesting limit. Each level costs a few kilobytes of stack in
    /// an unoptimized build, so this stays well inside a 2 MiB thread stack.
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Options for `dialect` with the default nesting limit.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new(Dialect::Standard)
    }
}

/// Parses selector lists.
///
/// # Example
///
/// ```
/// use sift_css::selector::{Dialect, ParserOptions, SelectorParser};
///
/// let parser = SelectorParser::new(ParserOptions::new(Dialect::Standard));
/// let list = parser.parse("div > a, .nav li").unwrap();
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorParser {
    options: ParserOptions,
}

impl SelectorParser {
    /// Create a parser.
    #[must_use]
    pub const fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// The parser's configuration.
    #[must_use]
    pub const fn options(&self) -> ParserOptions {
        self.options
    }

    /// Tokenize and parse `input`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::Syntax`] if `input` is not a selector list in
    /// the configured dialect, and [`SelectorError::NestingTooDeep`] if it
    /// nests functional pseudo-classes deeper than allowed.
    pub fn parse(&self, input: &str) -> Result<SelectorList, SelectorError> {
        self.parse_tokens(&CSSTokenizer::tokenize(input))
    }

    /// Parse an already tokenized selector list.
    ///
    /// # Errors
    ///
    /// As [`SelectorParser::parse`].
    pub fn parse_tokens(&self, tokens: &[CSSToken]) -> Result<SelectorList, SelectorError> {
        let mut parser = Parser::new(tokens, self.options.dialect.grammar(), self.options, 0);
        parser.skip_insignificant();
        match grammar::selector_list(&mut parser) {
            Ok(list) => {
                parser.ensure_no_more_tokens()?;
                Ok(list)
            }
            Err(Failure::NoMatch) => Err(SelectorError::unexpected(&parser.cursor.culprit())),
            Err(Failure::Fatal(error)) => Err(error),
        }
    }
}

/// Parse `input` as a selector list in `dialect` with default options.
///
/// # Errors
///
/// As [`SelectorParser::parse`].
pub fn parse_selector_list(input: &str, dialect: Dialect) -> Result<SelectorList, SelectorError> {
    SelectorParser::new(ParserOptions::new(dialect)).parse(input)
}
