//! Backtracking combinators over a [`TokenCursor`].
//!
//! Every production is a function `fn(&mut Parser) -> PResult<T>`. A
//! production that does not apply returns [`Failure::NoMatch`]; it may have
//! moved the cursor, and [`Parser::maybe`] is what puts it back. A
//! [`Failure::Fatal`] is never caught here.

use super::ParserOptions;
use super::ast::{Combinator, CombinatorKind};
use super::cursor::TokenCursor;
use super::error::{Failure, PResult, SelectorError};
use super::grammar::Grammar;
use crate::tokenizer::{CSSToken, TokenType};

/// A grammar production.
pub(crate) type Production<T> = fn(&mut Parser<'_>) -> PResult<T>;

/// What [`Parser::consume`] expects the next token to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Expect {
    /// A delim holding this character.
    Delim(char),
    /// An ident with this value, compared ASCII case-insensitively.
    Ident(&'static str),
    /// Any token of this type.
    Type(TokenType),
}

impl Expect {
    fn matches(self, token: &CSSToken) -> bool {
        match self {
            Self::Delim(c) => token.is_delim(c),
            Self::Ident(value) => token
                .as_ident()
                .is_some_and(|ident| ident.eq_ignore_ascii_case(value)),
            Self::Type(token_type) => token.token_type() == token_type,
        }
    }
}

/// Parser state for one token sequence: the top-level input or one function
/// argument list.
pub(crate) struct Parser<'t> {
    pub(crate) cursor: TokenCursor<'t>,
    grammar: &'static Grammar,
    options: ParserOptions,
    depth: usize,
}

impl<'t> Parser<'t> {
    pub(crate) const fn new(
        tokens: &'t [CSSToken],
        grammar: &'static Grammar,
        options: ParserOptions,
        depth: usize,
    ) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            grammar,
            options,
            depth,
        }
    }

    /// The hook table for the active dialect.
    pub(crate) const fn grammar(&self) -> &'static Grammar {
        self.grammar
    }

    /// Run `body`; if it does not match, put the cursor back and return
    /// `None`.
    pub(crate) fn maybe<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<Option<T>> {
        let checkpoint = self.cursor.checkpoint();
        match body(self) {
            Ok(value) => Ok(Some(value)),
            Err(Failure::NoMatch) => {
                #[cfg(feature = "parse-trace")]
                eprintln!(
                    "[sift parse] {:indent$}rollback {:?} -> {:?} (depth {})",
                    "",
                    self.cursor.checkpoint(),
                    checkpoint,
                    self.depth,
                    indent = self.depth * 2,
                );
                self.cursor.rollback(checkpoint);
                Ok(None)
            }
            Err(fatal) => Err(fatal),
        }
    }

    /// The first alternative that matches, each tried from the same
    /// position.
    pub(crate) fn options<T, const N: usize>(
        &mut self,
        alternatives: [Production<T>; N],
    ) -> PResult<T> {
        for alternative in alternatives {
            if let Some(value) = self.maybe(alternative)? {
                return Ok(value);
            }
        }
        Err(Failure::NoMatch)
    }

    /// `body ( ',' body )*`, with insignificant tokens allowed around each
    /// comma. Stops when no comma follows; a comma with nothing parseable
    /// after it is a non-match.
    pub(crate) fn one_or_more<T>(
        &mut self,
        mut body: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        let mut items = vec![body(self)?];
        while self
            .maybe(|p| {
                p.skip_insignificant();
                p.consume(Expect::Type(TokenType::Comma))
            })?
            .is_some()
        {
            self.skip_insignificant();
            items.push(body(self)?);
        }
        Ok(items)
    }

    /// Take the next token if it is what `expected` describes.
    pub(crate) fn consume(&mut self, expected: Expect) -> PResult<CSSToken> {
        self.consume_if(|token| expected.matches(token))
    }

    /// Take the next tokens if they are exactly `expected`, in order.
    pub(crate) fn consume_all(&mut self, expected: &[Expect]) -> PResult<Vec<CSSToken>> {
        expected.iter().map(|&e| self.consume(e)).collect()
    }

    /// Take the next token if `accept` approves of it.
    pub(crate) fn consume_if(
        &mut self,
        accept: impl FnOnce(&CSSToken) -> bool,
    ) -> PResult<CSSToken> {
        match self.cursor.next() {
            Some(token) if accept(token) => Ok(token.clone()),
            _ => Err(Failure::NoMatch),
        }
    }

    /// A combinator spelled by the delims in `symbol`, with insignificant
    /// tokens allowed on both sides.
    pub(crate) fn consume_operator(
        &mut self,
        kind: CombinatorKind,
        symbol: &[char],
    ) -> PResult<Combinator> {
        self.skip_insignificant();
        let expected: Vec<Expect> = symbol.iter().map(|&c| Expect::Delim(c)).collect();
        let tokens = self.consume_all(&expected)?;
        self.skip_insignificant();
        Ok(Combinator { kind, tokens })
    }

    /// Skip whitespace and comments.
    pub(crate) fn skip_insignificant(&mut self) {
        let _ = self.take_insignificant();
    }

    /// Take whitespace and comments, returning them.
    pub(crate) fn take_insignificant(&mut self) -> Vec<CSSToken> {
        let mut taken = Vec::new();
        while let Some(token) = self.cursor.peek().filter(|t| t.is_insignificant()) {
            taken.push(token.clone());
            let _ = self.cursor.next();
        }
        taken
    }

    /// True if only insignificant tokens (and EOF) remain. Moves past the
    /// insignificant ones.
    pub(crate) fn at_end(&mut self) -> bool {
        self.skip_insignificant();
        self.cursor.peek().is_none_or(CSSToken::is_eof)
    }

    /// Fail with a syntax error at the first leftover token, if any.
    pub(crate) fn ensure_no_more_tokens(&mut self) -> Result<(), SelectorError> {
        if self.at_end() {
            Ok(())
        } else {
            Err(SelectorError::unexpected(&self.cursor.current()))
        }
    }

    /// Go one argument nesting level deeper.
    fn enter(&mut self) -> Result<(), SelectorError> {
        if self.depth >= self.options.max_depth {
            return Err(SelectorError::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Parse `tokens` (a function's arguments) with `production`, requiring
    /// it to use all of them.
    ///
    /// A syntax failure inside is reported as `None` so the caller can try
    /// another reading; exceeding the nesting limit is not.
    pub(crate) fn sub_parse<T>(
        &self,
        tokens: &[CSSToken],
        production: Production<T>,
    ) -> Result<Option<T>, SelectorError> {
        let mut nested = Parser::new(tokens, self.grammar, self.options, self.depth);
        nested.enter()?;
        nested.skip_insignificant();
        let result = production(&mut nested).map_err(|failure| match failure {
            Failure::Fatal(error) => error,
            Failure::NoMatch => SelectorError::unexpected(&nested.cursor.culprit()),
        });
        match result.and_then(|value| nested.ensure_no_more_tokens().map(|()| value)) {
            Ok(value) => Ok(Some(value)),
            Err(error @ SelectorError::NestingTooDeep { .. }) => Err(error),
            Err(SelectorError::Syntax { .. }) => Ok(None),
        }
    }
}
