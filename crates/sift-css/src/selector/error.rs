//! Selector parse errors.

use thiserror::Error;

use crate::tokenizer::CSSToken;

/// Why a selector could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The input does not fit the grammar.
    ///
    /// `start` and `end` are the 1-based inclusive character positions of the
    /// offending token.
    #[error("unexpected {token} at characters {start}-{end}")]
    Syntax {
        /// Human-readable rendering of the offending token.
        token: String,
        /// First character of the token (1-based).
        start: usize,
        /// Last character of the token (1-based, inclusive).
        end: usize,
    },

    /// Selectors nest deeper than [`ParserOptions::max_depth`](super::ParserOptions::max_depth).
    #[error("selector nesting exceeds the limit of {limit} levels")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },
}

impl SelectorError {
    /// A syntax error pointing at `token`.
    #[must_use]
    pub fn unexpected(token: &CSSToken) -> Self {
        let (start, end) = token.span.display_range();
        Self::Syntax {
            token: token.describe(),
            start,
            end,
        }
    }

    /// The 1-based inclusive character range of a syntax error.
    #[must_use]
    pub const fn range(&self) -> Option<(usize, usize)> {
        match self {
            Self::Syntax { start, end, .. } => Some((*start, *end)),
            Self::NestingTooDeep { .. } => None,
        }
    }
}

/// How a production failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Failure {
    /// The production does not apply here. The innermost enclosing
    /// [`maybe`](super::backtrack::Parser::maybe) restores the cursor and
    /// the caller tries something else.
    NoMatch,
    /// Parsing cannot continue. Passes through every `maybe`.
    Fatal(SelectorError),
}

impl From<SelectorError> for Failure {
    fn from(error: SelectorError) -> Self {
        Self::Fatal(error)
    }
}

/// Result of running a production.
pub(crate) type PResult<T> = Result<T, Failure>;
