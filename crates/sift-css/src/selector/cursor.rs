//! Position-tracked cursor over a token slice.

use crate::tokenizer::{CSSToken, Span, TokenKind};

/// A saved cursor position, restored with [`TokenCursor::rollback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint(usize);

/// Walks a token slice front to back, with rewind.
///
/// Also remembers the furthest index ever handed out by [`next`](Self::next),
/// which is where a failed parse reports its error: after backtracking the
/// cursor is back at the start, but the furthest token is where the input
/// stopped making sense.
#[derive(Debug)]
pub(crate) struct TokenCursor<'t> {
    tokens: &'t [CSSToken],
    position: usize,
    furthest: Option<usize>,
}

impl<'t> TokenCursor<'t> {
    pub(crate) const fn new(tokens: &'t [CSSToken]) -> Self {
        Self {
            tokens,
            position: 0,
            furthest: None,
        }
    }

    /// Take the token under the cursor. `None` once past the end.
    pub(crate) fn next(&mut self) -> Option<&'t CSSToken> {
        let token = self.tokens.get(self.position)?;
        self.furthest = Some(self.furthest.map_or(self.position, |f| f.max(self.position)));
        self.position += 1;
        Some(token)
    }

    /// Look at the token under the cursor without taking it.
    pub(crate) fn peek(&self) -> Option<&'t CSSToken> {
        self.tokens.get(self.position)
    }

    pub(crate) const fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    pub(crate) const fn rollback(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0;
    }

    /// The token to blame for a failed parse: the furthest one examined, or
    /// the token under the cursor if nothing was examined.
    ///
    /// Falls back to a synthetic end-of-input token just past the last token
    /// when the slice has run out (argument slices carry no EOF).
    pub(crate) fn culprit(&self) -> CSSToken {
        let index = self.furthest.unwrap_or(self.position).max(self.position);
        self.token_or_end(index)
    }

    /// The token under the cursor, or end of input.
    pub(crate) fn current(&self) -> CSSToken {
        self.token_or_end(self.position)
    }

    fn token_or_end(&self, index: usize) -> CSSToken {
        if let Some(token) = self.tokens.get(index) {
            return token.clone();
        }
        let end = self.tokens.last().map_or(0, |t| t.span.end);
        CSSToken::new(TokenKind::EOF, Span::new(end, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::CSSTokenizer;

    #[test]
    fn test_rollback_restores_position() {
        let tokens = CSSTokenizer::tokenize("a b");
        let mut cursor = TokenCursor::new(&tokens);
        let checkpoint = cursor.checkpoint();
        let _ = cursor.next();
        let _ = cursor.next();
        assert_eq!(cursor.checkpoint(), Checkpoint(2));
        cursor.rollback(checkpoint);
        assert_eq!(cursor.checkpoint(), Checkpoint(0));
        assert_eq!(cursor.peek().and_then(CSSToken::as_ident), Some("a"));
    }

    #[test]
    fn test_culprit_is_furthest_examined() {
        let tokens = CSSTokenizer::tokenize("a b");
        let mut cursor = TokenCursor::new(&tokens);
        let checkpoint = cursor.checkpoint();
        let _ = cursor.next();
        let _ = cursor.next();
        let _ = cursor.next();
        cursor.rollback(checkpoint);
        assert_eq!(cursor.culprit().as_ident(), Some("b"));
    }

    #[test]
    fn test_culprit_past_end_is_end_of_input() {
        let tokens = CSSTokenizer::tokenize("ab");
        let arguments = &tokens[..1];
        let mut cursor = TokenCursor::new(arguments);
        let _ = cursor.next();
        let culprit = cursor.culprit();
        assert!(culprit.is_eof());
        assert_eq!(culprit.span, Span::new(2, 2));
    }
}
