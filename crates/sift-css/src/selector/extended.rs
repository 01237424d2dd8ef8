//! The extended dialect: standard selectors plus legacy path-style syntax.
//!
//! | Input          | Reads as                                   |
//! |----------------|--------------------------------------------|
//! | `a // b`       | descendant combinator                      |
//! | `a / b`        | child combinator                           |
//! | `[x != "y"]`   | not-equal attribute matcher                |
//! | `@href`        | attribute in type-selector position        |
//! | `text()`       | structural function in type position       |
//! | `[@href]`      | attribute shorthand                        |
//! | `[2]`          | positional index (unsigned integer)        |
//! | `[text()]`     | structural function as attribute subject   |
//!
//! Each hook tries its legacy forms and then falls back to the standard
//! production (or, for attribute selectors, tries the standard production
//! first).

use super::ast::{
    AttrMatcher, AttributeName, AttributeSelector, Combinator, CombinatorKind, MatcherKind,
    TypeSelector, XPathFunction,
};
use super::backtrack::{Expect, Parser};
use super::error::PResult;
use super::grammar::{self, Grammar};
use crate::tokenizer::{CSSToken, TokenKind, TokenType};

/// Functions accepted in type-selector position.
const STRUCTURAL_FUNCTIONS: [&str; 3] = ["text", "comment", "self"];

/// Selectors Level 4 with the legacy overlay.
pub(crate) static EXTENDED: Grammar = Grammar {
    combinator,
    attr_matcher,
    type_selector,
    attribute_selector,
};

fn combinator(p: &mut Parser<'_>) -> PResult<Combinator> {
    p.options([
        |p| p.consume_operator(CombinatorKind::Descendant, &['/', '/']),
        |p| p.consume_operator(CombinatorKind::Child, &['/']),
        grammar::combinator,
    ])
}

fn attr_matcher(p: &mut Parser<'_>) -> PResult<AttrMatcher> {
    p.options([
        |p| grammar::matcher(p, MatcherKind::NotEqual),
        grammar::attr_matcher,
    ])
}

fn type_selector(p: &mut Parser<'_>) -> PResult<TypeSelector> {
    p.options([
        |p| {
            p.consume(Expect::Type(TokenType::AtKeyword))
                .map(TypeSelector::AtKeyword)
        },
        |p| {
            let value = p.consume_if(|token| {
                token
                    .function_name()
                    .is_some_and(|name| STRUCTURAL_FUNCTIONS.contains(&name))
            })?;
            Ok(TypeSelector::XPath(XPathFunction { value }))
        },
        grammar::type_selector,
    ])
}

fn attribute_selector(p: &mut Parser<'_>) -> PResult<AttributeSelector> {
    p.options([
        grammar::attribute_selector,
        |p| {
            let name = bracketed_subject(p, |t| t.token_type() == TokenType::AtKeyword)?;
            let matcher = grammar::attribute_tail(p)?;
            Ok(AttributeSelector {
                name: AttributeName::AtKeyword(name),
                matcher,
            })
        },
        |p| {
            let index = bracketed_subject(p, is_position)?;
            let _ = p.consume(Expect::Type(TokenType::RightBracket))?;
            Ok(AttributeSelector {
                name: AttributeName::Position(index),
                matcher: None,
            })
        },
        |p| {
            let value = bracketed_subject(p, |t| t.function_name().is_some())?;
            let matcher = grammar::attribute_tail(p)?;
            Ok(AttributeSelector {
                name: AttributeName::XPath(XPathFunction { value }),
                matcher,
            })
        },
    ])
}

/// `[` followed by one token `subject` accepts, with whitespace allowed
/// around it.
fn bracketed_subject(p: &mut Parser<'_>, subject: fn(&CSSToken) -> bool) -> PResult<CSSToken> {
    let _ = p.consume(Expect::Type(TokenType::LeftBracket))?;
    p.skip_insignificant();
    let token = p.consume_if(subject)?;
    p.skip_insignificant();
    Ok(token)
}

/// A positional index: an integer written without a sign.
fn is_position(token: &CSSToken) -> bool {
    match &token.kind {
        TokenKind::Number(numeric) => numeric.as_integer().is_some() && !numeric.signed,
        _ => false,
    }
}
