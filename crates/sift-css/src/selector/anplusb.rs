//! [CSS Syntax § 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
//!
//! "`<an+b> = odd | even | <integer> | <n-dimension> | '+'?† n | -n |
//! <ndashdigit-dimension> | '+'?† <ndashdigit-ident> | <dashndashdigit-ident> |
//! <n-dimension> <signed-integer> | '+'?† n <signed-integer> | -n <signed-integer> |
//! <ndash-dimension> <signless-integer> | '+'?† n- <signless-integer> | -n- <signless-integer> |
//! <n-dimension> ['+' | '-'] <signless-integer> | '+'?† n ['+' | '-'] <signless-integer> |
//! -n ['+' | '-'] <signless-integer>`"
//!
//! "†: When a plus sign (+) precedes an ident starting with "n", as in the
//! cases marked above, there must be no whitespace between the two tokens,
//! or else the tokens do not match the above grammar. Whitespace is valid
//! (and ignored) between any other two tokens."
//!
//! Parsing happens in two steps. The grammar below only decides which
//! tokens form the value; [`derive`] then reads `(a, b)` off the matched
//! tokens by shape.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ast::ANPlusB;
use super::backtrack::{Expect, Parser, Production};
use super::error::{Failure, PResult};
use crate::tokenizer::{CSSToken, TokenKind};

/// "`n-*`" or "`-n-*`" where `*` is one or more digits, as a unit or ident.
static DASHDIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(-?)n-([0-9]+)$").expect("valid An+B suffix pattern"));

/// The productions, in the order they are tried.
const PRODUCTIONS: [Production<Vec<CSSToken>>; 13] = [
    odd,
    even,
    integer,
    n_dimension,
    plus_n,
    dash_n,
    ndashdigit_dimension,
    ndashdigit_ident,
    dashndashdigit_ident,
    n_signed_integer,
    ndash_signless_integer,
    n_plus_signless_integer,
    n_minus_signless_integer,
];

/// Parse an isolated argument sequence as An+B.
///
/// A production only counts if nothing but whitespace follows it, so `2n+1`
/// is never taken as `2n` with `+1` left over.
pub(crate) fn an_plus_b(p: &mut Parser<'_>) -> PResult<ANPlusB> {
    for production in PRODUCTIONS {
        let matched = p.maybe(|p| {
            let values = production(p)?;
            if p.at_end() {
                Ok(values)
            } else {
                Err(Failure::NoMatch)
            }
        })?;
        if let Some(values) = matched {
            return Ok(ANPlusB::new(values));
        }
    }
    Err(Failure::NoMatch)
}

fn odd(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    Ok(vec![p.consume(Expect::Ident("odd"))?])
}

fn even(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    Ok(vec![p.consume(Expect::Ident("even"))?])
}

fn integer(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    Ok(vec![integer_token(p, None)?])
}

/// "`<n-dimension>` is a `<dimension-token>` with its type flag set to
/// 'integer', and a unit that is an ASCII case-insensitive match for 'n'"
fn n_dimension(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    Ok(vec![dimension_token(p, is_n)?])
}

fn plus_n(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    plus_then_ident(p, is_n)
}

fn dash_n(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    Ok(vec![ident_token(p, is_dash_n)?])
}

fn ndashdigit_dimension(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    Ok(vec![dimension_token(p, is_ndashdigit)?])
}

fn ndashdigit_ident(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    plus_then_ident(p, is_ndashdigit)
}

fn dashndashdigit_ident(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    Ok(vec![ident_token(p, is_dashndashdigit)?])
}

/// `2n +1`, `+n -1`, `-n +1`
fn n_signed_integer(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    let mut values = n_prefix(p)?;
    p.skip_insignificant();
    values.push(integer_token(p, Some(true))?);
    Ok(values)
}

/// `2n- 1`, `n- 1`, `-n- 1`
fn ndash_signless_integer(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    let mut values = p.options([
        |p| Ok(vec![dimension_token(p, is_ndash)?]),
        |p| plus_then_ident(p, is_ndash),
        |p| Ok(vec![ident_token(p, is_dash_ndash)?]),
    ])?;
    p.skip_insignificant();
    values.push(integer_token(p, Some(false))?);
    Ok(values)
}

/// `2n + 1`, `+n + 1`, `-n + 1`
fn n_plus_signless_integer(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    n_sign_signless_integer(p, '+')
}

/// `2n - 1`, `n - 1`, `-n - 1`
fn n_minus_signless_integer(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    n_sign_signless_integer(p, '-')
}

fn n_sign_signless_integer(p: &mut Parser<'_>, sign: char) -> PResult<Vec<CSSToken>> {
    let mut values = n_prefix(p)?;
    p.skip_insignificant();
    values.push(p.consume(Expect::Delim(sign))?);
    p.skip_insignificant();
    values.push(integer_token(p, Some(false))?);
    Ok(values)
}

/// `<n-dimension>`, `'+'? n` or `-n`.
fn n_prefix(p: &mut Parser<'_>) -> PResult<Vec<CSSToken>> {
    p.options([n_dimension, plus_n, dash_n])
}

/// An optional `+` immediately followed by an ident.
fn plus_then_ident(p: &mut Parser<'_>, accept: fn(&str) -> bool) -> PResult<Vec<CSSToken>> {
    let mut values = Vec::with_capacity(2);
    values.extend(p.maybe(|p| p.consume(Expect::Delim('+')))?);
    values.push(ident_token(p, accept)?);
    Ok(values)
}

/// An integer number token. `signed` of `Some(true)` means "`<signed-integer>`",
/// `Some(false)` means "`<signless-integer>`".
fn integer_token(p: &mut Parser<'_>, signed: Option<bool>) -> PResult<CSSToken> {
    p.consume_if(|token| match &token.kind {
        TokenKind::Number(numeric) => {
            numeric.as_integer().is_some() && signed.is_none_or(|s| numeric.signed == s)
        }
        _ => false,
    })
}

fn dimension_token(p: &mut Parser<'_>, accept: fn(&str) -> bool) -> PResult<CSSToken> {
    p.consume_if(|token| match &token.kind {
        TokenKind::Dimension { numeric, unit } => numeric.as_integer().is_some() && accept(unit),
        _ => false,
    })
}

fn ident_token(p: &mut Parser<'_>, accept: fn(&str) -> bool) -> PResult<CSSToken> {
    p.consume_if(|token| token.as_ident().is_some_and(accept))
}

fn is_n(text: &str) -> bool {
    text.eq_ignore_ascii_case("n")
}

fn is_dash_n(text: &str) -> bool {
    text.eq_ignore_ascii_case("-n")
}

fn is_ndash(text: &str) -> bool {
    text.eq_ignore_ascii_case("n-")
}

fn is_dash_ndash(text: &str) -> bool {
    text.eq_ignore_ascii_case("-n-")
}

fn is_ndashdigit(text: &str) -> bool {
    dashdigit(text).is_some_and(|(a, _)| a == 1)
}

fn is_dashndashdigit(text: &str) -> bool {
    dashdigit(text).is_some_and(|(a, _)| a == -1)
}

/// Split `n-<digits>` into `(1, digits)` and `-n-<digits>` into
/// `(-1, digits)`. `None` for anything else, including digits that overflow.
fn dashdigit(text: &str) -> Option<(i64, i64)> {
    let captures = DASHDIGIT.captures(text)?;
    let a = if captures[1].is_empty() { 1 } else { -1 };
    let digits = captures[2].parse().ok()?;
    Some((a, digits))
}

/// The shape-relevant content of one matched token.
#[derive(Debug, Clone, Copy)]
enum Atom<'a> {
    Ident(&'a str),
    Plus,
    Minus,
    Integer { value: i64, signed: bool },
    Dimension { value: i64, unit: &'a str },
}

fn atoms(values: &[CSSToken]) -> Option<Vec<Atom<'_>>> {
    values
        .iter()
        .filter(|token| !token.is_insignificant() && !token.is_eof())
        .map(|token| match &token.kind {
            TokenKind::Ident(value) => Some(Atom::Ident(value)),
            TokenKind::Delim('+') => Some(Atom::Plus),
            TokenKind::Delim('-') => Some(Atom::Minus),
            TokenKind::Number(numeric) => numeric.as_integer().map(|value| Atom::Integer {
                value,
                signed: numeric.signed,
            }),
            TokenKind::Dimension { numeric, unit } => numeric
                .as_integer()
                .map(|value| Atom::Dimension { value, unit }),
            _ => None,
        })
        .collect()
}

type Shape = fn(&[Atom<'_>]) -> Option<(i64, i64)>;

/// [§ 6.2 Parsing An+B](https://www.w3.org/TR/css-syntax-3/#anb-syntax),
/// one entry per family of productions, first match wins. A sequence no
/// entry accepts is not An+B.
static SHAPES: [Shape; 8] = [
    // odd
    |atoms| matches!(atoms, [Atom::Ident(s)] if s.eq_ignore_ascii_case("odd")).then_some((2, 1)),
    // even
    |atoms| matches!(atoms, [Atom::Ident(s)] if s.eq_ignore_ascii_case("even")).then_some((2, 0)),
    // <integer>
    |atoms| match atoms {
        [Atom::Integer { value, .. }] => Some((0, *value)),
        _ => None,
    },
    // <n-dimension> | '+'? n | -n
    |atoms| n_coefficient(atoms, "").map(|a| (a, 0)),
    // <ndashdigit-dimension> | '+'? <ndashdigit-ident> | <dashndashdigit-ident>
    |atoms| match atoms {
        [Atom::Dimension { value, unit }] => {
            dashdigit(unit).and_then(|(a, b)| (a == 1).then_some((*value, -b)))
        }
        [Atom::Plus, Atom::Ident(s)] => dashdigit(s).and_then(|(a, b)| (a == 1).then_some((a, -b))),
        [Atom::Ident(s)] => dashdigit(s).map(|(a, b)| (a, -b)),
        _ => None,
    },
    // <n-dimension> <signed-integer> | '+'? n <signed-integer> | -n <signed-integer>
    |atoms| match atoms {
        [prefix @ .., Atom::Integer { value, signed: true }] => {
            n_coefficient(prefix, "").map(|a| (a, *value))
        }
        _ => None,
    },
    // <ndash-dimension> <signless-integer> | '+'? n- <signless-integer> | -n- <signless-integer>
    |atoms| match atoms {
        [prefix @ .., Atom::Integer { value, signed: false }] => {
            n_coefficient(prefix, "-").map(|a| (a, -*value))
        }
        _ => None,
    },
    // <n-dimension> ['+' | '-'] <signless-integer> (and the n / -n spellings)
    |atoms| match atoms {
        [prefix @ .., Atom::Plus, Atom::Integer { value, signed: false }] => {
            n_coefficient(prefix, "").map(|a| (a, *value))
        }
        [prefix @ .., Atom::Minus, Atom::Integer { value, signed: false }] => {
            n_coefficient(prefix, "").map(|a| (a, -*value))
        }
        _ => None,
    },
];

/// The `a` contributed by an `n` spelling (`suffix` is `""` for `n`, `"-"`
/// for `n-`): the dimension's value, `1` for `n` or `+n`, `-1` for `-n`.
fn n_coefficient(prefix: &[Atom<'_>], suffix: &str) -> Option<i64> {
    let n = format!("n{suffix}");
    let dash_n = format!("-n{suffix}");
    match prefix {
        [Atom::Dimension { value, unit }] if unit.eq_ignore_ascii_case(&n) => Some(*value),
        [Atom::Plus, Atom::Ident(s)] | [Atom::Ident(s)] if s.eq_ignore_ascii_case(&n) => Some(1),
        [Atom::Ident(s)] if s.eq_ignore_ascii_case(&dash_n) => Some(-1),
        _ => None,
    }
}

/// Compute `(a, b)` from the tokens an An+B production matched.
pub(crate) fn derive(values: &[CSSToken]) -> Option<(i64, i64)> {
    let atoms = atoms(values)?;
    SHAPES.iter().find_map(|shape| shape(&atoms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::CSSTokenizer;

    fn derive_str(input: &str) -> Option<(i64, i64)> {
        derive(&CSSTokenizer::tokenize(input))
    }

    #[test]
    fn test_derive_keywords() {
        assert_eq!(derive_str("odd"), Some((2, 1)));
        assert_eq!(derive_str("EVEN"), Some((2, 0)));
    }

    #[test]
    fn test_derive_integers() {
        assert_eq!(derive_str("5"), Some((0, 5)));
        assert_eq!(derive_str("-5"), Some((0, -5)));
        assert_eq!(derive_str("+5"), Some((0, 5)));
    }

    #[test]
    fn test_derive_n_spellings() {
        assert_eq!(derive_str("n"), Some((1, 0)));
        assert_eq!(derive_str("+n"), Some((1, 0)));
        assert_eq!(derive_str("-n"), Some((-1, 0)));
        assert_eq!(derive_str("2n"), Some((2, 0)));
        assert_eq!(derive_str("-3N"), Some((-3, 0)));
    }

    #[test]
    fn test_derive_fused_digits() {
        assert_eq!(derive_str("n-5"), Some((1, -5)));
        assert_eq!(derive_str("+n-5"), Some((1, -5)));
        assert_eq!(derive_str("-n-5"), Some((-1, -5)));
        assert_eq!(derive_str("3n-2"), Some((3, -2)));
    }

    #[test]
    fn test_derive_separate_offsets() {
        assert_eq!(derive_str("2n+1"), Some((2, 1)));
        assert_eq!(derive_str("-n+3"), Some((-1, 3)));
        assert_eq!(derive_str("2n -1"), Some((2, -1)));
        assert_eq!(derive_str("2n- 1"), Some((2, -1)));
        assert_eq!(derive_str("2n + 1"), Some((2, 1)));
        assert_eq!(derive_str("n - 4"), Some((1, -4)));
    }

    #[test]
    fn test_derive_rejects_other_shapes() {
        assert_eq!(derive_str("foo"), None);
        assert_eq!(derive_str("2.5n"), None);
        assert_eq!(derive_str("2n 1"), None);
        assert_eq!(derive_str("+-n-1"), None);
    }

    #[test]
    fn test_derive_is_pure() {
        let tokens = CSSTokenizer::tokenize("-2n+7");
        assert_eq!(derive(&tokens), derive(&tokens));
        assert_eq!(derive(&tokens), Some((-2, 7)));
    }

    #[test]
    fn test_dashdigit() {
        assert_eq!(dashdigit("n-12"), Some((1, 12)));
        assert_eq!(dashdigit("-N-3"), Some((-1, 3)));
        assert_eq!(dashdigit("n-"), None);
        assert_eq!(dashdigit("n-99999999999999999999"), None);
    }
}
