//! CSS Token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! "The output of the tokenization step is a stream of zero or more of the
//! following tokens: `<ident-token>`, `<function-token>`, `<at-keyword-token>`,
//! `<hash-token>`, `<string-token>`, `<bad-string-token>`, `<url-token>`,
//! `<bad-url-token>`, `<delim-token>`, `<number-token>`, `<percentage-token>`,
//! `<dimension-token>`, `<unicode-range-token>`, `<whitespace-token>`,
//! `<CDO-token>`, `<CDC-token>`, `<colon-token>`, `<semicolon-token>`,
//! `<comma-token>`, `<[-token>`, `<]-token>`, `<(-token>`, `<)-token>`, `<{-token>`,
//! and `<}-token>`."
//!
//! Two departures from the flat token stream of the specification:
//! comments are kept as [`TokenKind::Comment`] tokens, and a function token
//! owns the tokens of its arguments (the "function" component value of
//! [§ 5.4.9](https://www.w3.org/TR/css-syntax-3/#consume-function)).

use core::fmt;

use serde::Serialize;
use strum_macros::EnumDiscriminants;

/// A range of character offsets into the tokenized source.
///
/// `start` is inclusive and `end` exclusive, both counted in code points
/// from the start of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    /// Offset of the first code point of the token.
    pub start: usize,
    /// Offset one past the last code point of the token.
    pub end: usize,
}

impl Span {
    /// Create a span from its offsets.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The 1-based inclusive character range used in user-facing messages.
    ///
    /// An empty span (the end-of-input marker) reports the character it sits
    /// after, so the range never points past the input.
    #[must_use]
    pub const fn display_range(self) -> (usize, usize) {
        if self.end > self.start {
            (self.start + 1, self.end)
        } else if self.start == 0 {
            (1, 1)
        } else {
            (self.start, self.start)
        }
    }
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<hash-token>` with the type flag set to 'id'... or 'unrestricted'."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HashType {
    /// "id" - the hash token's value is a valid identifier
    Id,
    /// "unrestricted" - the hash token's value is not a valid identifier
    Unrestricted,
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<number-token>` has a type flag set to either 'integer' or 'number'."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumericType {
    /// "integer" - the number is an integer
    Integer,
    /// "number" - the number has a decimal point or exponent
    Number,
}

/// The numeric payload shared by number, percentage and dimension tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Numeric {
    /// "a numeric value"
    pub value: f64,
    /// The integer value if this is an integer type.
    pub int_value: Option<i64>,
    /// "a type flag set to either 'integer' or 'number'"
    pub numeric_type: NumericType,
    /// Whether the representation started with `+` or `-`.
    ///
    /// [§ 6.2](https://www.w3.org/TR/css-syntax-3/#anb-syntax) distinguishes
    /// `<signed-integer>` from `<signless-integer>` by this alone.
    pub signed: bool,
}

impl Numeric {
    /// An integer with or without an explicit sign in its representation.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn integer(value: i64, signed: bool) -> Self {
        Self {
            value: value as f64,
            int_value: Some(value),
            numeric_type: NumericType::Integer,
            signed,
        }
    }

    /// A non-integer number.
    #[must_use]
    pub const fn number(value: f64, signed: bool) -> Self {
        Self {
            value,
            int_value: None,
            numeric_type: NumericType::Number,
            signed,
        }
    }

    /// The integer value, if this is an integer type.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self.numeric_type {
            NumericType::Integer => self.int_value,
            NumericType::Number => None,
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.signed && self.value >= 0.0 {
            write!(f, "+")?;
        }
        match self.int_value {
            Some(i) => write!(f, "{i}"),
            None => write!(f, "{}", self.value),
        }
    }
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// CSS tokens as defined by the CSS Syntax Module Level 3 specification.
/// Each variant corresponds to a token type in the spec's railroad diagrams.
#[derive(Debug, Clone, PartialEq, Serialize, EnumDiscriminants)]
#[strum_discriminants(name(TokenType))]
#[strum_discriminants(derive(Hash))]
#[strum_discriminants(allow(missing_docs))]
pub enum TokenKind {
    /// "`<ident-token>`"
    /// "has a value composed of one or more code points"
    Ident(String),

    /// "`<function-token>`" together with the component values up to its
    /// matching `<)-token>`.
    Function {
        /// The function name, without the opening parenthesis.
        name: String,
        /// The tokens between the parentheses, unparsed.
        arguments: Vec<CSSToken>,
    },

    /// "`<at-keyword-token>`"
    /// "has a value composed of one or more code points, preceded by U+0040 COMMERCIAL AT (@)"
    AtKeyword(String),

    /// "`<hash-token>`"
    /// "has a value composed of one or more code points, preceded by U+0023 NUMBER SIGN (#)"
    Hash {
        /// "a value composed of one or more code points"
        value: String,
        /// "a type flag set to either 'id' or 'unrestricted'"
        hash_type: HashType,
    },

    /// "`<string-token>`"
    /// "has a value composed of zero or more code points"
    String(String),

    /// "`<bad-string-token>`"
    /// "represents a parsing error"
    BadString,

    /// "`<url-token>`"
    /// "has a value composed of zero or more code points"
    Url(String),

    /// "`<bad-url-token>`"
    /// "represents a parsing error"
    BadUrl,

    /// "`<delim-token>`"
    /// "has a value composed of a single code point"
    Delim(char),

    /// "`<number-token>`"
    Number(Numeric),

    /// "`<percentage-token>`"
    Percentage(Numeric),

    /// "`<dimension-token>`"
    /// "has a numeric value, a type flag, and a unit"
    Dimension {
        /// The numeric part.
        numeric: Numeric,
        /// "a unit"
        unit: String,
    },

    /// "`<whitespace-token>`"
    /// "represents one or more whitespace code points"
    Whitespace,

    /// A comment, including its delimiters in the span; the value is the text
    /// between `/*` and `*/`.
    Comment(String),

    /// "`<CDO-token>`"
    CDO,

    /// "`<CDC-token>`"
    CDC,

    /// "`<colon-token>`"
    Colon,

    /// "`<semicolon-token>`"
    Semicolon,

    /// "`<comma-token>`"
    Comma,

    /// `<[-token>`
    LeftBracket,

    /// `<]-token>`
    RightBracket,

    /// `<(-token>`
    LeftParen,

    /// `<)-token>`
    RightParen,

    /// `<{-token>`
    LeftBrace,

    /// `<}-token>`
    RightBrace,

    /// End of file - signals end of input
    EOF,
}

impl TokenKind {
    /// Create a new ident token.
    #[must_use]
    pub fn ident(value: impl Into<String>) -> Self {
        Self::Ident(value.into())
    }

    /// Create a new function token with the given arguments.
    #[must_use]
    pub fn function(name: impl Into<String>, arguments: Vec<CSSToken>) -> Self {
        Self::Function {
            name: name.into(),
            arguments,
        }
    }

    /// Create a new at-keyword token.
    #[must_use]
    pub fn at_keyword(value: impl Into<String>) -> Self {
        Self::AtKeyword(value.into())
    }

    /// Create a new string token.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create a new integer number token.
    #[must_use]
    pub const fn integer(value: i64, signed: bool) -> Self {
        Self::Number(Numeric::integer(value, signed))
    }

    /// Create a new integer dimension token.
    #[must_use]
    pub fn dimension(value: i64, signed: bool, unit: impl Into<String>) -> Self {
        Self::Dimension {
            numeric: Numeric::integer(value, signed),
            unit: unit.into(),
        }
    }

    /// Create a new delim token.
    #[must_use]
    pub const fn delim(c: char) -> Self {
        Self::Delim(c)
    }
}

impl fmt::Display for TokenKind {
    /// Renders the token the way it would appear in source text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(v) => write!(f, "{v}"),
            Self::Function { name, arguments } => {
                write!(f, "{name}(")?;
                for argument in arguments {
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            }
            Self::AtKeyword(v) => write!(f, "@{v}"),
            Self::Hash { value, .. } => write!(f, "#{value}"),
            Self::String(v) => write!(f, "\"{v}\""),
            Self::BadString => write!(f, "<bad-string>"),
            Self::Url(v) => write!(f, "url({v})"),
            Self::BadUrl => write!(f, "<bad-url>"),
            Self::Delim(c) => write!(f, "{c}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Percentage(n) => write!(f, "{n}%"),
            Self::Dimension { numeric, unit } => write!(f, "{numeric}{unit}"),
            Self::Whitespace => write!(f, " "),
            Self::Comment(v) => write!(f, "/*{v}*/"),
            Self::CDO => write!(f, "<!--"),
            Self::CDC => write!(f, "-->"),
            Self::Colon => write!(f, ":"),
            Self::Semicolon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::LeftBracket => write!(f, "["),
            Self::RightBracket => write!(f, "]"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::EOF => Ok(()),
        }
    }
}

/// A token together with the source range it was read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CSSToken {
    /// What was read.
    pub kind: TokenKind,
    /// Where it was read.
    pub span: Span,
}

impl CSSToken {
    /// Create a token from its kind and source range.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The discriminant of this token's kind.
    #[must_use]
    pub fn token_type(&self) -> TokenType {
        TokenType::from(&self.kind)
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EOF)
    }

    /// Returns true if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace)
    }

    /// Returns true for tokens the selector grammar skips between
    /// components: whitespace and comments.
    #[must_use]
    pub const fn is_insignificant(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment(_))
    }

    /// Returns true if this is a delim token holding `c`.
    #[must_use]
    pub fn is_delim(&self, c: char) -> bool {
        self.kind == TokenKind::Delim(c)
    }

    /// The value of an ident token.
    #[must_use]
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(v) => Some(v),
            _ => None,
        }
    }

    /// The name of a function token.
    #[must_use]
    pub fn function_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Function { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The arguments of a function token.
    #[must_use]
    pub fn arguments(&self) -> Option<&[CSSToken]> {
        match &self.kind {
            TokenKind::Function { arguments, .. } => Some(arguments),
            _ => None,
        }
    }

    /// The textual value of the token as a selector consumer reads it: the
    /// ident, string, at-keyword or hash value, the function name, or the
    /// source rendering for everything else.
    #[must_use]
    pub fn value(&self) -> String {
        match &self.kind {
            TokenKind::Ident(v)
            | TokenKind::String(v)
            | TokenKind::AtKeyword(v)
            | TokenKind::Hash { value: v, .. } => v.clone(),
            TokenKind::Function { name, .. } => name.clone(),
            other => other.to_string(),
        }
    }

    /// A short description for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EOF => "end of input".to_string(),
            TokenKind::Whitespace => "whitespace".to_string(),
            _ => format!("\"{}\"", self.kind),
        }
    }
}

impl fmt::Display for CSSToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}
