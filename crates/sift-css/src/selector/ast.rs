//! Selector syntax tree per [Selectors Level 4 § 18 Grammar](https://www.w3.org/TR/selectors-4/#grammar).
//!
//! Nodes own their children by value and are never mutated after the parser
//! builds them. Names and values stay as the [`CSSToken`]s they were read
//! from, so a consumer translating the tree can still point at source text.

use serde::Serialize;
use strum_macros::Display;

use super::anplusb;
use crate::tokenizer::CSSToken;

/// "`<selector-list> = <complex-selector-list>`"
///
/// One entry per comma-separated selector, in source order.
pub type SelectorList = Vec<Selector>;

/// A top-level (or argument-level) selector.
///
/// The grammar accepts a relative selector wherever a complex selector is
/// allowed; the consumer decides what a leading combinator is relative to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Selector {
    /// `div > p`
    Complex(ComplexSelector),
    /// `> p`
    Relative(RelativeSelector),
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// "`<complex-selector> = <compound-selector> [ <combinator>? <compound-selector> ]*`"
///
/// Stored right-recursively: `a > b c` is `a` chained by `>` to the complex
/// selector `b c`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexSelector {
    /// The leftmost compound selector.
    pub left: CompoundSelector,
    /// The combinator and the rest of the chain, present iff chained.
    pub right: Option<(Combinator, Box<ComplexSelector>)>,
}

impl ComplexSelector {
    /// The combinator joining `left` to the rest of the chain.
    #[must_use]
    pub fn combinator(&self) -> Option<&Combinator> {
        self.right.as_ref().map(|(combinator, _)| combinator)
    }

    /// The rest of the chain.
    #[must_use]
    pub fn right(&self) -> Option<&Self> {
        self.right.as_ref().map(|(_, right)| right.as_ref())
    }

    /// The compound selectors of the chain, left to right.
    #[must_use]
    pub fn compounds(&self) -> Vec<&CompoundSelector> {
        let mut compounds = vec![&self.left];
        let mut current = self;
        while let Some(next) = current.right() {
            compounds.push(&next.left);
            current = next;
        }
        compounds
    }
}

/// "`<relative-selector> = <combinator>? <complex-selector>`"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelativeSelector {
    /// The leading combinator, if written.
    pub combinator: Option<Combinator>,
    /// The selector the combinator applies to.
    pub complex_selector: ComplexSelector,
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "`<compound-selector> = [ <type-selector>? <subclass-selector>*
/// [ <pseudo-element-selector> <pseudo-class-selector>* ]* ]!`"
///
/// The `!` means at least one part must be present; [`CompoundSelector::new`]
/// is the only constructor and refuses an empty one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundSelector {
    type_selector: Option<TypeSelector>,
    subclasses: Vec<SubclassSelector>,
    pseudo_elements: Vec<PseudoElementGroup>,
}

impl CompoundSelector {
    /// Build a compound selector, or `None` if all three parts are empty.
    #[must_use]
    pub fn new(
        type_selector: Option<TypeSelector>,
        subclasses: Vec<SubclassSelector>,
        pseudo_elements: Vec<PseudoElementGroup>,
    ) -> Option<Self> {
        if type_selector.is_none() && subclasses.is_empty() && pseudo_elements.is_empty() {
            return None;
        }
        Some(Self {
            type_selector,
            subclasses,
            pseudo_elements,
        })
    }

    /// The type (or universal) selector.
    #[must_use]
    pub const fn type_selector(&self) -> Option<&TypeSelector> {
        self.type_selector.as_ref()
    }

    /// Id, class, attribute and pseudo-class selectors, in source order.
    /// `None` when there are none.
    #[must_use]
    pub fn subclasses(&self) -> Option<&[SubclassSelector]> {
        (!self.subclasses.is_empty()).then_some(self.subclasses.as_slice())
    }

    /// Pseudo-elements with their trailing pseudo-classes.
    /// `None` when there are none.
    #[must_use]
    pub fn pseudo_elements(&self) -> Option<&[PseudoElementGroup]> {
        (!self.pseudo_elements.is_empty()).then_some(self.pseudo_elements.as_slice())
    }
}

/// A pseudo-element and the pseudo-classes written after it, e.g.
/// `::before:hover`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PseudoElementGroup {
    /// The pseudo-element.
    pub element: PseudoElementSelector,
    /// Pseudo-classes following it.
    pub pseudo_classes: Vec<PseudoClass>,
}

/// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
///
/// "`<type-selector> = <wq-name> | <ns-prefix>? '*'`"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeSelector {
    /// `div`, `svg|rect`, `*|div`
    Name(WqName),
    /// `*`, `ns|*`
    Universal {
        /// The namespace prefix.
        prefix: Option<NsPrefix>,
        /// The `*` delim.
        token: CSSToken,
    },
    /// `@name` in the extended dialect.
    AtKeyword(CSSToken),
    /// `text()`, `comment()` or `self()` in the extended dialect.
    XPath(XPathFunction),
}

/// "`<wq-name> = <ns-prefix>? <ident-token>`"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WqName {
    /// The namespace prefix.
    pub prefix: Option<NsPrefix>,
    /// The local name ident.
    pub name: CSSToken,
}

/// "`<ns-prefix> = [ <ident-token> | '*' ]? '|'`"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NsPrefix {
    /// The namespace ident or `*`; `None` for the bare `|` (no namespace).
    pub value: Option<CSSToken>,
}

/// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdSelector {
    /// The hash token.
    pub value: CSSToken,
}

/// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSelector {
    /// The ident after the full stop.
    pub value: CSSToken,
}

/// "`<subclass-selector> = <id-selector> | <class-selector> |
/// <attribute-selector> | <pseudo-class-selector>`"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SubclassSelector {
    /// `#id`
    Id(IdSelector),
    /// `.class`
    Class(ClassSelector),
    /// `[attr]`
    Attribute(AttributeSelector),
    /// `:hover`, `:nth-child(2n)`
    PseudoClass(PseudoClass),
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// "`<attribute-selector> = '[' <wq-name> ']' |
/// '[' <wq-name> <attr-matcher> [ <string-token> | <ident-token> ] <attr-modifier>? ']'`"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSelector {
    /// What is being tested.
    pub name: AttributeName,
    /// The comparison; `None` for a presence test.
    pub matcher: Option<AttributeSelectorMatcher>,
}

/// The subject of an attribute selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AttributeName {
    /// `[ns|name]`
    Qualified(WqName),
    /// `[@name]` in the extended dialect.
    AtKeyword(CSSToken),
    /// `[2]`, a positional index in the extended dialect.
    Position(CSSToken),
    /// `[text()]` and other functions in the extended dialect.
    XPath(XPathFunction),
}

/// The `<attr-matcher> value <attr-modifier>?` part of an attribute selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSelectorMatcher {
    /// The operator.
    pub matcher: AttrMatcher,
    /// A string, ident or number token.
    pub value: CSSToken,
    /// `i` or `s`.
    pub modifier: Option<AttrModifier>,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combinator {
    /// Which relationship.
    pub kind: CombinatorKind,
    /// The tokens the combinator was read from (whitespace for the
    /// descendant combinator).
    pub tokens: Vec<CSSToken>,
}

/// The relationship a [`Combinator`] expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum CombinatorKind {
    /// `>` (and `/` in the extended dialect)
    Child,
    /// whitespace (and `//` in the extended dialect)
    Descendant,
    /// `+`
    NextSibling,
    /// `~`
    SubsequentSibling,
    /// `||`
    Column,
}

impl CombinatorKind {
    /// The delims that spell the combinator in standard syntax. Empty for
    /// the descendant combinator, which is whitespace.
    #[must_use]
    pub const fn symbol(self) -> &'static [char] {
        match self {
            Self::Child => &['>'],
            Self::Descendant => &[],
            Self::NextSibling => &['+'],
            Self::SubsequentSibling => &['~'],
            Self::Column => &['|', '|'],
        }
    }
}

/// "`<attr-matcher> = [ '~' | '|' | '^' | '$' | '*' ]? '='`"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttrMatcher {
    /// Which comparison.
    pub kind: MatcherKind,
    /// The delims the operator was read from.
    pub tokens: Vec<CSSToken>,
}

/// The comparison an [`AttrMatcher`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum MatcherKind {
    /// `=`
    Equal,
    /// `~=`: one of the whitespace-separated words
    IncludeWord,
    /// `|=`: exactly, or followed by `-`
    DashMatch,
    /// `^=`
    StartWith,
    /// `$=`
    EndWith,
    /// `*=`
    Include,
    /// `!=` in the extended dialect
    NotEqual,
}

impl MatcherKind {
    /// The delims that spell the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static [char] {
        match self {
            Self::Equal => &['='],
            Self::IncludeWord => &['~', '='],
            Self::DashMatch => &['|', '='],
            Self::StartWith => &['^', '='],
            Self::EndWith => &['$', '='],
            Self::Include => &['*', '='],
            Self::NotEqual => &['!', '='],
        }
    }
}

/// "`<attr-modifier> = i | s`"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttrModifier {
    /// Which modifier.
    pub kind: ModifierKind,
    /// The ident it was read from.
    pub token: CSSToken,
}

/// [§ 6.3 Case-sensitivity](https://www.w3.org/TR/selectors-4/#attribute-case)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ModifierKind {
    /// `i`
    CaseInsensitive,
    /// `s`
    CaseSensitive,
}

/// "`<pseudo-class-selector> = ':' <ident-token> |
/// ':' <function-token> <any-value> ')'`"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PseudoClass {
    /// `:hover`
    Selector(PseudoClassSelector),
    /// `:nth-child(2n+1)`
    Function(PseudoClassFunction),
}

/// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
/// written as a bare identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PseudoClassSelector {
    /// The ident after the colon.
    pub value: CSSToken,
}

/// "`<pseudo-element-selector> = ':' <pseudo-class-selector>`"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PseudoElementSelector {
    /// Everything after the first colon.
    pub value: PseudoClass,
}

/// A functional pseudo-class such as `:not(...)` or `:nth-child(...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PseudoClassFunction {
    /// The function token, arguments included.
    pub name: CSSToken,
    /// The parsed arguments; `None` when the parentheses are empty.
    pub arguments: Option<FunctionArguments>,
}

impl PseudoClassFunction {
    /// The function name without the parenthesis.
    #[must_use]
    pub fn function_name(&self) -> &str {
        self.name.function_name().unwrap_or_default()
    }
}

/// The first reading of a function's arguments that fits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FunctionArguments {
    /// `2n+1`, `odd`
    AnPlusB(ANPlusB),
    /// `.a, > .b`
    Selectors(SelectorList),
    /// Anything else, verbatim (leading and trailing whitespace removed).
    Raw(Vec<CSSToken>),
}

/// A structural function (`text()`, `comment()`, `self()`, ...) written in
/// selector position in the extended dialect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XPathFunction {
    /// The function token, arguments included.
    pub value: CSSToken,
}

/// [CSS Syntax § 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// Keeps the tokens that were matched and the `(a, b)` pair derived from
/// them when the node was built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ANPlusB {
    values: Vec<CSSToken>,
    a: i64,
    b: i64,
}

impl ANPlusB {
    /// Build the node from tokens the An+B grammar accepted.
    ///
    /// # Panics
    ///
    /// Panics if `values` is not a shape the grammar produces; the grammar
    /// and [`ANPlusB::derive`] cover the same shapes.
    pub(crate) fn new(values: Vec<CSSToken>) -> Self {
        let Some((a, b)) = Self::derive(&values) else {
            unreachable!("An+B grammar accepted a shape with no derivation: {values:?}");
        };
        Self { values, a, b }
    }

    /// [§ 6.2 Parsing An+B](https://www.w3.org/TR/css-syntax-3/#anb-syntax)
    ///
    /// Compute `(a, b)` from matched An+B tokens (whitespace excluded).
    /// Returns `None` for sequences the An+B grammar does not produce.
    #[must_use]
    pub fn derive(values: &[CSSToken]) -> Option<(i64, i64)> {
        anplusb::derive(values)
    }

    /// The step.
    #[must_use]
    pub const fn a(&self) -> i64 {
        self.a
    }

    /// The offset.
    #[must_use]
    pub const fn b(&self) -> i64 {
        self.b
    }

    /// The tokens the value was read from.
    #[must_use]
    pub fn values(&self) -> &[CSSToken] {
        &self.values
    }
}
