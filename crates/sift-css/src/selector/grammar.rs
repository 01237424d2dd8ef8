//! [Selectors Level 4 § 18 Grammar](https://www.w3.org/TR/selectors-4/#grammar)
//! as recursive-descent productions.
//!
//! Four productions differ between dialects and are reached only through the
//! [`Grammar`] hook table; the rest are shared. Each production either
//! returns its node or [`Failure::NoMatch`]; alternatives are tried in the
//! order written here and the first match wins.

use sift_common::warning::warn_once;

use super::anplusb;
use super::ast::{
    AttrMatcher, AttrModifier, AttributeName, AttributeSelector, AttributeSelectorMatcher,
    ClassSelector, Combinator, CombinatorKind, ComplexSelector, CompoundSelector,
    FunctionArguments, IdSelector, MatcherKind, ModifierKind, NsPrefix, PseudoClass,
    PseudoClassFunction, PseudoClassSelector, PseudoElementGroup, PseudoElementSelector,
    RelativeSelector, Selector, SelectorList, SubclassSelector, TypeSelector, WqName,
};
use super::backtrack::{Expect, Parser, Production};
use super::error::{Failure, PResult};
use crate::tokenizer::{CSSToken, TokenType};

/// The productions a dialect may replace.
pub(crate) struct Grammar {
    /// `<combinator>`
    pub(crate) combinator: Production<Combinator>,
    /// `<attr-matcher>`
    pub(crate) attr_matcher: Production<AttrMatcher>,
    /// `<type-selector>`
    pub(crate) type_selector: Production<TypeSelector>,
    /// `<attribute-selector>`
    pub(crate) attribute_selector: Production<AttributeSelector>,
}

/// Plain Selectors Level 4.
pub(crate) static STANDARD: Grammar = Grammar {
    combinator,
    attr_matcher,
    type_selector,
    attribute_selector,
};

fn hooked_combinator(p: &mut Parser<'_>) -> PResult<Combinator> {
    let hook = p.grammar().combinator;
    hook(p)
}

fn hooked_attr_matcher(p: &mut Parser<'_>) -> PResult<AttrMatcher> {
    let hook = p.grammar().attr_matcher;
    hook(p)
}

fn hooked_type_selector(p: &mut Parser<'_>) -> PResult<TypeSelector> {
    let hook = p.grammar().type_selector;
    hook(p)
}

fn hooked_attribute_selector(p: &mut Parser<'_>) -> PResult<AttributeSelector> {
    let hook = p.grammar().attribute_selector;
    hook(p)
}

/// "`<complex-selector-list> = <complex-selector>#`"
///
/// Each item may also be a relative selector.
pub(crate) fn selector_list(p: &mut Parser<'_>) -> PResult<SelectorList> {
    p.one_or_more(|p| {
        p.options([
            |p| complex_selector(p).map(Selector::Complex),
            |p| relative_selector(p).map(Selector::Relative),
        ])
    })
}

/// "`<complex-selector> = <compound-selector> [ <combinator>? <compound-selector> ]*`"
pub(crate) fn complex_selector(p: &mut Parser<'_>) -> PResult<ComplexSelector> {
    let first = compound_selector(p)?;
    let mut rest = Vec::new();
    while let Some(link) = p.maybe(|p| {
        let combinator = hooked_combinator(p)?;
        let compound = compound_selector(p)?;
        Ok((combinator, compound))
    })? {
        rest.push(link);
    }

    // Fold `a c1 b c2 c` into `a c1 (b c2 (c))`.
    let (mut combinators, mut compounds): (Vec<_>, Vec<_>) = rest.into_iter().unzip();
    compounds.insert(0, first);
    let mut complex = None;
    while let Some(left) = compounds.pop() {
        let right = complex
            .take()
            .and_then(|right| combinators.pop().map(|c| (c, Box::new(right))));
        complex = Some(ComplexSelector { left, right });
    }
    complex.ok_or(Failure::NoMatch)
}

/// "`<relative-selector> = <combinator>? <complex-selector>`"
pub(crate) fn relative_selector(p: &mut Parser<'_>) -> PResult<RelativeSelector> {
    let combinator = p.maybe(hooked_combinator)?;
    let complex_selector = complex_selector(p)?;
    Ok(RelativeSelector {
        combinator,
        complex_selector,
    })
}

/// "`<compound-selector> = [ <type-selector>? <subclass-selector>*
/// [ <pseudo-element-selector> <pseudo-class-selector>* ]* ]!`"
pub(crate) fn compound_selector(p: &mut Parser<'_>) -> PResult<CompoundSelector> {
    let type_selector = p.maybe(hooked_type_selector)?;

    let mut subclasses = Vec::new();
    while let Some(subclass) = p.maybe(subclass_selector)? {
        subclasses.push(subclass);
    }

    let mut pseudo_elements = Vec::new();
    while let Some(group) = p.maybe(pseudo_element_group)? {
        pseudo_elements.push(group);
    }

    CompoundSelector::new(type_selector, subclasses, pseudo_elements).ok_or(Failure::NoMatch)
}

fn pseudo_element_group(p: &mut Parser<'_>) -> PResult<PseudoElementGroup> {
    let element = pseudo_element_selector(p)?;
    let mut pseudo_classes = Vec::new();
    while let Some(pseudo_class) = p.maybe(pseudo_class_selector)? {
        pseudo_classes.push(pseudo_class);
    }
    Ok(PseudoElementGroup {
        element,
        pseudo_classes,
    })
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "`<combinator> = '>' | '+' | '~' | [ '|' '|' ]`", with whitespace as the
/// descendant combinator.
pub(crate) fn combinator(p: &mut Parser<'_>) -> PResult<Combinator> {
    p.options([
        |p| operator(p, CombinatorKind::Child),
        |p| operator(p, CombinatorKind::NextSibling),
        |p| operator(p, CombinatorKind::SubsequentSibling),
        |p| operator(p, CombinatorKind::Column),
        descendant_combinator,
    ])
}

fn operator(p: &mut Parser<'_>, kind: CombinatorKind) -> PResult<Combinator> {
    p.consume_operator(kind, kind.symbol())
}

/// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
///
/// A run of whitespace (comments may be mixed in, but a comment alone does
/// not separate compounds).
fn descendant_combinator(p: &mut Parser<'_>) -> PResult<Combinator> {
    let tokens = p.take_insignificant();
    if !tokens.iter().any(CSSToken::is_whitespace) {
        return Err(Failure::NoMatch);
    }
    Ok(Combinator {
        kind: CombinatorKind::Descendant,
        tokens,
    })
}

/// "`<attr-matcher> = [ '~' | '|' | '^' | '$' | '*' ]? '='`"
pub(crate) fn attr_matcher(p: &mut Parser<'_>) -> PResult<AttrMatcher> {
    p.options([
        |p| matcher(p, MatcherKind::Equal),
        |p| matcher(p, MatcherKind::IncludeWord),
        |p| matcher(p, MatcherKind::DashMatch),
        |p| matcher(p, MatcherKind::StartWith),
        |p| matcher(p, MatcherKind::EndWith),
        |p| matcher(p, MatcherKind::Include),
    ])
}

/// The attribute operator spelled by `kind`'s delims, with nothing between
/// them.
pub(crate) fn matcher(p: &mut Parser<'_>, kind: MatcherKind) -> PResult<AttrMatcher> {
    let expected: Vec<Expect> = kind.symbol().iter().map(|&c| Expect::Delim(c)).collect();
    let tokens = p.consume_all(&expected)?;
    Ok(AttrMatcher { kind, tokens })
}

/// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
///
/// "`<type-selector> = <wq-name> | <ns-prefix>? '*'`"
///
/// The universal form goes first: `<wq-name>` would otherwise accept the
/// `svg` of `svg|*` and leave `|*` behind.
pub(crate) fn type_selector(p: &mut Parser<'_>) -> PResult<TypeSelector> {
    p.options([
        |p| {
            let prefix = p.maybe(ns_prefix)?;
            let token = p.consume(Expect::Delim('*'))?;
            Ok(TypeSelector::Universal { prefix, token })
        },
        |p| wq_name(p).map(TypeSelector::Name),
    ])
}

/// "`<wq-name> = <ns-prefix>? <ident-token>`"
pub(crate) fn wq_name(p: &mut Parser<'_>) -> PResult<WqName> {
    p.options([
        |p| {
            let prefix = ns_prefix(p)?;
            let name = p.consume(Expect::Type(TokenType::Ident))?;
            Ok(WqName {
                prefix: Some(prefix),
                name,
            })
        },
        |p| {
            let name = p.consume(Expect::Type(TokenType::Ident))?;
            Ok(WqName { prefix: None, name })
        },
    ])
}

/// "`<ns-prefix> = [ <ident-token> | '*' ]? '|'`"
pub(crate) fn ns_prefix(p: &mut Parser<'_>) -> PResult<NsPrefix> {
    let value = p.maybe(|p| {
        p.options([
            |p| p.consume(Expect::Type(TokenType::Ident)),
            |p| p.consume(Expect::Delim('*')),
        ])
    })?;
    let _ = p.consume(Expect::Delim('|'))?;
    Ok(NsPrefix { value })
}

/// "`<subclass-selector> = <id-selector> | <class-selector> |
/// <attribute-selector> | <pseudo-class-selector>`"
pub(crate) fn subclass_selector(p: &mut Parser<'_>) -> PResult<SubclassSelector> {
    p.options([
        |p| id_selector(p).map(SubclassSelector::Id),
        |p| class_selector(p).map(SubclassSelector::Class),
        |p| hooked_attribute_selector(p).map(SubclassSelector::Attribute),
        |p| pseudo_class_selector(p).map(SubclassSelector::PseudoClass),
    ])
}

/// "`<id-selector> = <hash-token>`"
fn id_selector(p: &mut Parser<'_>) -> PResult<IdSelector> {
    let value = p.consume(Expect::Type(TokenType::Hash))?;
    Ok(IdSelector { value })
}

/// "`<class-selector> = '.' <ident-token>`"
fn class_selector(p: &mut Parser<'_>) -> PResult<ClassSelector> {
    let _ = p.consume(Expect::Delim('.'))?;
    let value = p.consume(Expect::Type(TokenType::Ident))?;
    Ok(ClassSelector { value })
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// "`<attribute-selector> = '[' <wq-name> ']' |
/// '[' <wq-name> <attr-matcher> [ <string-token> | <ident-token> ] <attr-modifier>? ']'`"
///
/// Numbers are also accepted as the value.
pub(crate) fn attribute_selector(p: &mut Parser<'_>) -> PResult<AttributeSelector> {
    let _ = p.consume(Expect::Type(TokenType::LeftBracket))?;
    p.skip_insignificant();
    let name = wq_name(p)?;
    p.skip_insignificant();
    let matcher = attribute_tail(p)?;
    Ok(AttributeSelector {
        name: AttributeName::Qualified(name),
        matcher,
    })
}

/// Everything after the attribute name, closing bracket included: either
/// `]` alone or `<attr-matcher> value <attr-modifier>? ]`.
pub(crate) fn attribute_tail(p: &mut Parser<'_>) -> PResult<Option<AttributeSelectorMatcher>> {
    if p
        .maybe(|p| p.consume(Expect::Type(TokenType::RightBracket)))?
        .is_some()
    {
        return Ok(None);
    }

    let matcher = hooked_attr_matcher(p)?;
    p.skip_insignificant();
    let value = p.options([
        |p| p.consume(Expect::Type(TokenType::String)),
        |p| p.consume(Expect::Type(TokenType::Ident)),
        |p| p.consume(Expect::Type(TokenType::Number)),
    ])?;
    p.skip_insignificant();
    let modifier = p.maybe(attr_modifier)?;
    p.skip_insignificant();
    let _ = p.consume(Expect::Type(TokenType::RightBracket))?;
    Ok(Some(AttributeSelectorMatcher {
        matcher,
        value,
        modifier,
    }))
}

/// "`<attr-modifier> = i | s`"
fn attr_modifier(p: &mut Parser<'_>) -> PResult<AttrModifier> {
    p.options([
        |p| {
            let token = p.consume(Expect::Ident("i"))?;
            Ok(AttrModifier {
                kind: ModifierKind::CaseInsensitive,
                token,
            })
        },
        |p| {
            let token = p.consume(Expect::Ident("s"))?;
            Ok(AttrModifier {
                kind: ModifierKind::CaseSensitive,
                token,
            })
        },
    ])
}

/// "`<pseudo-class-selector> = ':' <ident-token> |
/// ':' <function-token> <any-value> ')'`"
pub(crate) fn pseudo_class_selector(p: &mut Parser<'_>) -> PResult<PseudoClass> {
    let _ = p.consume(Expect::Type(TokenType::Colon))?;
    p.options([
        |p| {
            let value = p.consume(Expect::Type(TokenType::Ident))?;
            Ok(PseudoClass::Selector(PseudoClassSelector { value }))
        },
        |p| pseudo_class_function(p).map(PseudoClass::Function),
    ])
}

/// "`<pseudo-element-selector> = ':' <pseudo-class-selector>`"
pub(crate) fn pseudo_element_selector(p: &mut Parser<'_>) -> PResult<PseudoElementSelector> {
    let _ = p.consume(Expect::Type(TokenType::Colon))?;
    let value = pseudo_class_selector(p)?;
    Ok(PseudoElementSelector { value })
}

fn pseudo_class_function(p: &mut Parser<'_>) -> PResult<PseudoClassFunction> {
    let name = p.consume(Expect::Type(TokenType::Function))?;
    let arguments = function_arguments(p, &name)?;
    Ok(PseudoClassFunction { name, arguments })
}

/// Read a function's arguments as An+B, else as a selector list, else keep
/// them as tokens. `None` if there is nothing between the parentheses.
pub(crate) fn function_arguments(
    p: &Parser<'_>,
    function: &CSSToken,
) -> PResult<Option<FunctionArguments>> {
    let arguments = trim_insignificant(function.arguments().unwrap_or_default());
    if arguments.is_empty() {
        return Ok(None);
    }

    if let Some(value) = p.sub_parse(arguments, anplusb::an_plus_b)? {
        return Ok(Some(FunctionArguments::AnPlusB(value)));
    }
    if let Some(list) = p.sub_parse(arguments, selector_list)? {
        return Ok(Some(FunctionArguments::Selectors(list)));
    }

    let name = function.function_name().unwrap_or_default();
    let _ = warn_once(
        "Selectors",
        &format!("arguments to :{name}() are neither An+B nor selectors; kept as raw tokens"),
    );
    Ok(Some(FunctionArguments::Raw(arguments.to_vec())))
}

fn trim_insignificant(tokens: &[CSSToken]) -> &[CSSToken] {
    let start = tokens
        .iter()
        .position(|t| !t.is_insignificant())
        .unwrap_or(tokens.len());
    let end = tokens
        .iter()
        .rposition(|t| !t.is_insignificant())
        .map_or(start, |i| i + 1);
    &tokens[start..end]
}
