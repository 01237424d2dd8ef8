//! Integration tests for the extended (path-style) selector dialect.

use sift_css::selector::{
    AttributeName, CombinatorKind, ComplexSelector, CompoundSelector, Dialect, FunctionArguments,
    MatcherKind, PseudoClass, Selector, SelectorList, SubclassSelector, TypeSelector,
    parse_selector_list,
};

fn parse(input: &str) -> SelectorList {
    parse_selector_list(input, Dialect::Extended).unwrap()
}

fn complex(selector: &Selector) -> &ComplexSelector {
    match selector {
        Selector::Complex(complex) => complex,
        Selector::Relative(_) => panic!("Expected complex selector"),
    }
}

fn only_compound(input: &str) -> CompoundSelector {
    let list = parse(input);
    assert_eq!(list.len(), 1);
    complex(&list[0]).left.clone()
}

#[test]
fn test_slash_is_child() {
    let list = parse("a/b");
    let selector = complex(&list[0]);
    assert_eq!(selector.combinator().unwrap().kind, CombinatorKind::Child);
    assert!(selector.combinator().unwrap().tokens[0].is_delim('/'));
}

#[test]
fn test_double_slash_is_descendant() {
    let list = parse("a // b");
    let selector = complex(&list[0]);
    let combinator = selector.combinator().unwrap();
    assert_eq!(combinator.kind, CombinatorKind::Descendant);
    assert_eq!(combinator.tokens.len(), 2);
}

#[test]
fn test_whitespace_is_still_descendant() {
    let list = parse("a b");
    let selector = complex(&list[0]);
    assert_eq!(
        selector.combinator().unwrap().kind,
        CombinatorKind::Descendant
    );
}

#[test]
fn test_standard_combinators_still_work() {
    let list = parse("a > b ~ c");
    let selector = complex(&list[0]);
    assert_eq!(selector.combinator().unwrap().kind, CombinatorKind::Child);
    assert_eq!(
        selector.right().unwrap().combinator().unwrap().kind,
        CombinatorKind::SubsequentSibling
    );
}

#[test]
fn test_slash_rejected_in_standard_dialect() {
    let error = parse_selector_list("a/b", Dialect::Standard).unwrap_err();
    assert_eq!(error.range(), Some((2, 2)));
}

#[test]
fn test_not_equal_matcher() {
    let compound = only_compound("a[rel != 'nofollow']");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::Attribute(attribute) => {
            let matcher = attribute.matcher.as_ref().unwrap();
            assert_eq!(matcher.matcher.kind, MatcherKind::NotEqual);
            assert_eq!(matcher.value.value(), "nofollow");
        }
        other => panic!("Expected attribute selector, got {other:?}"),
    }
}

#[test]
fn test_standard_matchers_still_work() {
    let compound = only_compound("[a^=b]");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::Attribute(attribute) => assert_eq!(
            attribute.matcher.as_ref().unwrap().matcher.kind,
            MatcherKind::StartWith
        ),
        other => panic!("Expected attribute selector, got {other:?}"),
    }
}

#[test]
fn test_at_keyword_type_selector() {
    let list = parse("a/@href");
    let right = complex(&list[0]).right().unwrap();
    match right.left.type_selector() {
        Some(TypeSelector::AtKeyword(token)) => assert_eq!(token.value(), "href"),
        other => panic!("Expected at-keyword, got {other:?}"),
    }
}

#[test]
fn test_structural_functions_in_type_position() {
    for name in ["text", "comment", "self"] {
        let compound = only_compound(&format!("{name}()"));
        match compound.type_selector() {
            Some(TypeSelector::XPath(function)) => {
                assert_eq!(function.value.function_name(), Some(name));
            }
            other => panic!("Expected structural function, got {other:?}"),
        }
    }
}

#[test]
fn test_other_functions_are_not_types() {
    assert!(parse_selector_list("position()", Dialect::Extended).is_err());
    assert!(parse_selector_list("Text()", Dialect::Extended).is_err());
}

#[test]
fn test_at_keyword_attribute() {
    let compound = only_compound("a[@href]");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::Attribute(attribute) => {
            assert!(matches!(&attribute.name, AttributeName::AtKeyword(t) if t.value() == "href"));
            assert!(attribute.matcher.is_none());
        }
        other => panic!("Expected attribute selector, got {other:?}"),
    }

    let compound = only_compound("a[@href = 'x']");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::Attribute(attribute) => {
            assert!(matches!(&attribute.name, AttributeName::AtKeyword(_)));
            let matcher = attribute.matcher.as_ref().unwrap();
            assert_eq!(matcher.matcher.kind, MatcherKind::Equal);
        }
        other => panic!("Expected attribute selector, got {other:?}"),
    }
}

#[test]
fn test_positional_attribute() {
    let compound = only_compound("li[2]");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::Attribute(attribute) => {
            assert!(matches!(&attribute.name, AttributeName::Position(t) if t.to_string() == "2"));
            assert!(attribute.matcher.is_none());
        }
        other => panic!("Expected attribute selector, got {other:?}"),
    }
}

#[test]
fn test_positional_attribute_needs_unsigned_integer() {
    for input in ["a[1.5]", "a[-1]", "a[+1]", "a[2n]"] {
        assert!(
            parse_selector_list(input, Dialect::Extended).is_err(),
            "{input} should not parse"
        );
    }
    let compound = only_compound("li[ 0 ]");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::Attribute(attribute) => {
            assert!(matches!(&attribute.name, AttributeName::Position(t) if t.to_string() == "0"));
        }
        other => panic!("Expected attribute selector, got {other:?}"),
    }
}

#[test]
fn test_function_attribute() {
    let compound = only_compound("a[text()]");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::Attribute(attribute) => match &attribute.name {
            AttributeName::XPath(function) => {
                assert_eq!(function.value.function_name(), Some("text"));
            }
            other => panic!("Expected function subject, got {other:?}"),
        },
        other => panic!("Expected attribute selector, got {other:?}"),
    }

    let compound = only_compound("a[contains(., 'x')]");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::Attribute(attribute) => match &attribute.name {
            AttributeName::XPath(function) => {
                assert_eq!(function.value.function_name(), Some("contains"));
                assert_eq!(function.value.arguments().unwrap().len(), 4);
            }
            other => panic!("Expected function subject, got {other:?}"),
        },
        other => panic!("Expected attribute selector, got {other:?}"),
    }
}

#[test]
fn test_standard_attribute_tried_first() {
    let compound = only_compound("[href]");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::Attribute(attribute) => {
            assert!(matches!(&attribute.name, AttributeName::Qualified(_)));
        }
        other => panic!("Expected attribute selector, got {other:?}"),
    }
}

#[test]
fn test_extended_syntax_in_nested_arguments() {
    let compound = only_compound("div:not(a/b)");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::PseudoClass(PseudoClass::Function(function)) => {
            match &function.arguments {
                Some(FunctionArguments::Selectors(list)) => {
                    let inner = complex(&list[0]);
                    assert_eq!(inner.combinator().unwrap().kind, CombinatorKind::Child);
                }
                other => panic!("Expected selector arguments, got {other:?}"),
            }
        }
        other => panic!("Expected functional pseudo-class, got {other:?}"),
    }
}
