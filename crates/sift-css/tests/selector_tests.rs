//! Integration tests for standard selector parsing.

use sift_css::selector::{
    AttributeName, CombinatorKind, ComplexSelector, CompoundSelector, Dialect, FunctionArguments,
    MatcherKind, ModifierKind, ParserOptions, PseudoClass, Selector, SelectorError,
    SelectorList, SelectorParser, SubclassSelector, TypeSelector, parse_selector_list,
};

fn parse(input: &str) -> SelectorList {
    parse_selector_list(input, Dialect::Standard).unwrap()
}

fn parse_err(input: &str) -> SelectorError {
    parse_selector_list(input, Dialect::Standard).unwrap_err()
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
    let complex = complex(&list[0]);
    assert!(complex.right.is_none());
    complex.left.clone()
}

fn type_name(compound: &CompoundSelector) -> String {
    match compound.type_selector() {
        Some(TypeSelector::Name(name)) => name.name.value(),
        other => panic!("Expected type name, got {other:?}"),
    }
}

#[test]
fn test_parse_type_selector() {
    let compound = only_compound("body");
    assert_eq!(type_name(&compound), "body");
    assert!(compound.subclasses().is_none());
    assert!(compound.pseudo_elements().is_none());
}

#[test]
fn test_child_combinator() {
    let list = parse("div > a");
    assert_eq!(list.len(), 1);
    let selector = complex(&list[0]);
    assert_eq!(type_name(&selector.left), "div");
    assert_eq!(selector.combinator().unwrap().kind, CombinatorKind::Child);
    let right = selector.right().unwrap();
    assert_eq!(type_name(&right.left), "a");
    assert!(right.right.is_none());
}

#[test]
fn test_child_combinator_without_whitespace() {
    let list = parse("div>a");
    let selector = complex(&list[0]);
    assert_eq!(selector.combinator().unwrap().kind, CombinatorKind::Child);
}

#[test]
fn test_descendant_combinator() {
    let list = parse("a b");
    let selector = complex(&list[0]);
    let combinator = selector.combinator().unwrap();
    assert_eq!(combinator.kind, CombinatorKind::Descendant);
    assert!(combinator.tokens[0].is_whitespace());
}

#[test]
fn test_combinator_chain_is_right_recursive() {
    let list = parse("a + b ~ c || d");
    let mut kinds = Vec::new();
    let mut current = complex(&list[0]);
    while let Some(combinator) = current.combinator() {
        kinds.push(combinator.kind);
        current = current.right().unwrap();
    }
    assert_eq!(
        kinds,
        vec![
            CombinatorKind::NextSibling,
            CombinatorKind::SubsequentSibling,
            CombinatorKind::Column,
        ]
    );
    let names: Vec<String> = complex(&list[0])
        .compounds()
        .into_iter()
        .map(type_name)
        .collect();
    assert_eq!(names, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_comment_around_combinator() {
    let list = parse("div /* parent */ > a");
    let selector = complex(&list[0]);
    assert_eq!(selector.combinator().unwrap().kind, CombinatorKind::Child);
}

#[test]
fn test_selector_count_matches_commas() {
    assert_eq!(parse("a").len(), 1);
    assert_eq!(parse("a, b").len(), 2);
    assert_eq!(parse("a ,b , c").len(), 3);
    assert_eq!(parse("ul > li, .nav a, #main").len(), 3);
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    assert_eq!(parse("  div  ").len(), 1);
    assert_eq!(parse("/* lead */ div /* trail */").len(), 1);
}

#[test]
fn test_id_and_classes() {
    let compound = only_compound("div#main.nav.open");
    assert_eq!(type_name(&compound), "div");
    let subclasses = compound.subclasses().unwrap();
    assert_eq!(subclasses.len(), 3);
    assert!(matches!(&subclasses[0], SubclassSelector::Id(id) if id.value.value() == "main"));
    assert!(matches!(&subclasses[1], SubclassSelector::Class(c) if c.value.value() == "nav"));
    assert!(matches!(&subclasses[2], SubclassSelector::Class(c) if c.value.value() == "open"));
}

#[test]
fn test_universal_selector() {
    let compound = only_compound("*");
    assert!(matches!(
        compound.type_selector(),
        Some(TypeSelector::Universal { prefix: None, .. })
    ));

    let compound = only_compound("svg|*");
    match compound.type_selector() {
        Some(TypeSelector::Universal {
            prefix: Some(prefix),
            ..
        }) => assert_eq!(prefix.value.as_ref().unwrap().value(), "svg"),
        other => panic!("Expected prefixed universal selector, got {other:?}"),
    }
}

#[test]
fn test_namespace_prefixes() {
    let compound = only_compound("svg|rect");
    match compound.type_selector() {
        Some(TypeSelector::Name(name)) => {
            assert_eq!(name.name.value(), "rect");
            let prefix = name.prefix.as_ref().unwrap();
            assert_eq!(prefix.value.as_ref().unwrap().value(), "svg");
        }
        other => panic!("Expected qualified name, got {other:?}"),
    }

    let compound = only_compound("*|a");
    match compound.type_selector() {
        Some(TypeSelector::Name(name)) => {
            let prefix = name.prefix.as_ref().unwrap();
            assert!(prefix.value.as_ref().unwrap().is_delim('*'));
        }
        other => panic!("Expected qualified name, got {other:?}"),
    }

    let compound = only_compound("|a");
    match compound.type_selector() {
        Some(TypeSelector::Name(name)) => {
            assert!(name.prefix.as_ref().unwrap().value.is_none());
        }
        other => panic!("Expected qualified name, got {other:?}"),
    }
}

#[test]
fn test_attribute_presence() {
    let compound = only_compound("[href]");
    assert!(compound.type_selector().is_none());
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::Attribute(attribute) => {
            assert!(matches!(&attribute.name, AttributeName::Qualified(n) if n.name.value() == "href"));
            assert!(attribute.matcher.is_none());
        }
        other => panic!("Expected attribute selector, got {other:?}"),
    }
}

#[test]
fn test_attribute_matchers() {
    let cases = [
        ("[a=b]", MatcherKind::Equal),
        ("[a~=b]", MatcherKind::IncludeWord),
        ("[a|=b]", MatcherKind::DashMatch),
        ("[a^=b]", MatcherKind::StartWith),
        ("[a$=b]", MatcherKind::EndWith),
        ("[a*=b]", MatcherKind::Include),
    ];
    for (input, kind) in cases {
        let compound = only_compound(input);
        match &compound.subclasses().unwrap()[0] {
            SubclassSelector::Attribute(attribute) => {
                let matcher = attribute.matcher.as_ref().unwrap();
                assert_eq!(matcher.matcher.kind, kind, "{input}");
                assert_eq!(matcher.value.value(), "b", "{input}");
            }
            other => panic!("Expected attribute selector for {input}, got {other:?}"),
        }
    }
}

#[test]
fn test_attribute_modifiers() {
    let cases = [
        ("[type=\"a\" i]", ModifierKind::CaseInsensitive),
        ("[type=a S]", ModifierKind::CaseSensitive),
    ];
    for (input, kind) in cases {
        let compound = only_compound(input);
        match &compound.subclasses().unwrap()[0] {
            SubclassSelector::Attribute(attribute) => {
                let matcher = attribute.matcher.as_ref().unwrap();
                assert_eq!(matcher.modifier.as_ref().unwrap().kind, kind, "{input}");
            }
            other => panic!("Expected attribute selector for {input}, got {other:?}"),
        }
    }
}

#[test]
fn test_attribute_whitespace_and_number_value() {
    let compound = only_compound("[ data-n = 3 ]");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::Attribute(attribute) => {
            let matcher = attribute.matcher.as_ref().unwrap();
            assert_eq!(matcher.matcher.kind, MatcherKind::Equal);
            assert_eq!(matcher.value.to_string(), "3");
            assert!(matcher.modifier.is_none());
        }
        other => panic!("Expected attribute selector, got {other:?}"),
    }
}

#[test]
fn test_not_equal_needs_extended_dialect() {
    assert!(matches!(parse_err("[a!=b]"), SelectorError::Syntax { .. }));
}

#[test]
fn test_pseudo_class() {
    let compound = only_compound("a:hover");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::PseudoClass(PseudoClass::Selector(pseudo)) => {
            assert_eq!(pseudo.value.value(), "hover");
        }
        other => panic!("Expected pseudo-class, got {other:?}"),
    }
}

#[test]
fn test_pseudo_element() {
    let compound = only_compound("p::first-line");
    assert!(compound.subclasses().is_none());
    let groups = compound.pseudo_elements().unwrap();
    assert_eq!(groups.len(), 1);
    assert!(matches!(
        &groups[0].element.value,
        PseudoClass::Selector(pseudo) if pseudo.value.value() == "first-line"
    ));
    assert!(groups[0].pseudo_classes.is_empty());
}

#[test]
fn test_pseudo_element_with_trailing_pseudo_class() {
    let compound = only_compound("p::before:hover");
    let groups = compound.pseudo_elements().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].pseudo_classes.len(), 1);
}

#[test]
fn test_nth_child_parses_an_plus_b() {
    let compound = only_compound("li:nth-child(2n+1)");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::PseudoClass(PseudoClass::Function(function)) => {
            assert_eq!(function.function_name(), "nth-child");
            match &function.arguments {
                Some(FunctionArguments::AnPlusB(value)) => {
                    assert_eq!(value.a(), 2);
                    assert_eq!(value.b(), 1);
                }
                other => panic!("Expected An+B arguments, got {other:?}"),
            }
        }
        other => panic!("Expected functional pseudo-class, got {other:?}"),
    }
}

#[test]
fn test_not_parses_selector_list() {
    let compound = only_compound(":not(.a, > .b)");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::PseudoClass(PseudoClass::Function(function)) => {
            match &function.arguments {
                Some(FunctionArguments::Selectors(list)) => {
                    assert_eq!(list.len(), 2);
                    assert!(matches!(list[0], Selector::Complex(_)));
                    match &list[1] {
                        Selector::Relative(relative) => assert_eq!(
                            relative.combinator.as_ref().unwrap().kind,
                            CombinatorKind::Child
                        ),
                        Selector::Complex(_) => panic!("Expected relative selector"),
                    }
                }
                other => panic!("Expected selector arguments, got {other:?}"),
            }
        }
        other => panic!("Expected functional pseudo-class, got {other:?}"),
    }
}

#[test]
fn test_unstructured_arguments_are_kept_raw() {
    sift_common::warning::set_enabled(false);
    let compound = only_compound("p:contains( \"sale\" )");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::PseudoClass(PseudoClass::Function(function)) => {
            match &function.arguments {
                Some(FunctionArguments::Raw(tokens)) => {
                    assert_eq!(tokens.len(), 1);
                    assert_eq!(tokens[0].value(), "sale");
                }
                other => panic!("Expected raw arguments, got {other:?}"),
            }
        }
        other => panic!("Expected functional pseudo-class, got {other:?}"),
    }
}

#[test]
fn test_empty_arguments() {
    let compound = only_compound("a:empty-args()");
    match &compound.subclasses().unwrap()[0] {
        SubclassSelector::PseudoClass(PseudoClass::Function(function)) => {
            assert!(function.arguments.is_none());
        }
        other => panic!("Expected functional pseudo-class, got {other:?}"),
    }
}

#[test]
fn test_relative_selector_at_top_level() {
    let list = parse("> a, b");
    assert_eq!(list.len(), 2);
    match &list[0] {
        Selector::Relative(relative) => {
            assert_eq!(
                relative.combinator.as_ref().unwrap().kind,
                CombinatorKind::Child
            );
            assert_eq!(type_name(&relative.complex_selector.left), "a");
        }
        Selector::Complex(_) => panic!("Expected relative selector"),
    }
    assert!(matches!(list[1], Selector::Complex(_)));
}

#[test]
fn test_trailing_garbage_is_reported() {
    let error = parse_err("div $");
    assert_eq!(
        error,
        SelectorError::Syntax {
            token: "\"$\"".to_string(),
            start: 5,
            end: 5,
        }
    );
    assert_eq!(error.to_string(), "unexpected \"$\" at characters 5-5");
}

#[test]
fn test_dangling_combinator_is_reported() {
    let error = parse_err("div >");
    assert_eq!(error.range(), Some((5, 5)));
}

#[test]
fn test_empty_input_is_an_error() {
    let error = parse_err("");
    assert_eq!(error.to_string(), "unexpected end of input at characters 1-1");
}

#[test]
fn test_empty_compound_is_an_error() {
    assert!(parse_selector_list(":", Dialect::Standard).is_err());
    assert!(parse_selector_list("a > > b", Dialect::Standard).is_err());
    assert!(parse_selector_list("a,", Dialect::Standard).is_err());
    assert!(parse_selector_list(",a", Dialect::Standard).is_err());
}

#[test]
fn test_comment_alone_does_not_combine() {
    let error = parse_err("a/**/b");
    assert_eq!(error.range(), Some((6, 6)));
}

#[test]
fn test_error_range_within_input() {
    let inputs = ["[href", "div >", "a,", "#", "a:", "p::", "[a=]", "a ! b", "{", "a $ b"];
    for input in inputs {
        let error = parse_err(input);
        let (start, end) = error.range().unwrap();
        let len = input.chars().count();
        assert!(start >= 1 && start <= end && end <= len, "{input}: {error}");
    }
}

#[test]
fn test_nesting_limit() {
    let options = ParserOptions {
        dialect: Dialect::Standard,
        max_depth: 2,
    };
    let parser = SelectorParser::new(options);
    assert!(parser.parse(":not(:not(a))").is_ok());
    assert_eq!(
        parser.parse(":not(:not(:not(a)))").unwrap_err(),
        SelectorError::NestingTooDeep { limit: 2 }
    );
    assert!(parse_selector_list(":not(:not(:not(a)))", Dialect::Standard).is_ok());
}

fn nested_not(levels: usize) -> String {
    format!("{}a{}", ":not(".repeat(levels), ")".repeat(levels))
}

#[test]
fn test_default_nesting_limit() {
    let limit = ParserOptions::DEFAULT_MAX_DEPTH;
    let list = parse_selector_list(&nested_not(limit), Dialect::Standard).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(
        parse_selector_list(&nested_not(limit + 1), Dialect::Standard).unwrap_err(),
        SelectorError::NestingTooDeep { limit }
    );
}

#[test]
fn test_default_nesting_limit_in_extended_dialect() {
    let limit = ParserOptions::DEFAULT_MAX_DEPTH;
    assert!(parse_selector_list(&nested_not(limit), Dialect::Extended).is_ok());
    assert_eq!(
        parse_selector_list(&nested_not(limit + 1), Dialect::Extended).unwrap_err(),
        SelectorError::NestingTooDeep { limit }
    );
}

#[test]
fn test_serialize_to_json() {
    let list = parse("div");
    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(
        json[0]["Complex"]["left"]["type_selector"]["Name"]["name"]["kind"]["Ident"],
        "div"
    );
    assert_eq!(json[0]["Complex"]["right"], serde_json::Value::Null);
}
