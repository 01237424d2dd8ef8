//! Integration tests for tree traversal and visitor dispatch.

use sift_css::selector::{
    ANPlusB, AttrMatcher, AttrModifier, AttributeSelector, AttributeSelectorMatcher,
    ClassSelector, Combinator, ComplexSelector, CompoundSelector, Dialect, IdSelector, Node,
    NsPrefix, PseudoClassFunction, PseudoClassSelector, PseudoElementSelector, RelativeSelector,
    TypeSelector, Visitor, WqName, XPathFunction, parse_selector_list,
};

/// Names each node by its kind.
struct KindName;

impl Visitor for KindName {
    type Output = &'static str;

    fn visit_complex_selector(&mut self, _: &ComplexSelector) -> Self::Output {
        "complex"
    }
    fn visit_relative_selector(&mut self, _: &RelativeSelector) -> Self::Output {
        "relative"
    }
    fn visit_compound_selector(&mut self, _: &CompoundSelector) -> Self::Output {
        "compound"
    }
    fn visit_type_selector(&mut self, _: &TypeSelector) -> Self::Output {
        "type"
    }
    fn visit_wq_name(&mut self, _: &WqName) -> Self::Output {
        "wq-name"
    }
    fn visit_ns_prefix(&mut self, _: &NsPrefix) -> Self::Output {
        "ns-prefix"
    }
    fn visit_id_selector(&mut self, _: &IdSelector) -> Self::Output {
        "id"
    }
    fn visit_class_selector(&mut self, _: &ClassSelector) -> Self::Output {
        "class"
    }
    fn visit_attribute_selector(&mut self, _: &AttributeSelector) -> Self::Output {
        "attribute"
    }
    fn visit_attribute_selector_matcher(
        &mut self,
        _: &AttributeSelectorMatcher,
    ) -> Self::Output {
        "attribute-matcher"
    }
    fn visit_combinator(&mut self, _: &Combinator) -> Self::Output {
        "combinator"
    }
    fn visit_attr_matcher(&mut self, _: &AttrMatcher) -> Self::Output {
        "attr-matcher"
    }
    fn visit_attr_modifier(&mut self, _: &AttrModifier) -> Self::Output {
        "attr-modifier"
    }
    fn visit_pseudo_class_selector(&mut self, _: &PseudoClassSelector) -> Self::Output {
        "pseudo-class"
    }
    fn visit_pseudo_element_selector(&mut self, _: &PseudoElementSelector) -> Self::Output {
        "pseudo-element"
    }
    fn visit_pseudo_class_function(&mut self, _: &PseudoClassFunction) -> Self::Output {
        "pseudo-function"
    }
    fn visit_xpath_function(&mut self, _: &XPathFunction) -> Self::Output {
        "xpath-function"
    }
    fn visit_an_plus_b(&mut self, _: &ANPlusB) -> Self::Output {
        "an+b"
    }
}

/// Every node of the first selector, parents first.
fn walk(input: &str, dialect: Dialect) -> Vec<&'static str> {
    let list = parse_selector_list(input, dialect).unwrap();
    let mut names = Vec::new();
    list[0].as_node().walk(&mut |node| names.push(node.accept(&mut KindName)));
    names
}

#[test]
fn test_walk_child_combinator() {
    assert_eq!(
        walk("div > a", Dialect::Standard),
        vec![
            "complex", "compound", "type", "wq-name", "combinator", "complex", "compound", "type",
            "wq-name",
        ]
    );
}

#[test]
fn test_walk_attribute() {
    assert_eq!(
        walk("a[ns|href=x i]", Dialect::Standard),
        vec![
            "complex",
            "compound",
            "type",
            "wq-name",
            "attribute",
            "wq-name",
            "ns-prefix",
            "attribute-matcher",
            "attr-matcher",
            "attr-modifier",
        ]
    );
}

#[test]
fn test_walk_function_arguments() {
    assert_eq!(
        walk("li:nth-child(odd)", Dialect::Standard),
        vec!["complex", "compound", "type", "wq-name", "pseudo-function", "an+b"]
    );
    assert_eq!(
        walk(":not(.a)", Dialect::Standard),
        vec!["complex", "compound", "pseudo-function", "complex", "compound", "class"]
    );
}

#[test]
fn test_walk_relative_and_pseudo_element() {
    assert_eq!(
        walk("> #x::after:hover", Dialect::Standard),
        vec![
            "relative",
            "combinator",
            "complex",
            "compound",
            "id",
            "pseudo-element",
            "pseudo-class",
            "pseudo-class",
        ]
    );
}

#[test]
fn test_walk_extended_nodes() {
    assert_eq!(
        walk("text()", Dialect::Extended),
        vec!["complex", "compound", "type", "xpath-function"]
    );
    assert_eq!(
        walk("a[count()]", Dialect::Extended),
        vec!["complex", "compound", "type", "wq-name", "attribute", "xpath-function"]
    );
}

#[test]
fn test_children_skip_unset_fields() {
    let list = parse_selector_list("a", Dialect::Standard).unwrap();
    let children = list[0].as_node().children();
    assert_eq!(children.len(), 1);
    assert!(matches!(children[0], Node::CompoundSelector(_)));

    let Node::CompoundSelector(compound) = children[0] else {
        unreachable!();
    };
    let Some(type_selector) = compound.type_selector() else {
        panic!("Expected type selector");
    };
    let TypeSelector::Name(name) = type_selector else {
        panic!("Expected type name");
    };
    assert!(name.children().is_empty());
}

#[test]
fn test_accept_on_node_types() {
    let list = parse_selector_list("a", Dialect::Standard).unwrap();
    assert_eq!(list[0].accept(&mut KindName), "complex");
    let Node::ComplexSelector(complex) = list[0].as_node() else {
        panic!("Expected complex selector");
    };
    assert_eq!(complex.left.accept(&mut KindName), "compound");
}
