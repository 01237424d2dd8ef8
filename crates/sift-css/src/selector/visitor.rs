//! Uniform traversal over the selector tree.
//!
//! [`Node`] is a borrowed view of any tree node. `children` gives a fixed
//! traversal order and `accept` dispatches to the one [`Visitor`] method for
//! the node's kind, so adding a node kind is a compile error in every visitor
//! until it is handled.

use super::ast::{
    ANPlusB, AttrMatcher, AttrModifier, AttributeName, AttributeSelector,
    AttributeSelectorMatcher, ClassSelector, Combinator, ComplexSelector, CompoundSelector,
    FunctionArguments, IdSelector, NsPrefix, PseudoClass, PseudoClassFunction,
    PseudoClassSelector, PseudoElementSelector, RelativeSelector, Selector, SubclassSelector,
    TypeSelector, WqName, XPathFunction,
};

/// A reference to one node of a selector tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// A compound selector chained to the rest of a selector.
    ComplexSelector(&'a ComplexSelector),
    /// A selector with a leading combinator.
    RelativeSelector(&'a RelativeSelector),
    /// Simple selectors with no combinator between them.
    CompoundSelector(&'a CompoundSelector),
    /// A type, universal, or extended-dialect subject selector.
    TypeSelector(&'a TypeSelector),
    /// An optionally namespaced name.
    WqName(&'a WqName),
    /// The `ns|` part of a name.
    NsPrefix(&'a NsPrefix),
    /// `#id`
    IdSelector(&'a IdSelector),
    /// `.class`
    ClassSelector(&'a ClassSelector),
    /// `[...]`
    AttributeSelector(&'a AttributeSelector),
    /// The operator, value and modifier of an attribute selector.
    AttributeSelectorMatcher(&'a AttributeSelectorMatcher),
    /// `>`, `+`, `~`, `||` or whitespace.
    Combinator(&'a Combinator),
    /// `=`, `~=`, `|=`, `^=`, `$=`, `*=` or `!=`.
    AttrMatcher(&'a AttrMatcher),
    /// `i` or `s`.
    AttrModifier(&'a AttrModifier),
    /// `:hover`
    PseudoClassSelector(&'a PseudoClassSelector),
    /// `::before`
    PseudoElementSelector(&'a PseudoElementSelector),
    /// `:not(...)`
    PseudoClassFunction(&'a PseudoClassFunction),
    /// `text()` and other functions in selector position.
    XPathFunction(&'a XPathFunction),
    /// An An+B argument.
    ANPlusB(&'a ANPlusB),
}

/// One method per node kind. Implementors decide whether and how to recurse
/// (usually by calling [`Node::children`] and `accept` on each).
pub trait Visitor {
    /// What each visit produces.
    type Output;

    /// Visit a complex selector.
    fn visit_complex_selector(&mut self, node: &ComplexSelector) -> Self::Output;
    /// Visit a relative selector.
    fn visit_relative_selector(&mut self, node: &RelativeSelector) -> Self::Output;
    /// Visit a compound selector.
    fn visit_compound_selector(&mut self, node: &CompoundSelector) -> Self::Output;
    /// Visit a type selector.
    fn visit_type_selector(&mut self, node: &TypeSelector) -> Self::Output;
    /// Visit a qualified name.
    fn visit_wq_name(&mut self, node: &WqName) -> Self::Output;
    /// Visit a namespace prefix.
    fn visit_ns_prefix(&mut self, node: &NsPrefix) -> Self::Output;
    /// Visit an id selector.
    fn visit_id_selector(&mut self, node: &IdSelector) -> Self::Output;
    /// Visit a class selector.
    fn visit_class_selector(&mut self, node: &ClassSelector) -> Self::Output;
    /// Visit an attribute selector.
    fn visit_attribute_selector(&mut self, node: &AttributeSelector) -> Self::Output;
    /// Visit the comparison part of an attribute selector.
    fn visit_attribute_selector_matcher(
        &mut self,
        node: &AttributeSelectorMatcher,
    ) -> Self::Output;
    /// Visit a combinator.
    fn visit_combinator(&mut self, node: &Combinator) -> Self::Output;
    /// Visit an attribute operator.
    fn visit_attr_matcher(&mut self, node: &AttrMatcher) -> Self::Output;
    /// Visit an attribute case modifier.
    fn visit_attr_modifier(&mut self, node: &AttrModifier) -> Self::Output;
    /// Visit an identifier pseudo-class.
    fn visit_pseudo_class_selector(&mut self, node: &PseudoClassSelector) -> Self::Output;
    /// Visit a pseudo-element.
    fn visit_pseudo_element_selector(&mut self, node: &PseudoElementSelector) -> Self::Output;
    /// Visit a functional pseudo-class.
    fn visit_pseudo_class_function(&mut self, node: &PseudoClassFunction) -> Self::Output;
    /// Visit a structural function.
    fn visit_xpath_function(&mut self, node: &XPathFunction) -> Self::Output;
    /// Visit an An+B value.
    fn visit_an_plus_b(&mut self, node: &ANPlusB) -> Self::Output;
}

impl<'a> Node<'a> {
    /// Double dispatch into `visitor`.
    pub fn accept<V: Visitor + ?Sized>(self, visitor: &mut V) -> V::Output {
        match self {
            Node::ComplexSelector(n) => visitor.visit_complex_selector(n),
            Node::RelativeSelector(n) => visitor.visit_relative_selector(n),
            Node::CompoundSelector(n) => visitor.visit_compound_selector(n),
            Node::TypeSelector(n) => visitor.visit_type_selector(n),
            Node::WqName(n) => visitor.visit_wq_name(n),
            Node::NsPrefix(n) => visitor.visit_ns_prefix(n),
            Node::IdSelector(n) => visitor.visit_id_selector(n),
            Node::ClassSelector(n) => visitor.visit_class_selector(n),
            Node::AttributeSelector(n) => visitor.visit_attribute_selector(n),
            Node::AttributeSelectorMatcher(n) => visitor.visit_attribute_selector_matcher(n),
            Node::Combinator(n) => visitor.visit_combinator(n),
            Node::AttrMatcher(n) => visitor.visit_attr_matcher(n),
            Node::AttrModifier(n) => visitor.visit_attr_modifier(n),
            Node::PseudoClassSelector(n) => visitor.visit_pseudo_class_selector(n),
            Node::PseudoElementSelector(n) => visitor.visit_pseudo_element_selector(n),
            Node::PseudoClassFunction(n) => visitor.visit_pseudo_class_function(n),
            Node::XPathFunction(n) => visitor.visit_xpath_function(n),
            Node::ANPlusB(n) => visitor.visit_an_plus_b(n),
        }
    }

    /// Direct child nodes in traversal order. Leaf tokens are not nodes and
    /// do not appear here.
    #[must_use]
    pub fn children(self) -> Vec<Node<'a>> {
        let mut children = Vec::new();
        match self {
            Node::ComplexSelector(n) => {
                children.push(Node::CompoundSelector(&n.left));
                if let Some((combinator, right)) = &n.right {
                    children.push(Node::Combinator(combinator));
                    children.push(Node::ComplexSelector(right));
                }
            }
            Node::RelativeSelector(n) => {
                children.extend(n.combinator.as_ref().map(Node::Combinator));
                children.push(Node::ComplexSelector(&n.complex_selector));
            }
            Node::CompoundSelector(n) => {
                children.extend(n.type_selector().map(Node::TypeSelector));
                for subclass in n.subclasses().unwrap_or_default() {
                    children.push(subclass.as_node());
                }
                for group in n.pseudo_elements().unwrap_or_default() {
                    children.push(Node::PseudoElementSelector(&group.element));
                    children.extend(group.pseudo_classes.iter().map(PseudoClass::as_node));
                }
            }
            Node::TypeSelector(n) => match n {
                TypeSelector::Name(name) => children.push(Node::WqName(name)),
                TypeSelector::Universal { prefix, .. } => {
                    children.extend(prefix.as_ref().map(Node::NsPrefix));
                }
                TypeSelector::XPath(function) => children.push(Node::XPathFunction(function)),
                TypeSelector::AtKeyword(_) => {}
            },
            Node::WqName(n) => children.extend(n.prefix.as_ref().map(Node::NsPrefix)),
            Node::AttributeSelector(n) => {
                match &n.name {
                    AttributeName::Qualified(name) => children.push(Node::WqName(name)),
                    AttributeName::XPath(function) => {
                        children.push(Node::XPathFunction(function));
                    }
                    AttributeName::AtKeyword(_) | AttributeName::Position(_) => {}
                }
                children.extend(n.matcher.as_ref().map(Node::AttributeSelectorMatcher));
            }
            Node::AttributeSelectorMatcher(n) => {
                children.push(Node::AttrMatcher(&n.matcher));
                children.extend(n.modifier.as_ref().map(Node::AttrModifier));
            }
            Node::PseudoElementSelector(n) => children.push(n.value.as_node()),
            Node::PseudoClassFunction(n) => match &n.arguments {
                Some(FunctionArguments::AnPlusB(value)) => children.push(Node::ANPlusB(value)),
                Some(FunctionArguments::Selectors(list)) => {
                    children.extend(list.iter().map(Selector::as_node));
                }
                Some(FunctionArguments::Raw(_)) | None => {}
            },
            Node::NsPrefix(_)
            | Node::IdSelector(_)
            | Node::ClassSelector(_)
            | Node::Combinator(_)
            | Node::AttrMatcher(_)
            | Node::AttrModifier(_)
            | Node::PseudoClassSelector(_)
            | Node::XPathFunction(_)
            | Node::ANPlusB(_) => {}
        }
        children
    }

    /// Call `f` on this node and every descendant, parents before children.
    pub fn walk(self, f: &mut impl FnMut(Node<'a>)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}

impl Selector {
    /// View as a tree node.
    #[must_use]
    pub const fn as_node(&self) -> Node<'_> {
        match self {
            Self::Complex(n) => Node::ComplexSelector(n),
            Self::Relative(n) => Node::RelativeSelector(n),
        }
    }

    /// Double dispatch into `visitor`.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        self.as_node().accept(visitor)
    }
}

impl SubclassSelector {
    /// View as a tree node.
    #[must_use]
    pub const fn as_node(&self) -> Node<'_> {
        match self {
            Self::Id(n) => Node::IdSelector(n),
            Self::Class(n) => Node::ClassSelector(n),
            Self::Attribute(n) => Node::AttributeSelector(n),
            Self::PseudoClass(n) => n.as_node(),
        }
    }
}

impl PseudoClass {
    /// View as a tree node.
    #[must_use]
    pub const fn as_node(&self) -> Node<'_> {
        match self {
            Self::Selector(n) => Node::PseudoClassSelector(n),
            Self::Function(n) => Node::PseudoClassFunction(n),
        }
    }
}

macro_rules! impl_node {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $ty {
                /// View as a tree node.
                #[must_use]
                pub const fn as_node(&self) -> Node<'_> {
                    Node::$ty(self)
                }

                /// Direct child nodes in traversal order.
                #[must_use]
                pub fn children(&self) -> Vec<Node<'_>> {
                    self.as_node().children()
                }

                /// Double dispatch into `visitor`.
                pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
                    self.as_node().accept(visitor)
                }
            }
        )*
    };
}

impl_node!(
    ComplexSelector,
    RelativeSelector,
    CompoundSelector,
    TypeSelector,
    WqName,
    NsPrefix,
    IdSelector,
    ClassSelector,
    AttributeSelector,
    AttributeSelectorMatcher,
    Combinator,
    AttrMatcher,
    AttrModifier,
    PseudoClassSelector,
    PseudoElementSelector,
    PseudoClassFunction,
    XPathFunction,
    ANPlusB,
);
