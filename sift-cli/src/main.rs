//! sift: parse a CSS selector and show what the parser made of it.
//!
//! Usage:
//! - sift 'ul > li:nth-child(2n+1)'     # Print the syntax tree
//! - sift -x 'div//a[@href != "#"]'     # Extended path-style dialect
//! - sift --json 'a, b'                 # Syntax tree as JSON
//! - sift --tokens 'a:not(.b)'          # Token stream only

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use sift_common::warning::set_enabled;
use sift_css::selector::{
    ANPlusB, AttrMatcher, AttrModifier, AttributeName, AttributeSelector,
    AttributeSelectorMatcher, ClassSelector, Combinator, ComplexSelector, CompoundSelector,
    Dialect, FunctionArguments, IdSelector, Node, NsPrefix, ParserOptions, PseudoClassFunction,
    PseudoClassSelector, PseudoElementSelector, RelativeSelector, SelectorError, SelectorParser,
    TypeSelector, Visitor, WqName, XPathFunction,
};
use sift_css::tokenizer::{CSSToken, CSSTokenizer};

/// sift: CSS selector parser inspector
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the syntax tree of a selector list
    sift 'ul > li:nth-child(2n+1), a[href$=".pdf" i]'

    # Parse the extended dialect (// and / combinators, @attr, [n], text())
    sift --extended 'div//a/@href'

    # Emit the tree as JSON
    sift --json ':is(h1, h2)::before'

    # Show the tokens the parser sees
    sift --tokens 'a:not(.b)'
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Selector list to parse
    #[arg(value_name = "SELECTOR")]
    selector: String,

    /// Accept the extended path-style dialect
    #[arg(short = 'x', long)]
    extended: bool,

    /// Print the syntax tree as JSON
    #[arg(long, conflicts_with = "tokens")]
    json: bool,

    /// Print the token stream instead of parsing
    #[arg(long)]
    tokens: bool,

    /// Maximum nesting of functional pseudo-class arguments
    #[arg(long, value_name = "N", default_value_t = ParserOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Do not print parser warnings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    set_enabled(!cli.quiet);

    if cli.tokens {
        print_tokens(&CSSTokenizer::tokenize(&cli.selector), 0);
        return Ok(());
    }

    let options = ParserOptions {
        dialect: if cli.extended {
            Dialect::Extended
        } else {
            Dialect::Standard
        },
        max_depth: cli.max_depth,
    };
    let list = SelectorParser::new(options)
        .parse(&cli.selector)
        .inspect_err(|error| underline(&cli.selector, error))
        .context("could not parse selector")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for selector in &list {
            print_node(selector.as_node(), 0);
        }
    }
    Ok(())
}

/// Echo the input with the characters a syntax error points at underlined.
fn underline(input: &str, error: &SelectorError) {
    let Some((start, end)) = error.range() else {
        return;
    };
    let marker = format!("{}{}", " ".repeat(start - 1), "^".repeat(end - start + 1));
    eprintln!("  {input}");
    eprintln!("  {}", marker.red().bold());
}

fn print_node(node: Node<'_>, depth: usize) {
    println!("{}{}", "  ".repeat(depth), node.accept(&mut Label));
    for child in node.children() {
        print_node(child, depth + 1);
    }
}

fn print_tokens(tokens: &[CSSToken], depth: usize) {
    for token in tokens {
        let (start, end) = token.span.display_range();
        println!(
            "{}{start}-{end} {:?} {}",
            "  ".repeat(depth),
            token.token_type(),
            token.describe()
        );
        if let Some(arguments) = token.arguments() {
            print_tokens(arguments, depth + 1);
        }
    }
}

/// One line of text per node for the tree view.
struct Label;

impl Visitor for Label {
    type Output = String;

    fn visit_complex_selector(&mut self, _: &ComplexSelector) -> String {
        "ComplexSelector".to_string()
    }

    fn visit_relative_selector(&mut self, _: &RelativeSelector) -> String {
        "RelativeSelector".to_string()
    }

    fn visit_compound_selector(&mut self, _: &CompoundSelector) -> String {
        "CompoundSelector".to_string()
    }

    fn visit_type_selector(&mut self, node: &TypeSelector) -> String {
        match node {
            TypeSelector::Name(_) | TypeSelector::XPath(_) => "TypeSelector".to_string(),
            TypeSelector::Universal { .. } => "TypeSelector *".to_string(),
            TypeSelector::AtKeyword(token) => format!("TypeSelector {token}"),
        }
    }

    fn visit_wq_name(&mut self, node: &WqName) -> String {
        format!("WqName {}", node.name)
    }

    fn visit_ns_prefix(&mut self, node: &NsPrefix) -> String {
        match &node.value {
            Some(value) => format!("NsPrefix {value}|"),
            None => "NsPrefix |".to_string(),
        }
    }

    fn visit_id_selector(&mut self, node: &IdSelector) -> String {
        format!("IdSelector {}", node.value)
    }

    fn visit_class_selector(&mut self, node: &ClassSelector) -> String {
        format!("ClassSelector .{}", node.value)
    }

    fn visit_attribute_selector(&mut self, node: &AttributeSelector) -> String {
        match &node.name {
            AttributeName::Qualified(_) | AttributeName::XPath(_) => {
                "AttributeSelector".to_string()
            }
            AttributeName::AtKeyword(token) => format!("AttributeSelector {token}"),
            AttributeName::Position(token) => format!("AttributeSelector position {token}"),
        }
    }

    fn visit_attribute_selector_matcher(&mut self, node: &AttributeSelectorMatcher) -> String {
        format!("AttributeSelectorMatcher {}", node.value)
    }

    fn visit_combinator(&mut self, node: &Combinator) -> String {
        format!("Combinator {}", node.kind)
    }

    fn visit_attr_matcher(&mut self, node: &AttrMatcher) -> String {
        let symbol: String = node.kind.symbol().iter().collect();
        format!("AttrMatcher {} ({symbol})", node.kind)
    }

    fn visit_attr_modifier(&mut self, node: &AttrModifier) -> String {
        format!("AttrModifier {}", node.kind)
    }

    fn visit_pseudo_class_selector(&mut self, node: &PseudoClassSelector) -> String {
        format!("PseudoClassSelector :{}", node.value)
    }

    fn visit_pseudo_element_selector(&mut self, _: &PseudoElementSelector) -> String {
        "PseudoElementSelector".to_string()
    }

    fn visit_pseudo_class_function(&mut self, node: &PseudoClassFunction) -> String {
        let name = node.function_name();
        match &node.arguments {
            Some(FunctionArguments::Raw(tokens)) => {
                let raw: String = tokens.iter().map(ToString::to_string).collect();
                format!("PseudoClassFunction :{name}() raw {raw:?}")
            }
            Some(_) | None => format!("PseudoClassFunction :{name}()"),
        }
    }

    fn visit_xpath_function(&mut self, node: &XPathFunction) -> String {
        format!("XPathFunction {}", node.value)
    }

    fn visit_an_plus_b(&mut self, node: &ANPlusB) -> String {
        format!("ANPlusB a={} b={}", node.a(), node.b())
    }
}
