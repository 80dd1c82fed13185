//! Parser invariant tests using property-based testing

use proptest::prelude::*;

use crate::{
    Element, Node, Options, parse, parse_with_options,
    text::{expand_tabs, is_horizontal_whitespace},
};

use super::generators::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    /// There is no rejecting state: every input parses.
    #[test]
    fn parser_never_fails(input in any_document_string()) {
        prop_assert!(parse(&input).is_ok());
    }

    /// Identical input yields a structurally identical tree.
    #[test]
    fn parse_is_deterministic(input in structured_document()) {
        prop_assert_eq!(parse(&input).ok(), parse(&input).ok());
    }

    /// Only terminator and tab representation changes: every other character survives,
    /// in order. The sole exception is horizontal whitespace on blank separator lines.
    #[test]
    fn no_characters_dropped_or_reordered(input in structured_document()) {
        let options = Options::default();
        let tree = parse_with_options(&input, &options)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(tree.text_content(), expected_text(&input, options.tab_width));
    }

    /// Terminators never leak into text: they are either paragraph boundaries or `br`
    /// elements. Tabs never survive canonicalization.
    #[test]
    fn text_has_no_terminators_or_tabs(input in structured_document()) {
        let tree = parse(&input).map_err(|e| TestCaseError::fail(e.to_string()))?;
        verify_text_nodes(&tree)?;
    }

    /// The tree is always `div > p > (text | br)*`, and no paragraph is empty.
    #[test]
    fn tree_shape_is_fixed(input in structured_document()) {
        let tree = parse(&input).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let root = tree.as_element().ok_or_else(|| TestCaseError::fail("root is not an element"))?;
        prop_assert_eq!(root.tag.as_str(), "div");
        prop_assert_eq!(root.attributes.get("class"), Some("body"));
        for paragraph in &root.children {
            verify_paragraph(paragraph)?;
        }
    }

    /// Replacing tabs by their expansion beforehand does not change the tree.
    #[test]
    fn tab_and_expanded_spaces_are_equivalent(input in structured_document()) {
        let options = Options::default();
        let expanded = input.replace('\t', &" ".repeat(options.tab_width));
        prop_assert_eq!(
            parse_with_options(&input, &options).ok(),
            parse_with_options(&expanded, &options).ok()
        );
    }
}

/// The text content a parse must produce: tabs expanded, terminators removed, and the
/// horizontal whitespace of every line bounded by terminators on both sides removed.
/// Such a line is always part of a blank-line separator.
fn expected_text(input: &str, tab_width: usize) -> String {
    let lines: Vec<&str> = input.split(['\r', '\n']).collect();
    let last = lines.len().saturating_sub(1);
    lines
        .iter()
        .enumerate()
        .filter(|(index, line)| {
            let bounded = *index > 0 && *index < last;
            !(bounded && line.chars().all(is_horizontal_whitespace))
        })
        .map(|(_, line)| expand_tabs(line, tab_width))
        .collect()
}

fn verify_text_nodes(node: &Node) -> Result<(), TestCaseError> {
    match node {
        Node::Text(text) => {
            prop_assert!(!text.content.is_empty());
            prop_assert!(!text.content.contains(['\r', '\n', '\t']));
        }
        Node::Element(element) => {
            for child in &element.children {
                verify_text_nodes(child)?;
            }
        }
    }
    Ok(())
}

fn verify_paragraph(node: &Node) -> Result<(), TestCaseError> {
    let Node::Element(Element { tag, children, .. }) = node else {
        return Err(TestCaseError::fail("paragraph is not an element"));
    };
    prop_assert_eq!(tag.as_str(), "p");
    prop_assert!(!children.is_empty());
    for child in children {
        match child {
            Node::Text(_) => {}
            Node::Element(element) => {
                prop_assert_eq!(element.tag.as_str(), "br");
                prop_assert!(element.is_empty());
            }
        }
    }
    Ok(())
}
