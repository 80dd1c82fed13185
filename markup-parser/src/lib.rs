//! Plain-text markup parser.
//!
//! The parser turns a plain-text document into a tree of [`Node`]s mirroring an XHTML
//! document model: a root `div` with class `body`, holding `p` elements whose content is
//! text and `br` line breaks.
//!
//! Parsing is ordered-choice rule dispatch. The block rules split the input into
//! paragraphs at blank lines; each paragraph is handed to the inline rules, which turn
//! single line terminators into `br` elements and everything else into text.
//!
//! ```
//! use markup_parser::{Element, Node, parse};
//!
//! let tree = parse("A\nB\n\nC")?;
//! let expected = Element::new("div")
//!     .with_attribute("class", "body")
//!     .with_child(
//!         Element::new("p")
//!             .with_child("A")
//!             .with_child(Element::new("br"))
//!             .with_child("B"),
//!     )
//!     .with_child(Element::new("p").with_child("C"));
//! assert_eq!(tree, Node::from(expected));
//! # Ok::<(), markup_parser::Error>(())
//! ```
//!
//! Parsing holds no shared state: concurrent calls on separate threads need no
//! coordination.

use std::{io::Read, path::Path};

use tracing::instrument;

mod error;
pub mod grammar;
mod model;
mod options;
mod span;
pub mod text;

#[cfg(test)]
mod proptests;

pub use error::Error;
pub use grammar::{BLOCK_RULES, INLINE_RULES, Match, Rule, RuleSet};
pub use model::{
    Attributes, Element, LINE_BREAK_TAG, Node, PARAGRAPH_TAG, ROOT_CLASS, ROOT_TAG, Sink, Text,
};
pub use options::{Options, OptionsBuilder};
pub use span::Span;

/// Parse `input` with default options.
///
/// # Errors
///
/// Only an engine contract violation fails; every input has a parse.
pub fn parse(input: &str) -> Result<Node, Error> {
    parse_with_options(input, &Options::default())
}

/// Parse `input` into a root `div class="body"` element.
///
/// # Errors
///
/// Returns [`Error::NoRuleMatched`] or [`Error::SpanOverrun`] if a rule set breaks its
/// contract. Neither can happen with the built-in rule sets.
#[instrument(skip(input), fields(len = input.len()))]
pub fn parse_with_options(input: &str, options: &Options) -> Result<Node, Error> {
    let now = std::time::Instant::now();
    let mut root = Element::new(ROOT_TAG).with_attribute("class", ROOT_CLASS);
    BLOCK_RULES.dispatch(options, Span::full(input), &mut root)?;
    if options.timings {
        tracing::debug!(elapsed = ?now.elapsed(), paragraphs = root.children.len(), "parsed");
    }
    Ok(root.into())
}

/// Run only the inline rules over `input`, without paragraph segmentation.
///
/// Every terminator in `input` becomes a `br` element, blank lines included.
///
/// # Errors
///
/// As for [`parse_with_options`].
#[instrument(skip(input), fields(len = input.len()))]
pub fn parse_inline(input: &str, options: &Options) -> Result<Vec<Node>, Error> {
    let mut nodes: Vec<Node> = Vec::new();
    INLINE_RULES.dispatch(options, Span::full(input), &mut nodes)?;
    Ok(nodes)
}

/// Read the file at `path` and parse it.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read as UTF-8 text.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file<P: AsRef<Path>>(path: P, options: &Options) -> Result<Node, Error> {
    let input = std::fs::read_to_string(path)?;
    parse_with_options(&input, options)
}

/// Read everything from `reader` and parse it.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails or the input is not UTF-8.
pub fn parse_from_reader<R: Read>(reader: &mut R, options: &Options) -> Result<Node, Error> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_with_options(&input, options)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn root(children: Vec<Node>) -> Node {
        Node::element("div", Attributes::from([("class", "body")]), children)
    }

    fn p(children: Vec<Node>) -> Node {
        Node::element("p", Attributes::default(), children)
    }

    fn br() -> Node {
        Node::element("br", Attributes::default(), vec![])
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_blank_line_splits_paragraphs() -> Result<(), Error> {
        assert_eq!(
            parse("A\n\nB")?,
            root(vec![p(vec![Node::text("A")]), p(vec![Node::text("B")])])
        );
        Ok(())
    }

    #[test]
    fn test_single_terminator_is_a_line_break() -> Result<(), Error> {
        assert_eq!(
            parse("A\nB")?,
            root(vec![p(vec![Node::text("A"), br(), Node::text("B")])])
        );
        Ok(())
    }

    #[rstest]
    #[case::crlf("A\r\n\r\nB")]
    #[case::cr("A\r\rB")]
    #[case::lf("A\n\nB")]
    #[case::mixed("A\r\n\nB")]
    #[case::whitespace_line("A\n   \nB")]
    fn test_every_terminator_style_splits(#[case] input: &str) -> Result<(), Error> {
        assert_eq!(
            parse(input)?,
            root(vec![p(vec![Node::text("A")]), p(vec![Node::text("B")])])
        );
        Ok(())
    }

    #[rstest]
    #[case::crlf("A\r\nB")]
    #[case::cr("A\rB")]
    #[case::lf("A\nB")]
    fn test_every_terminator_style_breaks(#[case] input: &str) -> Result<(), Error> {
        assert_eq!(
            parse(input)?,
            root(vec![p(vec![Node::text("A"), br(), Node::text("B")])])
        );
        Ok(())
    }

    #[test]
    fn test_empty_input_has_no_paragraphs() -> Result<(), Error> {
        assert_eq!(parse("")?, root(vec![]));
        Ok(())
    }

    #[test]
    fn test_whitespace_only_input_is_literal_text() -> Result<(), Error> {
        assert_eq!(parse("   ")?, root(vec![p(vec![Node::text("   ")])]));
        // The blank lines are a separator; the leading space is the only paragraph.
        assert_eq!(parse(" \n\n\t\r\n")?, root(vec![p(vec![Node::text(" ")])]));
        Ok(())
    }

    #[test]
    fn test_non_separator_whitespace_is_kept() -> Result<(), Error> {
        assert_eq!(
            parse("A\n\n\u{a0}")?,
            root(vec![p(vec![Node::text("A")]), p(vec![Node::text("\u{a0}")])])
        );
        assert_eq!(
            parse("A\n   ")?,
            root(vec![p(vec![Node::text("A"), br(), Node::text("   ")])])
        );
        Ok(())
    }

    #[test]
    fn test_blank_line_at_offset_zero_is_a_separator() -> Result<(), Error> {
        // Regression: a separator found at offset 0 must not read as "not found",
        // which would turn the leading blank line into two line breaks.
        assert_eq!(parse("\n\nA")?, root(vec![p(vec![Node::text("A")])]));
        assert_eq!(parse("\r\n\r\nA")?, root(vec![p(vec![Node::text("A")])]));
        Ok(())
    }

    #[test]
    fn test_leading_single_terminator_is_a_line_break() -> Result<(), Error> {
        assert_eq!(
            parse("\nA")?,
            root(vec![p(vec![br(), Node::text("A")])])
        );
        Ok(())
    }

    #[test]
    fn test_trailing_single_newline_is_a_line_break() -> Result<(), Error> {
        assert_eq!(
            parse("A\nB\n")?,
            root(vec![p(vec![Node::text("A"), br(), Node::text("B"), br()])])
        );
        assert_eq!(parse("A\r\n")?, root(vec![p(vec![Node::text("A"), br()])]));
        Ok(())
    }

    #[test]
    fn test_trailing_blank_lines_are_a_separator() -> Result<(), Error> {
        assert_eq!(parse("A\n\n\n")?, root(vec![p(vec![Node::text("A")])]));
        assert_eq!(parse("A\n \n")?, root(vec![p(vec![Node::text("A")])]));
        Ok(())
    }

    #[test]
    fn test_many_paragraphs_in_order() -> Result<(), Error> {
        let input = "one\n\ntwo\nlines\n\n\n\nthree";
        assert_eq!(
            parse(input)?,
            root(vec![
                p(vec![Node::text("one")]),
                p(vec![Node::text("two"), br(), Node::text("lines")]),
                p(vec![Node::text("three")]),
            ])
        );
        Ok(())
    }

    #[test]
    fn test_tabs_are_canonicalized_in_text() -> Result<(), Error> {
        assert_eq!(
            parse("a\tb")?,
            root(vec![p(vec![Node::text("a        b")])])
        );
        let options = Options::builder().with_tab_width(4).build();
        assert_eq!(
            parse_with_options("a\tb", &options)?,
            root(vec![p(vec![Node::text("a    b")])])
        );
        Ok(())
    }

    #[test]
    fn test_markup_characters_are_literal_text() -> Result<(), Error> {
        assert_eq!(
            parse("<b>*x*</b> & [link](y)")?,
            root(vec![p(vec![Node::text("<b>*x*</b> & [link](y)")])])
        );
        Ok(())
    }

    #[test]
    fn test_parse_inline_keeps_blank_lines_as_breaks() -> Result<(), Error> {
        assert_eq!(
            parse_inline("A\n\nB", &Options::default())?,
            vec![Node::text("A"), br(), br(), Node::text("B")]
        );
        Ok(())
    }

    #[test]
    fn test_parse_from_reader() -> Result<(), Error> {
        let mut reader = std::io::Cursor::new("A\r\n\r\nB");
        assert_eq!(
            parse_from_reader(&mut reader, &Options::default())?,
            parse("A\n\nB")?
        );
        Ok(())
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("does/not/exist.txt", &Options::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_concurrent_parses_are_independent() -> Result<(), Error> {
        let inputs = ["A\n\nB", "C\nD", "", "E\r\rF"];
        let expected = inputs
            .iter()
            .map(|input| parse(input))
            .collect::<Result<Vec<_>, _>>()?;
        let results = std::thread::scope(|scope| {
            let handles = inputs
                .iter()
                .map(|input| scope.spawn(move || parse(input)))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<Result<Vec<_>, _>>()
        })?;
        assert_eq!(results, expected);
        Ok(())
    }
}
