use crate::{
    Element, Error, Node, Options, Sink, Span,
    model::LINE_BREAK_TAG,
    text::expand_tabs,
};

use super::Match;

/// A terminator at the start of the span becomes an empty `br` element.
///
/// Blank-line separators never reach this rule: paragraph segmentation has already
/// removed them.
pub(super) fn line_break(span: Span<'_>, sink: &mut dyn Sink) -> Match {
    match span.terminator_at(span.start()) {
        Some(terminator) => {
            sink.emit(Element::new(LINE_BREAK_TAG).into());
            Match::Matched {
                consumed_end: span.start() + terminator.byte_len(),
            }
        }
        None => Match::NoMatch,
    }
}

/// Literal text up to the next terminator, where line-break takes over, or to the
/// span end. Always matches.
pub(super) fn text(options: &Options, span: Span<'_>, sink: &mut dyn Sink) -> Result<Match, Error> {
    let end = span
        .find_terminator()
        .map_or(span.end(), |(offset, _)| offset);
    let literal = span.until(end)?;
    if !literal.is_empty() {
        sink.emit(Node::text(expand_tabs(literal.as_str(), options.tab_width)));
    }
    Ok(Match::Matched { consumed_end: end })
}
