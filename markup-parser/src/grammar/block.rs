use crate::{
    Element, Error, Options, Sink, Span,
    model::PARAGRAPH_TAG,
    text::is_horizontal_whitespace,
};

use super::{INLINE_RULES, Match};

/// Emit the paragraph at the start of `span` and consume its trailing separator.
///
/// The paragraph runs up to the first blank-line separator, or to the end of the span
/// when there is none. Its content is handed to the inline rules. Only the empty
/// paragraph in front of a separator at the very start of the span produces no
/// element; whitespace-only content is kept as text.
pub(super) fn paragraph(
    options: &Options,
    span: Span<'_>,
    sink: &mut dyn Sink,
) -> Result<Match, Error> {
    let (body_end, consumed_end) = find_separator(span)?.unwrap_or((span.end(), span.end()));
    let body = span.until(body_end)?;
    if !body.is_empty() {
        let mut paragraph = Element::new(PARAGRAPH_TAG);
        INLINE_RULES.dispatch(options, body, &mut paragraph)?;
        tracing::debug!(
            start = body.start(),
            end = body.end(),
            children = paragraph.children.len(),
            "paragraph"
        );
        sink.emit(paragraph.into());
    }
    Ok(Match::Matched { consumed_end })
}

/// Locate the first blank-line separator in `span`.
///
/// Returns `(start, end)` absolute offsets: `start` is the first terminator of the
/// separator and `end` is just past its last terminator. A single terminator is an
/// in-paragraph line break and is skipped, including one at the end of the span.
fn find_separator(span: Span<'_>) -> Result<Option<(usize, usize)>, Error> {
    let mut search = span;
    while let Some((offset, terminator)) = search.find_terminator() {
        let after = offset + terminator.byte_len();
        if let Some(end) = blank_run_end(span, after)? {
            return Ok(Some((offset, end)));
        }
        search = span.from(after)?;
    }
    Ok(None)
}

/// Starting right after a terminator, swallow every following whitespace-only line.
///
/// Returns the offset just past the last terminator swallowed, or `None` when no
/// second terminator follows (the first one was a plain line break).
fn blank_run_end(span: Span<'_>, mut cursor: usize) -> Result<Option<usize>, Error> {
    let mut swallowed = false;
    loop {
        let rest = span.from(cursor)?.as_str();
        let line_start = span.end() - rest.trim_start_matches(is_horizontal_whitespace).len();
        match span.terminator_at(line_start) {
            Some(terminator) => {
                cursor = line_start + terminator.byte_len();
                swallowed = true;
            }
            None => return Ok(swallowed.then_some(cursor)),
        }
    }
}
