use std::{error::Error, path::Path};

use markup_converters_core::find_parser_error;
use markup_parser::text::find_terminator;
use miette::{Diagnostic, MietteDiagnostic, NamedSource, SourceSpan};

/// Rich error wrapper for miette display with source code
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic()]
pub(crate) struct RichError {
    message: String,

    #[help]
    advice: Option<String>,

    #[source_code]
    src: NamedSource<String>,

    #[label("{position_advice}")]
    span: SourceSpan,
    position_advice: String,
}

/// Line and column (both 1-based) of a byte offset. Lines end at any terminator the
/// parser recognizes, so CR-only sources report real line numbers.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut line_start = source.get(..offset).unwrap_or(source);
    let mut line = 1;
    while let Some((at, terminator)) = find_terminator(line_start) {
        line += 1;
        line_start = line_start
            .get(at + terminator.byte_len()..)
            .unwrap_or_default();
    }
    (line, line_start.chars().count() + 1)
}

fn source_span_from_offset(source: &str, offset: usize) -> SourceSpan {
    let start = offset.min(source.len());
    let length = source
        .get(start..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    SourceSpan::new(start.into(), length)
}

/// Turn an error into a report, pointing into the source text when the error chain
/// contains a parser error with a known offset.
pub(crate) fn display<E: Error + 'static>(
    e: &E,
    source_context: Option<(&Path, &str)>,
) -> miette::Report {
    let Some(parser_error) = find_parser_error(e) else {
        return miette::miette!("{e}");
    };

    if let (Some((path, source)), Some(offset)) = (source_context, parser_error.offset()) {
        let (line, column) = line_column(source, offset);
        return RichError {
            message: parser_error.to_string(),
            advice: parser_error.advice().map(ToString::to_string),
            src: NamedSource::new(path.display().to_string(), source.to_string()),
            span: source_span_from_offset(source, offset),
            position_advice: format!("error occurred here (line {line}, column {column})"),
        }
        .into();
    }

    let mut diagnostic = MietteDiagnostic::new(parser_error.to_string());
    if let Some(advice) = parser_error.advice() {
        diagnostic = diagnostic.with_help(advice);
    }
    miette::Report::new(diagnostic)
}
