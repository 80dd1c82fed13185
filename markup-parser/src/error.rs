#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid span: [{start}, {end}) over input of length {len}")]
    InvalidSpan {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("No rule in the {rule_set} rule set matched at offset {offset}")]
    NoRuleMatched {
        rule_set: &'static str,
        offset: usize,
    },

    #[error("Rule {rule} consumed up to {consumed_end}, outside of span [{start}, {end})")]
    SpanOverrun {
        rule: &'static str,
        consumed_end: usize,
        start: usize,
        end: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Extract the source offset this error points at, if it has one.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::InvalidSpan { start, .. } => Some(*start),
            Self::NoRuleMatched { offset, .. } => Some(*offset),
            Self::SpanOverrun { start, .. } => Some(*start),
            Self::Io(_) => None,
        }
    }

    /// Get advice for this error if available.
    ///
    /// Every variant except I/O failures is an engine contract violation, so the
    /// advice points at the grammar rather than at the input.
    #[must_use]
    pub fn advice(&self) -> Option<&'static str> {
        match self {
            Self::NoRuleMatched { .. } => Some(
                "Every rule set must end with a catch-all rule that matches any non-empty span",
            ),
            Self::SpanOverrun { .. } => Some(
                "A rule must consume at least one byte and never more than the span it was given",
            ),
            Self::InvalidSpan { .. } => {
                Some("Span offsets must satisfy 0 <= start <= end <= len and fall on char boundaries")
            }
            Self::Io(_) => None,
        }
    }
}
