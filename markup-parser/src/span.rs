use crate::{
    Error,
    text::{self, Terminator},
};

/// A read-only view `[start, end)` over the source text.
///
/// Spans never copy the text they cover and cannot outlive it. Offsets are byte
/// offsets that always fall on UTF-8 character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

impl<'a> Span<'a> {
    /// Create a span over `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpan`] unless `start <= end <= text.len()` and both
    /// offsets are character boundaries.
    pub fn new(text: &'a str, start: usize, end: usize) -> Result<Self, Error> {
        if start > end
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            return Err(Error::InvalidSpan {
                start,
                end,
                len: text.len(),
            });
        }
        Ok(Self { text, start, end })
    }

    /// The span covering all of `text`.
    #[must_use]
    pub fn full(text: &'a str) -> Self {
        Self {
            text,
            start: 0,
            end: text.len(),
        }
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The source text this span is a view of.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.text
    }

    /// The characters covered by the span.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.text.get(self.start..self.end).unwrap_or_default()
    }

    /// The remainder of the span starting at the absolute `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpan`] if `offset` is outside `[start, end]`.
    pub fn from(&self, offset: usize) -> Result<Self, Error> {
        self.narrow(offset, self.end)
    }

    /// The prefix of the span ending at the absolute `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpan`] if `offset` is outside `[start, end]`.
    pub fn until(&self, offset: usize) -> Result<Self, Error> {
        self.narrow(self.start, offset)
    }

    fn narrow(&self, start: usize, end: usize) -> Result<Self, Error> {
        if start < self.start || end > self.end {
            return Err(Error::InvalidSpan {
                start,
                end,
                len: self.text.len(),
            });
        }
        Self::new(self.text, start, end)
    }

    /// Nearest line terminator inside the span.
    ///
    /// Returns the absolute offset of the terminator, or `None` when the span holds
    /// none. A CRLF pair straddling the span end is reported as a lone CR.
    #[must_use]
    pub fn find_terminator(&self) -> Option<(usize, Terminator)> {
        text::find_terminator(self.as_str()).map(|(offset, terminator)| (self.start + offset, terminator))
    }

    /// The terminator starting exactly at the absolute `offset`, if any.
    #[must_use]
    pub fn terminator_at(&self, offset: usize) -> Option<Terminator> {
        if offset < self.start || offset >= self.end {
            return None;
        }
        self.text
            .get(offset..self.end)
            .and_then(Terminator::at_start_of)
    }
}
