//! Line terminator and tab canonicalization.
//!
//! Three line terminator encodings are recognized: CRLF, a lone CR and a lone LF.
//! Probing always tries CRLF first so a CRLF pair is never split into two breaks.
//!
//! Tabs are canonicalized to a fixed run of spaces (8 by default), which makes a
//! literal tab and an already-expanded run of spaces the same whitespace when
//! measuring horizontal position.

use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

/// Canonical tab width.
pub const TAB_WIDTH: usize = 8;

/// The only character canonicalized by [`expand_tabs`].
pub const TAB: char = '\t';

/// Recognized line terminators, longest first.
pub const LINE_TERMINATORS: [Terminator; 3] = [Terminator::CrLf, Terminator::Cr, Terminator::Lf];

/// A line terminator encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminator {
    /// `\r\n`
    CrLf,
    /// `\r`
    Cr,
    /// `\n`
    Lf,
}

impl Terminator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
            Self::Lf => "\n",
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn byte_len(self) -> usize {
        self.as_str().len()
    }

    /// Recognize the terminator at the very start of `text`, if any.
    #[must_use]
    pub fn at_start_of(text: &str) -> Option<Self> {
        LINE_TERMINATORS
            .into_iter()
            .find(|terminator| text.starts_with(terminator.as_str()))
    }
}

impl std::fmt::Display for Terminator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CrLf => write!(f, "CRLF"),
            Self::Cr => write!(f, "CR"),
            Self::Lf => write!(f, "LF"),
        }
    }
}

/// Find the nearest line terminator in `text`.
///
/// Returns the byte offset relative to `text` along with the terminator found there.
/// `None` means there is no terminator at all; an offset of `0` is a real match.
#[must_use]
pub fn find_terminator(text: &str) -> Option<(usize, Terminator)> {
    let offset = text.find(['\r', '\n'])?;
    let terminator = Terminator::at_start_of(text.get(offset..)?)?;
    Some((offset, terminator))
}

/// Horizontal whitespace, i.e. whitespace that never ends a line.
#[must_use]
pub fn is_horizontal_whitespace(c: char) -> bool {
    c == ' ' || c == TAB
}

/// Replace every tab with `tab_width` spaces.
///
/// Borrows the input untouched when it holds no tab.
#[must_use]
pub fn expand_tabs(text: &str, tab_width: usize) -> Cow<'_, str> {
    if text.contains(TAB) {
        Cow::Owned(text.replace(TAB, &" ".repeat(tab_width)))
    } else {
        Cow::Borrowed(text)
    }
}

/// Horizontal width of `text` once tabs are canonicalized.
///
/// A tab counts as exactly `tab_width` columns, the same as its expansion, and every
/// other character counts as its Unicode display width.
#[must_use]
pub fn display_width(text: &str, tab_width: usize) -> usize {
    text.chars()
        .map(|c| {
            if c == TAB {
                tab_width
            } else {
                c.width().unwrap_or(0)
            }
        })
        .sum()
}
