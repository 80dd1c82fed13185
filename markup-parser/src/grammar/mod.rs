//! Ordered-choice rule dispatch.
//!
//! A [`RuleSet`] is an ordered list of [`Rule`]s for one grammar level. Dispatch tries
//! the rules in order against the remaining span; the first rule that matches decides
//! how much it consumes and what it emits, then dispatch continues over the rest of the
//! span. The last rule of every set is a catch-all, so dispatch over non-empty input
//! always makes progress.

mod block;
mod inline;

use crate::{Error, Options, Sink, Span};

/// Outcome of trying a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// The rule declines; the next rule in the set is tried.
    NoMatch,
    /// The rule consumed `[span.start, consumed_end)`.
    Matched { consumed_end: usize },
}

/// A single grammar production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Block level: one paragraph up to the next blank line.
    Paragraph,
    /// Inline level: a single line terminator becomes a `br` element.
    LineBreak,
    /// Inline level: literal text up to the next terminator.
    Text,
}

impl Rule {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::LineBreak => "line-break",
            Self::Text => "text",
        }
    }

    /// Try this rule against the start of `span`.
    ///
    /// Rules only read inside `span` and only append to `sink`.
    ///
    /// # Errors
    ///
    /// Propagates errors from nested dispatch.
    pub fn try_match(
        self,
        options: &Options,
        span: Span<'_>,
        sink: &mut dyn Sink,
    ) -> Result<Match, Error> {
        match self {
            Self::Paragraph => block::paragraph(options, span, sink),
            Self::LineBreak => Ok(inline::line_break(span, sink)),
            Self::Text => inline::text(options, span, sink),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ordered, immutable rules for one grammar level. Earlier rules win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    name: &'static str,
    rules: &'static [Rule],
}

/// Block level rules. Paragraph always matches non-empty input.
pub const BLOCK_RULES: RuleSet = RuleSet::new("block", &[Rule::Paragraph]);

/// Inline level rules. Text is the catch-all and must stay last.
pub const INLINE_RULES: RuleSet = RuleSet::new("inline", &[Rule::LineBreak, Rule::Text]);

impl RuleSet {
    #[must_use]
    pub const fn new(name: &'static str, rules: &'static [Rule]) -> Self {
        Self { name, rules }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Consume all of `span`, emitting nodes into `sink`.
    ///
    /// Successive matches are handled by looping over the remainder rather than by
    /// recursion, so stack depth does not grow with the number of paragraphs or lines.
    /// An empty span is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::NoRuleMatched`] when no rule matches a non-empty remainder, and
    /// [`Error::SpanOverrun`] when a rule consumes nothing or more than its span.
    pub fn dispatch(
        &self,
        options: &Options,
        span: Span<'_>,
        sink: &mut dyn Sink,
    ) -> Result<(), Error> {
        let mut remaining = span;
        while !remaining.is_empty() {
            let Some((rule, consumed_end)) = self.dispatch_once(options, remaining, sink)? else {
                tracing::error!(rule_set = self.name, offset = remaining.start(), "no rule matched");
                return Err(Error::NoRuleMatched {
                    rule_set: self.name,
                    offset: remaining.start(),
                });
            };
            if consumed_end <= remaining.start() || consumed_end > remaining.end() {
                tracing::error!(
                    rule = rule.name(),
                    consumed_end,
                    start = remaining.start(),
                    end = remaining.end(),
                    "rule consumed outside of its span"
                );
                return Err(Error::SpanOverrun {
                    rule: rule.name(),
                    consumed_end,
                    start: remaining.start(),
                    end: remaining.end(),
                });
            }
            tracing::trace!(
                rule_set = self.name,
                rule = rule.name(),
                start = remaining.start(),
                consumed_end,
                "rule matched"
            );
            remaining = remaining.from(consumed_end)?;
        }
        Ok(())
    }

    /// Try each rule in order once; `None` when every rule declines.
    fn dispatch_once(
        &self,
        options: &Options,
        span: Span<'_>,
        sink: &mut dyn Sink,
    ) -> Result<Option<(Rule, usize)>, Error> {
        for rule in self.rules {
            if let Match::Matched { consumed_end } = rule.try_match(options, span, sink)? {
                return Ok(Some((*rule, consumed_end)));
            }
        }
        Ok(None)
    }
}
