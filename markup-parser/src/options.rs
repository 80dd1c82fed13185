use crate::text::TAB_WIDTH;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Options {
    /// Number of spaces a tab expands to in emitted text.
    pub tab_width: usize,
    /// Emit a `debug` event with the time spent parsing.
    pub timings: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tab_width: TAB_WIDTH,
            timings: false,
        }
    }
}

impl Options {
    /// Create a new `OptionsBuilder` for fluent configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use markup_parser::Options;
    ///
    /// let options = Options::builder()
    ///     .with_tab_width(4)
    ///     .with_timings()
    ///     .build();
    /// assert_eq!(options.tab_width, 4);
    /// ```
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Create a new `Options` with default settings.
    ///
    /// Equivalent to `Options::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builder for `Options`.
///
/// Create an `OptionsBuilder` using `Options::builder()`.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct OptionsBuilder {
    tab_width: Option<usize>,
    timings: bool,
}

impl OptionsBuilder {
    /// Set the tab expansion width. A width of zero keeps the default of 8.
    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = Some(tab_width).filter(|width| *width > 0);
        self
    }

    /// Enable timing information during parsing.
    #[must_use]
    pub fn with_timings(mut self) -> Self {
        self.timings = true;
        self
    }

    #[must_use]
    pub fn build(self) -> Options {
        Options {
            tab_width: self.tab_width.unwrap_or(TAB_WIDTH),
            timings: self.timings,
        }
    }
}
