//! Core traits and utilities for markup converters.
//!
//! This crate provides the shared infrastructure used by converters that turn a parsed
//! [`Node`](markup_parser::Node) tree into an output format:
//!
//! - [`Processable`] - trait that all converters implement
//! - [`Visitor`](visitor::Visitor) - visitor pattern for tree traversal
//! - [`Options`] - configuration for conversion
//!
//! # Example
//!
//! ```
//! use markup_converters_core::{GeneratorMetadata, Options};
//!
//! let options = Options::builder()
//!     .embedded(true)
//!     .generator_metadata(GeneratorMetadata::new("my-converter", "1.0.0"))
//!     .build();
//! assert!(options.embedded());
//! ```

pub mod visitor;

/// Converter options.
///
/// Use [`Options::builder()`] to construct an instance. This struct is marked
/// `#[non_exhaustive]` to allow adding new fields in future minor versions.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Options {
    generator_metadata: GeneratorMetadata,
    timings: bool,
    embedded: bool,
}

impl Options {
    /// Create a new builder with default values.
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Get the generator metadata.
    #[must_use]
    pub fn generator_metadata(&self) -> &GeneratorMetadata {
        &self.generator_metadata
    }

    /// Get whether timing information should be output.
    #[must_use]
    pub fn timings(&self) -> bool {
        self.timings
    }

    /// Get whether to output an embeddable fragment.
    ///
    /// When true, converters should output content without document wrappers
    /// (e.g., no DOCTYPE, html, head, body tags for XHTML).
    #[must_use]
    pub fn embedded(&self) -> bool {
        self.embedded
    }
}

/// Builder for [`Options`].
///
/// Use [`Options::builder()`] to create a new builder.
#[derive(Debug, Default, Clone)]
pub struct OptionsBuilder {
    generator_metadata: GeneratorMetadata,
    timings: bool,
    embedded: bool,
}

impl OptionsBuilder {
    /// Set the generator metadata (name and version).
    #[must_use]
    pub fn generator_metadata(mut self, meta: GeneratorMetadata) -> Self {
        self.generator_metadata = meta;
        self
    }

    /// Enable or disable timing output.
    #[must_use]
    pub fn timings(mut self, timings: bool) -> Self {
        self.timings = timings;
        self
    }

    /// Enable or disable embedded output mode.
    #[must_use]
    pub fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    /// Build the [`Options`] instance.
    #[must_use]
    pub fn build(self) -> Options {
        Options {
            generator_metadata: self.generator_metadata,
            timings: self.timings,
            embedded: self.embedded,
        }
    }
}

/// Extension trait for formatting [`Duration`](std::time::Duration) in human-readable form.
pub trait PrettyDuration {
    /// Returns a human-readable string representation of the duration.
    ///
    /// - Automatically selects appropriate unit (ns, µs, ms, s)
    /// - Rounds to 2 decimal places
    /// - Strips trailing zeros
    fn pretty_print(&self) -> String;
}

impl PrettyDuration for std::time::Duration {
    fn pretty_print(&self) -> String {
        let nanos = self.as_nanos();

        // f64 represents every integer up to 2^53 exactly, far beyond any parse time.
        #[allow(clippy::cast_precision_loss)]
        let f_nanos = nanos as f64;
        let (value, unit) = match nanos {
            0..=999 => return format!("{nanos}ns"),
            1_000..=999_999 => (f_nanos / 1_000.0, "µs"),
            1_000_000..=999_999_999 => (f_nanos / 1_000_000.0, "ms"),
            _ => (f_nanos / 1_000_000_000.0, "s"),
        };
        let value = format!("{value:.2}");
        format!("{}{unit}", value.trim_end_matches('0').trim_end_matches('.'))
    }
}

/// Generator metadata for tracking which tool produced the output.
///
/// This is embedded in generated output (e.g., an XHTML `generator` meta tag).
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct GeneratorMetadata {
    name: String,
    version: String,
}

impl GeneratorMetadata {
    /// Create new generator metadata.
    #[must_use]
    pub fn new<S: AsRef<str>>(name: S, version: S) -> Self {
        Self {
            name: name.as_ref().to_string(),
            version: version.as_ref().to_string(),
        }
    }

    /// Get the generator name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the generator version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl std::fmt::Display for GeneratorMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// Trait for tree converters.
pub trait Processable {
    /// The options type for this converter.
    type Options;
    /// The error type for this converter.
    type Error;

    /// Create a new converter instance.
    fn new(options: Self::Options) -> Self;

    /// Convert a parsed tree.
    ///
    /// The CLI handles all parsing (stdin or files), and converters just focus on conversion.
    ///
    /// # Arguments
    ///
    /// * `root` - The parsed tree
    /// * `file` - Optional source file path (used to derive the output path)
    ///   - `Some(path)` for file-based conversion
    ///   - `None` for stdin-based conversion, written to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if conversion or writing fails.
    fn convert(
        &self,
        root: &markup_parser::Node,
        file: Option<&std::path::Path>,
    ) -> Result<(), Self::Error>;
}

/// Walk the error source chain to find a parser error.
///
/// Lets the CLI show a parser error with source context no matter how deeply a
/// converter wrapped it.
pub fn find_parser_error<'e>(
    e: &'e (dyn std::error::Error + 'static),
) -> Option<&'e markup_parser::Error> {
    if let Some(parser_error) = e.downcast_ref::<markup_parser::Error>() {
        return Some(parser_error);
    }

    let mut current = e.source();
    while let Some(err) = current {
        if let Some(parser_error) = err.downcast_ref::<markup_parser::Error>() {
            return Some(parser_error);
        }
        current = err.source();
    }
    None
}
