//! XHTML converter for markup node trees.
//!
//! ```
//! let root = markup_parser::parse("A & B\nC")?;
//! let html = markup_converters_html::to_string(&root)?;
//! assert_eq!(html, "<div class=\"body\">\n<p>A &amp; B<br/>C</p>\n</div>\n");
//! # Ok::<(), markup_converters_html::Error>(())
//! ```

use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use markup_converters_core::{Options, PrettyDuration, Processable, visitor::Visitor};
use markup_parser::Node;

mod constants;
mod document;
mod error;
mod escape;
mod html_visitor;

pub use error::Error;
pub use html_visitor::HtmlVisitor;

#[derive(Clone, Debug)]
pub struct Processor {
    options: Options,
}

#[derive(Debug, Default)]
pub(crate) struct RenderOptions {
    /// Document title, taken from the source file name when there is one.
    pub(crate) title: Option<String>,
}

impl Processor {
    /// Render `root` to a string, honouring the embedded option.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn to_string(&self, root: &Node) -> Result<String, Error> {
        let buffer = self.render(root, Vec::new(), RenderOptions::default())?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Render `root` into `writer` and flush it.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, root: &Node, writer: W) -> Result<(), Error> {
        let mut writer = self.render(root, BufWriter::new(writer), RenderOptions::default())?;
        writer.flush()?;
        Ok(())
    }

    fn render<W: Write>(
        &self,
        root: &Node,
        writer: W,
        render_options: RenderOptions,
    ) -> Result<W, Error> {
        let mut visitor = HtmlVisitor::new(writer, self.clone(), render_options);
        visitor.visit_document(root)?;
        Ok(visitor.into_writer())
    }

    fn to_file(&self, root: &Node, source: &Path) -> Result<PathBuf, Error> {
        let html_path = source.with_extension("html");
        if html_path == source {
            return Err(Error::OutputPathSameAsInput(html_path));
        }
        let render_options = RenderOptions {
            title: source
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned()),
        };
        let file = std::fs::File::create(&html_path)?;
        let mut writer = self.render(root, BufWriter::new(file), render_options)?;
        writer.flush()?;
        Ok(html_path)
    }
}

impl Processable for Processor {
    type Options = Options;
    type Error = Error;

    fn new(options: Options) -> Self {
        Self { options }
    }

    fn convert(&self, root: &Node, file: Option<&Path>) -> Result<(), Self::Error> {
        let now = std::time::Instant::now();
        if let Some(file) = file {
            let html_path = self.to_file(root, file)?;
            let elapsed = now.elapsed();
            tracing::debug!(time = elapsed.pretty_print(), source = ?file, destination = ?html_path, "time to convert document");
            if self.options.timings() {
                println!("  Time to convert document: {}", elapsed.pretty_print());
            }
            println!("Generated XHTML file: {}", html_path.to_string_lossy());
        } else {
            // Stdout carries the document itself, so timings go to stderr.
            self.write_to(root, std::io::stdout().lock())?;
            let elapsed = now.elapsed();
            tracing::debug!(time = elapsed.pretty_print(), "time to convert document");
            if self.options.timings() {
                eprintln!("  Time to convert document: {}", elapsed.pretty_print());
            }
        }
        Ok(())
    }
}

/// Render `root` as an embeddable XHTML fragment.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn to_string(root: &Node) -> Result<String, Error> {
    Processor::new(Options::builder().embedded(true).build()).to_string(root)
}

#[cfg(test)]
mod tests {
    use markup_converters_core::GeneratorMetadata;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_full_document_wrapper() -> Result<(), Error> {
        let options = Options::builder()
            .generator_metadata(GeneratorMetadata::new("markup", "0.1.0"))
            .build();
        let root = markup_parser::parse("Hi")?;
        assert_eq!(
            Processor::new(options).to_string(&root)?,
            "<!DOCTYPE html>\n\
             <html xmlns=\"http://www.w3.org/1999/xhtml\">\n\
             <head>\n\
             <meta charset=\"UTF-8\"/>\n\
             <meta name=\"generator\" content=\"markup v0.1.0\"/>\n\
             <title>Untitled</title>\n\
             </head>\n\
             <body>\n\
             <div class=\"body\">\n\
             <p>Hi</p>\n\
             </div>\n\
             </body>\n\
             </html>\n"
        );
        Ok(())
    }

    #[test]
    fn test_generator_meta_is_omitted_without_metadata() -> Result<(), Error> {
        let html = Processor::new(Options::default()).to_string(&markup_parser::parse("")?)?;
        assert!(!html.contains("generator"));
        Ok(())
    }

    #[test]
    fn test_embedded_fragment_has_no_wrapper() -> Result<(), Error> {
        let root = markup_parser::parse("A\n\nB")?;
        assert_eq!(
            to_string(&root)?,
            "<div class=\"body\">\n<p>A</p>\n<p>B</p>\n</div>\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_tree() -> Result<(), Error> {
        assert_eq!(
            to_string(&markup_parser::parse("")?)?,
            "<div class=\"body\"></div>\n"
        );
        Ok(())
    }
}
