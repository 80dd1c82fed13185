//! Visitor implementation for XHTML conversion.

use std::io::Write;

use markup_converters_core::visitor::Visitor;
use markup_parser::{Element, Node};

use crate::{
    Error, Processor, RenderOptions,
    constants::{is_block, is_void},
    document,
    escape::{escape_attribute, escape_text},
};

/// Writes a node tree as XHTML.
///
/// Unless the processor is configured for embedded output, the tree is wrapped in a
/// complete document with a `head` and a `body`.
pub struct HtmlVisitor<W: Write> {
    writer: W,
    processor: Processor,
    render_options: RenderOptions,
}

impl<W: Write> HtmlVisitor<W> {
    pub(crate) fn new(writer: W, processor: Processor, render_options: RenderOptions) -> Self {
        Self {
            writer,
            processor,
            render_options,
        }
    }

    /// Consume the visitor and return the underlying writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Void and empty. A void tag with children is written in full.
    fn is_self_closing(element: &Element) -> bool {
        is_void(&element.tag) && element.children.is_empty()
    }

    fn starts_with_block(element: &Element) -> bool {
        element
            .children
            .first()
            .and_then(Node::as_element)
            .is_some_and(|child| is_block(&child.tag))
    }
}

impl<W: Write> Visitor for HtmlVisitor<W> {
    type Error = Error;

    fn visit_document_start(&mut self, _root: &Node) -> Result<(), Self::Error> {
        if self.processor.options.embedded() {
            return Ok(());
        }
        document::render_document_start(&mut self.writer, &self.processor, &self.render_options)
    }

    fn visit_document_end(&mut self, _root: &Node) -> Result<(), Self::Error> {
        if self.processor.options.embedded() {
            return Ok(());
        }
        document::render_document_end(&mut self.writer)
    }

    fn visit_element_start(&mut self, element: &Element) -> Result<(), Self::Error> {
        let w = &mut self.writer;
        write!(w, "<{}", element.tag)?;
        for (name, value) in element.attributes.iter() {
            write!(w, r#" {name}="{}""#, escape_attribute(value))?;
        }
        if Self::is_self_closing(element) {
            write!(w, "/>")?;
            return Ok(());
        }
        write!(w, ">")?;
        if is_block(&element.tag) && Self::starts_with_block(element) {
            writeln!(w)?;
        }
        Ok(())
    }

    fn visit_element_end(&mut self, element: &Element) -> Result<(), Self::Error> {
        let w = &mut self.writer;
        if !Self::is_self_closing(element) {
            write!(w, "</{}>", element.tag)?;
        }
        if is_block(&element.tag) {
            writeln!(w)?;
        }
        Ok(())
    }

    fn visit_text(&mut self, text: &str) -> Result<(), Self::Error> {
        write!(self.writer, "{}", escape_text(text))?;
        Ok(())
    }
}
