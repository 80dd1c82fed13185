//! Visitor pattern for traversing a parsed node tree.
//!
//! Converters implement [`Visitor`] to define how each node kind is written. The
//! default methods walk the tree in document order, so a simple converter only has to
//! say what an element start, an element end and a text run look like.
//!
//! # Naming Conventions
//!
//! - **`visit_*` functions** orchestrate traversal and may call back into the visitor.
//! - **`render_*` functions** write markup for one concern directly to a writer.

use markup_parser::{Element, Node};

/// The Visitor trait defines methods for visiting each kind of node.
///
/// # Traversal order
///
/// [`visit_document`](Visitor::visit_document) calls:
///
/// 1. `visit_document_start()` - document setup
/// 2. `visit_node()` on the root, which recurses through
///    `visit_element_start()`, the children, and `visit_element_end()`
/// 3. `visit_document_end()` - document cleanup
pub trait Visitor {
    /// The error type that can be returned during visiting
    type Error;

    /// Called before the root node is visited.
    ///
    /// # Errors
    ///
    /// The default implementation never returns an error.
    fn visit_document_start(&mut self, _root: &Node) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after the root node is visited.
    ///
    /// # Errors
    ///
    /// The default implementation never returns an error.
    fn visit_document_end(&mut self, _root: &Node) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit a complete tree, including the document hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if any visitor method fails.
    fn visit_document(&mut self, root: &Node) -> Result<(), Self::Error> {
        self.visit_document_start(root)?;
        self.visit_node(root)?;
        self.visit_document_end(root)
    }

    /// Dispatch on the node kind.
    ///
    /// # Errors
    ///
    /// Returns an error if visiting the node fails.
    fn visit_node(&mut self, node: &Node) -> Result<(), Self::Error> {
        match node {
            Node::Text(text) => self.visit_text(&text.content),
            Node::Element(element) => self.visit_element(element),
        }
    }

    /// Visit an element: its start, its children in order, then its end.
    ///
    /// # Errors
    ///
    /// Returns an error if visiting the element or any child fails.
    fn visit_element(&mut self, element: &Element) -> Result<(), Self::Error> {
        self.visit_element_start(element)?;
        self.visit_children(&element.children)?;
        self.visit_element_end(element)
    }

    /// Visit a sequence of sibling nodes in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if visiting any node fails.
    fn visit_children(&mut self, nodes: &[Node]) -> Result<(), Self::Error> {
        for node in nodes {
            self.visit_node(node)?;
        }
        Ok(())
    }

    /// Called when entering an element, before its children.
    ///
    /// # Errors
    ///
    /// Returns an error if conversion of the element fails.
    fn visit_element_start(&mut self, element: &Element) -> Result<(), Self::Error>;

    /// Called when leaving an element, after its children.
    ///
    /// # Errors
    ///
    /// Returns an error if conversion of the element fails.
    fn visit_element_end(&mut self, element: &Element) -> Result<(), Self::Error>;

    /// Visit a run of literal text.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the text fails.
    fn visit_text(&mut self, text: &str) -> Result<(), Self::Error>;
}
