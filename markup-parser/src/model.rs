//! The output tree: block elements containing inline content.

use serde::{
    Serialize,
    ser::{SerializeMap, Serializer},
};

/// Tag of the root element wrapping a parsed document.
pub const ROOT_TAG: &str = "div";
/// Class marking the root element as a document body container.
pub const ROOT_CLASS: &str = "body";
pub const PARAGRAPH_TAG: &str = "p";
pub const LINE_BREAK_TAG: &str = "br";

/// A unit of the output tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Text(Text),
    Element(Element),
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text<S: Into<String>>(content: S) -> Self {
        Self::Text(Text {
            content: content.into(),
        })
    }

    /// Create an element node with attributes and children in one go.
    ///
    /// ```
    /// use markup_parser::{Attributes, Node};
    ///
    /// let list = Node::element(
    ///     "ul",
    ///     Attributes::default(),
    ///     vec![
    ///         Node::element("li", Attributes::from([("id", "first")]), vec!["one".into()]),
    ///         Node::element("li", Attributes::default(), vec!["two".into()]),
    ///     ],
    /// );
    /// assert_eq!(list.text_content(), "onetwo");
    /// ```
    #[must_use]
    pub fn element<S: Into<String>>(tag: S, attributes: Attributes, children: Vec<Node>) -> Self {
        Self::Element(Element {
            tag: tag.into(),
            attributes,
            children,
        })
    }

    /// Concatenated content of every descendant text node, in document order.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut content = String::new();
        self.collect_text(&mut content);
        content
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&text.content),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(&text.content),
            Self::Element(_) => None,
        }
    }
}

impl From<&str> for Node {
    fn from(content: &str) -> Self {
        Self::text(content)
    }
}

impl From<String> for Node {
    fn from(content: String) -> Self {
        Self::text(content)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// A literal run of characters.
///
/// Content is owned rather than a span because canonicalization may change it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Text {
    pub content: String,
}

/// An element with a tag name, attributes and ordered children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::default(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.attributes.set(name, value);
        self
    }

    #[must_use]
    pub fn with_child<N: Into<Node>>(mut self, child: N) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn push<N: Into<Node>>(&mut self, child: N) {
        self.children.push(child.into());
    }

    /// Whether this element has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Ordered attribute mapping with unique names.
///
/// Iteration follows insertion order; setting an existing name replaces its value in
/// place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Set `name` to `value`, replacing any previous value for `name`.
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        let mut attributes = Self::default();
        for (name, value) in pairs {
            attributes.set(name, value);
        }
        attributes
    }
}

// Serialized as a JSON object; field order is preserved by serializing the pairs in
// insertion order.
impl Serialize for Attributes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            state.serialize_entry(name, value)?;
        }
        state.end()
    }
}

/// Destination for the nodes a rule produces.
pub trait Sink {
    fn emit(&mut self, node: Node);
}

impl Sink for Vec<Node> {
    fn emit(&mut self, node: Node) {
        self.push(node);
    }
}

impl Sink for Element {
    fn emit(&mut self, node: Node) {
        self.children.push(node);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_attributes_keep_insertion_order_and_unique_names() {
        let mut attributes = Attributes::default();
        attributes.set("class", "body");
        attributes.set("id", "main");
        attributes.set("class", "preview");
        assert_eq!(attributes.len(), 2);
        assert_eq!(
            attributes.iter().collect::<Vec<_>>(),
            vec![("class", "preview"), ("id", "main")]
        );
        assert_eq!(attributes.get("id"), Some("main"));
        assert_eq!(attributes.get("style"), None);
    }

    #[test]
    fn test_element_builder_turns_strings_into_text() {
        let element = Element::new("p")
            .with_attribute("class", "lead")
            .with_child("hello")
            .with_child(Element::new("br"))
            .with_child(String::from("world"));
        assert_eq!(
            Node::from(element),
            Node::element(
                "p",
                Attributes::from([("class", "lead")]),
                vec![
                    Node::text("hello"),
                    Node::element("br", Attributes::default(), vec![]),
                    Node::text("world"),
                ],
            )
        );
    }

    #[test]
    fn test_text_content_in_document_order() {
        let tree = Node::element(
            "div",
            Attributes::default(),
            vec![
                Node::element("p", Attributes::default(), vec!["a".into(), "b".into()]),
                Node::element("p", Attributes::default(), vec!["c".into()]),
            ],
        );
        assert_eq!(tree.text_content(), "abc");
    }

    #[test]
    fn test_serialize_node() {
        let tree = Node::element(
            "div",
            Attributes::from([("class", "body"), ("id", "x")]),
            vec![Node::text("hi")],
        );
        assert_eq!(
            serde_json::to_string(&tree).unwrap(),
            r#"{"type":"element","tag":"div","attributes":{"class":"body","id":"x"},"children":[{"type":"text","content":"hi"}]}"#
        );
    }

    #[test]
    fn test_sink_implementations() {
        let mut nodes: Vec<Node> = Vec::new();
        nodes.emit(Node::text("a"));
        let mut element = Element::new("p");
        element.emit(Node::text("b"));
        assert_eq!(nodes, vec![Node::text("a")]);
        assert_eq!(element.children, vec![Node::text("b")]);
    }
}
