//! A small owned markup tree.
//!
//! Rendering in finsight is a pure mapping from view state to [`Markup`].
//! Surfaces decide how to display the tree: as HTML, or as styled terminal
//! text.  All text and attribute values are escaped when serialized to HTML,
//! so backend-supplied strings are never interpreted as markup.

use std::fmt::Write;

use tera::escape_html;

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr"];

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    /// An element with a tag, classes and children.
    Element(Element),
    /// A text node.
    Text(String),
    /// A sequence of nodes with no wrapping element.
    Fragment(Vec<Markup>),
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    children: Vec<Markup>,
}

impl Element {
    /// Creates an element with no classes and no children.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Appends a child node.
    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Markup::Text(text.into()))
    }

    /// Appends every node in `children`.
    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }

    /// The element's tag name.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// The element's classes in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns true if the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The element's children.
    pub fn child_nodes(&self) -> &[Markup] {
        &self.children
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        Markup::Element(element)
    }
}

impl Markup {
    /// Creates a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Markup::Text(text.into())
    }

    /// Creates an empty fragment.
    pub fn empty() -> Self {
        Markup::Fragment(Vec::new())
    }

    /// Returns true if the tree contains no elements and no text.
    pub fn is_empty(&self) -> bool {
        match self {
            Markup::Element(_) => false,
            Markup::Text(text) => text.is_empty(),
            Markup::Fragment(nodes) => nodes.iter().all(Markup::is_empty),
        }
    }

    /// Serializes the tree as HTML, escaping all text and class values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Markup::Text(text) => out.push_str(&escape_html(text)),
            Markup::Fragment(nodes) => {
                for node in nodes {
                    node.write_html(out);
                }
            }
            Markup::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                if !element.classes.is_empty() {
                    let _ = write!(
                        out,
                        " class=\"{}\"",
                        escape_html(&element.classes.join(" "))
                    );
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }

    /// Concatenates every text node in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.visit(&mut |node| {
            if let Markup::Text(text) = node {
                out.push_str(text);
            }
        });
        out
    }

    /// Returns every element with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(&mut found, &|element| element.tag == tag);
        found
    }

    /// Returns every element carrying the given class, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(&mut found, &|element| element.has_class(class));
        found
    }

    fn collect<'a>(&'a self, found: &mut Vec<&'a Element>, pred: &dyn Fn(&Element) -> bool) {
        match self {
            Markup::Text(_) => {}
            Markup::Fragment(nodes) => {
                for node in nodes {
                    node.collect(found, pred);
                }
            }
            Markup::Element(element) => {
                if pred(element) {
                    found.push(element);
                }
                for child in &element.children {
                    child.collect(found, pred);
                }
            }
        }
    }

    fn visit(&self, f: &mut dyn FnMut(&Markup)) {
        f(self);
        match self {
            Markup::Text(_) => {}
            Markup::Fragment(nodes) => {
                for node in nodes {
                    node.visit(f);
                }
            }
            Markup::Element(element) => {
                for child in &element.children {
                    child.visit(f);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_all_special_characters() {
        let markup = Markup::text(r#"<a href="x">Tom & Jerry's</a>"#);
        assert_eq!(
            markup.to_html(),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;&#x2F;a&gt;"
        );
        assert_eq!(Markup::text("plain").to_html(), "plain");
    }

    #[test]
    fn nested_html() {
        let markup: Markup = Element::new("ul")
            .class("news-list")
            .child(Element::new("li").text("one"))
            .child(Element::new("li").text("two"))
            .into();
        assert_eq!(
            markup.to_html(),
            r#"<ul class="news-list"><li>one</li><li>two</li></ul>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let markup: Markup = Element::new("div").child(Element::new("hr")).into();
        assert_eq!(markup.to_html(), "<div><hr></div>");
    }

    #[test]
    fn text_nodes_are_escaped() {
        let markup: Markup = Element::new("p")
            .text("<script>alert(1)</script>")
            .into();
        assert_eq!(
            markup.to_html(),
            "<p>&lt;script&gt;alert(1)&lt;&#x2F;script&gt;</p>"
        );
    }

    #[test]
    fn class_values_are_escaped() {
        let markup: Markup = Element::new("span").class("\"><b").into();
        assert_eq!(markup.to_html(), r#"<span class="&quot;&gt;&lt;b"></span>"#);
    }

    #[test]
    fn text_content_and_queries() {
        let markup = Markup::Fragment(vec![
            Element::new("p").class("error").text("Error: ").into(),
            Markup::text("boom"),
        ]);
        assert_eq!(markup.text_content(), "Error: boom");
        assert_eq!(markup.find_all("p").len(), 1);
        assert_eq!(markup.find_by_class("error").len(), 1);
        assert!(markup.find_all("ul").is_empty());
    }

    #[test]
    fn emptiness() {
        assert!(Markup::empty().is_empty());
        assert!(Markup::Fragment(vec![Markup::text("")]).is_empty());
        assert!(!Markup::from(Element::new("hr")).is_empty());
    }
}
