// src/core/html.rs
//! Query seam between extraction and the HTML parser.
//!
//! Extraction only needs four things from a parsed page: "all matches",
//! "first match or none", a node's text and a node's attribute. [`Page`] and
//! [`PageNode`] name exactly those, with `scraper` implementations below.
//! Tests can implement them with stubs.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

/// A parsed document that can be queried from the root.
pub trait Page {
    type Node<'a>: PageNode
    where
        Self: 'a;

    /// All descendants matching `sel`, in document order.
    fn find_all<'a>(&'a self, sel: &Selector) -> Vec<Self::Node<'a>>;

    /// First descendant matching `sel`, or none.
    fn find_first<'a>(&'a self, sel: &Selector) -> Option<Self::Node<'a>>;
}

/// A node inside a [`Page`].
pub trait PageNode: Sized {
    /// First descendant matching `sel`, or none.
    fn find_first(&self, sel: &Selector) -> Option<Self>;

    /// Concatenated descendant text, untrimmed.
    fn text(&self) -> String;

    /// Named attribute value, if the attribute is present.
    fn attr(&self, name: &str) -> Option<String>;
}

impl Page for Html {
    type Node<'a> = ElementRef<'a>;

    fn find_all<'a>(&'a self, sel: &Selector) -> Vec<ElementRef<'a>> {
        self.select(sel).collect()
    }

    fn find_first<'a>(&'a self, sel: &Selector) -> Option<ElementRef<'a>> {
        self.select(sel).next()
    }
}

impl PageNode for ElementRef<'_> {
    fn find_first(&self, sel: &Selector) -> Option<Self> {
        self.select(sel).next()
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_owned)
    }
}

/// Parse a full document. Parsing is lenient: malformed markup still yields a tree.
pub fn parse(html: &str) -> Html {
    Html::parse_document(html)
}

/// Node text with whitespace runs folded to single spaces; `None` when blank.
pub fn text_of<N: PageNode>(node: &N) -> Option<String> {
    let t = normalize_ws(&node.text());
    if t.is_empty() { None } else { Some(t) }
}

/// The `n`-th whitespace-separated token of the node's `class` attribute.
///
/// Rating widgets often encode the score as a class (`bubble bubble_45`).
pub fn class_token<N: PageNode>(node: &N, n: usize) -> Option<String> {
    node.attr("class")?
        .split_whitespace()
        .nth(n)
        .map(str::to_owned)
}
