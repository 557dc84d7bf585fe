//! A minimal element tree with escaped HTML serialization.
//!
//! Explicit factory calls and `child` appends replace the host DOM
//! conveniences the renderer would otherwise lean on. Text children
//! are always escaped; raw markup only enters through [`Element::raw`],
//! which the renderer reserves for the opt-in `enable_html` path.

use std::fmt;

use pulldown_cmark_escape::escape_html;

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    /// Escaped on serialization.
    Text(String),
    /// Serialized verbatim.
    Raw(String),
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_owned(),
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        if !class.is_empty() {
            self.classes.push(class.to_owned());
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_owned()));
        self
    }

    pub fn raw(mut self, html: impl Into<String>) -> Self {
        self.children.push(Node::Raw(html.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Non-consuming append, for loops building up a parent.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            push_escaped(out, &self.classes.join(" "));
            out.push('"');
        }
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            push_escaped(out, value);
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_html(out),
                Node::Text(text) => push_escaped(out, text),
                Node::Raw(html) => out.push_str(html),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn push_escaped(out: &mut String, text: &str) {
    let _ = escape_html(out, text);
}
