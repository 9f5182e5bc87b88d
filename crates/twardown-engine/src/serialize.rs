//! HTML serialization of the element tree.

use std::fmt::Write;

use crate::inline::render_inline;
use crate::tree::Node;

/// Elements without a closing tag. Their text serializes after the tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

/// Elements whose text is escaped literally instead of span-rendered.
const VERBATIM_TAGS: &[&str] = &["code", "pre"];

/// Serialize a document tree to HTML.
///
/// The passed node is the document container: only its children are
/// written, separated by newlines.
#[must_use]
pub fn serialize(document: &Node) -> String {
    let mut out = String::with_capacity(256);
    for (index, child) in document.children.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        write_node(child, false, &mut out);
    }
    out
}

fn write_node(node: &Node, verbatim: bool, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);
    for (name, value) in &node.attrs {
        write!(out, r#" {name}="{}""#, escape_html(value)).unwrap();
    }
    out.push('>');

    if VOID_TAGS.contains(&node.tag.as_str()) {
        // Void elements hold no content; text lands in tail position.
        if let Some(text) = &node.text {
            write_content(text, verbatim, out);
        }
    } else {
        let inner_verbatim = verbatim || VERBATIM_TAGS.contains(&node.tag.as_str());
        if let Some(text) = &node.text {
            write_content(text, inner_verbatim, out);
        }
        for child in &node.children {
            write_node(child, inner_verbatim, out);
        }
        write!(out, "</{}>", node.tag).unwrap();
    }

    if let Some(tail) = &node.tail {
        write_content(tail, verbatim, out);
    }
}

fn write_content(text: &str, verbatim: bool, out: &mut String) {
    if verbatim {
        out.push_str(&escape_html(text));
    } else {
        out.push_str(&render_inline(text));
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
