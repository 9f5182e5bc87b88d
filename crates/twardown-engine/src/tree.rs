//! Element tree for block-level document structure.
//!
//! Block processors build the document as a tree of [`Node`]s; the
//! serializer consumes it. The shape is the classic element-tree model:
//! a tag, attributes, optional text, an optional tail rendered after
//! the closing tag, and ordered children. The tail exists so that a
//! void element (a checkbox, say) can carry trailing text without a
//! synthetic wrapper node.

use std::collections::BTreeMap;

/// A single element in the document tree.
///
/// Attributes live in a `BTreeMap` so serialization order is
/// deterministic regardless of insertion order. A node owns its
/// children exclusively; the document root is owned by the conversion
/// that created it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    /// Element tag, e.g. `"p"` or `"ul"`.
    pub tag: String,
    /// Element attributes.
    pub attrs: BTreeMap<String, String>,
    /// Text content, serialized directly after the opening tag.
    pub text: Option<String>,
    /// Trailing text, serialized after the closing tag.
    pub tail: Option<String>,
    /// Ordered child elements.
    pub children: Vec<Node>,
}

impl Node {
    /// Create an empty element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Create an element with text content.
    #[must_use]
    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Set an attribute, builder style.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Append a child element.
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }
}
