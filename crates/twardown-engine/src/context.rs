//! Per-conversion state.
//!
//! A [`ConvertContext`] is created empty for each conversion, threaded
//! through both processor chains, and dismantled into the conversion
//! result. Nothing in it outlives the conversion.

use std::collections::HashMap;

use serde::Serialize;

/// Start/end-of-text markers delimit stash placeholders so they cannot
/// collide with document text.
const STX: char = '\u{0002}';
const ETX: char = '\u{0003}';

/// Metadata extracted from the document's front matter.
///
/// Keys map to ordered value lists; repeated keys and continuation
/// lines append values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: HashMap<String, Vec<String>>,
}

impl Metadata {
    /// Create an empty metadata map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under a key, creating the key if needed.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// All values recorded for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// First value recorded for a key.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(<[String]>::first).map(String::as_str)
    }

    /// Whether any key was recorded.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over keys and their value lists.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

/// Store for pre-rendered HTML fragments.
///
/// Preprocessors that render content up front (fenced code) store the
/// HTML here and leave a placeholder line in the document; after
/// serialization the placeholders are swapped back for the fragments.
#[derive(Clone, Debug, Default)]
pub struct HtmlStash {
    fragments: Vec<String>,
}

impl HtmlStash {
    /// Store a fragment and return the placeholder standing in for it.
    pub fn store(&mut self, html: impl Into<String>) -> String {
        let marker = placeholder(self.fragments.len());
        self.fragments.push(html.into());
        marker
    }

    /// Number of stored fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the stash is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Replace all placeholders in `html` with their fragments.
    ///
    /// A placeholder wrapped in a paragraph is replaced together with
    /// the paragraph frame, since the fragment is already block-level.
    pub fn restore(&self, html: &mut String) {
        for (index, fragment) in self.fragments.iter().enumerate() {
            let marker = placeholder(index);
            let wrapped = format!("<p>{marker}</p>");
            if html.contains(&wrapped) {
                *html = html.replace(&wrapped, fragment);
            } else if html.contains(&marker) {
                *html = html.replace(&marker, fragment);
            }
        }
    }
}

fn placeholder(index: usize) -> String {
    format!("{STX}twd:{index}{ETX}")
}

/// Table of contents entry collected from a heading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// State shared by all processors during one conversion.
pub struct ConvertContext {
    /// Metadata map populated during preprocessing.
    pub metadata: Metadata,
    /// Stash of pre-rendered HTML fragments.
    pub stash: HtmlStash,
    /// Table of contents entries collected during block processing.
    pub toc: Vec<TocEntry>,
    /// Diagnostics surfaced on the conversion result.
    pub warnings: Vec<String>,
    id_counts: HashMap<String, usize>,
}

impl Default for ConvertContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertContext {
    /// Create the empty per-conversion state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: Metadata::new(),
            stash: HtmlStash::default(),
            toc: Vec::new(),
            warnings: Vec::new(),
            id_counts: HashMap::new(),
        }
    }

    /// Generate a document-unique anchor ID for heading text.
    ///
    /// Repeated headings get `-1`, `-2`, … suffixes.
    pub fn make_id(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.id_counts.entry(base.clone()).or_default();
        let id = match *count {
            0 => base,
            n => format!("{base}-{n}"),
        };
        *count += 1;
        id
    }

    /// Record a warning on the conversion and log it.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.warnings.push(message);
    }
}

/// Convert text to a URL-safe slug.
///
/// Lowercases ASCII alphanumerics, collapses whitespace, dashes and
/// underscores into single dashes, and drops everything else.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_')
            && !slug.is_empty()
            && !slug.ends_with('-')
        {
            slug.push('-');
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}
