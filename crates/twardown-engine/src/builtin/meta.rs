//! Front-matter metadata extraction.
//!
//! Consumes a leading `---`-delimited (or bare) run of `key: value`
//! lines into the conversion's metadata map. Indented continuation
//! lines append further values to the previous key. Extraction stops
//! at a closing `---`/`...`, a blank line, or the first line that is
//! neither; such a line is left for block parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::ConvertContext;
use crate::preprocess::Preprocessor;

static BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-{3}(\s.*)?$").expect("valid pattern"));
static END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-{3}|\.{3})(\s.*)?$").expect("valid pattern"));
static META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ ]{0,3}(?P<key>[A-Za-z0-9_-]+):\s*(?P<value>.*)$").expect("valid pattern")
});
static META_MORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ ]{4,}(?P<value>.*)$").expect("valid pattern"));

/// Preprocessor that extracts leading front matter into metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct MetaPreprocessor;

impl MetaPreprocessor {
    /// Create the metadata preprocessor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Preprocessor for MetaPreprocessor {
    fn run(&mut self, ctx: &mut ConvertContext, lines: Vec<String>) -> Vec<String> {
        if lines.is_empty() {
            return lines;
        }

        let mut consumed = 0;
        if BEGIN_RE.is_match(&lines[0]) {
            consumed = 1;
        }

        let mut key: Option<String> = None;
        while consumed < lines.len() {
            let line = &lines[consumed];
            if line.trim().is_empty() || END_RE.is_match(line) {
                consumed += 1;
                break;
            }
            if let Some(caps) = META_RE.captures(line) {
                let name = caps["key"].to_lowercase();
                ctx.metadata.append(name.clone(), caps["value"].trim());
                key = Some(name);
                consumed += 1;
            } else if let (Some(name), Some(caps)) = (&key, META_MORE_RE.captures(line)) {
                ctx.metadata.append(name.clone(), caps["value"].trim());
                consumed += 1;
            } else {
                // Not metadata; leave the line for block parsing.
                break;
            }
        }

        let mut lines = lines;
        lines.split_off(consumed) // the remainder is the document body
    }
}
