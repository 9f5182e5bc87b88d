//! Provenance front matter.
//!
//! Every converted document should carry a `this_file` front-matter
//! field naming its source file. Documents that already open with a
//! front-matter block are never rewritten, not even when the block
//! lacks the field or is missing its closing delimiter, so the
//! preprocessor only ever acts on documents with no front matter at
//! all. That precedence also makes it idempotent: a second run sees
//! the front matter it synthesized and leaves it alone.

use twardown_engine::{ConvertContext, Preprocessor};

/// Registration priority; ahead of the metadata extractor so the
/// synthesized block is still recognized as front matter downstream.
pub const MAGIC_RECORD_PRIORITY: i32 = 175;

const DELIMITER: &str = "---";

/// Preprocessor inserting a `this_file` provenance record.
#[derive(Clone, Debug)]
pub struct MagicRecordPreprocessor {
    filename: String,
}

impl MagicRecordPreprocessor {
    /// Create the preprocessor for a source filename.
    #[must_use]
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

impl Preprocessor for MagicRecordPreprocessor {
    fn run(&mut self, _ctx: &mut ConvertContext, lines: Vec<String>) -> Vec<String> {
        let Some(first) = lines.first() else {
            return lines;
        };
        if first.trim() == DELIMITER {
            // Existing front matter is left exactly as-is.
            return lines;
        }

        let mut out = Vec::with_capacity(lines.len() + 4);
        out.push(DELIMITER.to_owned());
        out.push(format!("this_file: {}", self.filename));
        out.push(DELIMITER.to_owned());
        out.push(String::new());
        out.extend(lines);
        out
    }
}
