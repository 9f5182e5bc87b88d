//! Twardown, an opinionated markdown flavor.
//!
//! Twardown converts markdown to HTML through the
//! [`twardown-engine`](twardown_engine) pipeline, layering two custom
//! behaviors over the stock processors:
//!
//! - **Magic records**: every document gains a `this_file` front-matter
//!   field naming its source file, surfaced in the conversion's
//!   metadata map.
//! - **Task lists**: `- [ ]` / `- [x]` blocks render as checkbox lists.
//!
//! Each behavior, including the built-in tables, fenced code, syntax
//! highlighting classes, table of contents and metadata handling, is
//! toggled through [`TwardownOptions`] at construction time.
//!
//! # Example
//!
//! ```
//! use twardown::{Twardown, TwardownOptions};
//!
//! let options = TwardownOptions {
//!     filename: "notes.md".to_owned(),
//!     ..TwardownOptions::default()
//! };
//! let mut twardown = Twardown::new(options)?;
//! let conversion = twardown.convert("- [x] ship it");
//!
//! assert!(conversion.html.contains(r#"class="task-list""#));
//! assert_eq!(conversion.metadata.first("this_file"), Some("notes.md"));
//! # Ok::<(), twardown::BuildError>(())
//! ```

mod magic_record;
mod options;
mod task_list;

use thiserror::Error;
use twardown_engine::builtin::{
    FENCED_CODE_PRIORITY, FencedCodePreprocessor, HEADING_PRIORITY, HeadingProcessor,
    LIST_PRIORITY, ListProcessor, META_PRIORITY, MetaPreprocessor, PARAGRAPH_PRIORITY,
    ParagraphProcessor, TABLE_PRIORITY, TOC_PRIORITY, TableProcessor, TocProcessor,
};
use twardown_engine::{Pipeline, RegistryError};

pub use magic_record::{MAGIC_RECORD_PRIORITY, MagicRecordPreprocessor};
pub use options::{OptionError, OptionValue, TwardownOptions};
pub use task_list::{TASK_LIST_PRIORITY, TaskListProcessor};
pub use twardown_engine::{Conversion, Metadata, TocEntry};

/// Error raised while assembling the pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A configuration option was rejected.
    #[error(transparent)]
    Option(#[from] OptionError),
    /// A processor registration was rejected.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// The assembled Twardown converter.
///
/// Construction wires every enabled behavior into the pipeline; there
/// is no runtime re-toggling afterwards. The instance can convert any
/// number of documents in sequence; per-conversion state (metadata,
/// stash, heading IDs) is created fresh inside each call.
pub struct Twardown {
    pipeline: Pipeline,
}

impl core::fmt::Debug for Twardown {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Twardown").finish_non_exhaustive()
    }
}

impl Twardown {
    /// Assemble a converter from a configuration record.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Registry`] if processor registration
    /// fails, e.g. when a caller-extended pipeline reuses a name.
    pub fn new(options: TwardownOptions) -> Result<Self, BuildError> {
        let mut pipeline = Pipeline::new();

        if options.magic_records {
            pipeline.register_preprocessor(
                "magic-records",
                MAGIC_RECORD_PRIORITY,
                Box::new(MagicRecordPreprocessor::new(options.filename.clone())),
            )?;
        }
        if options.meta {
            pipeline.register_preprocessor(
                "meta",
                META_PRIORITY,
                Box::new(MetaPreprocessor::new()),
            )?;
        }
        if options.fenced_code {
            pipeline.register_preprocessor(
                "fenced-code",
                FENCED_CODE_PRIORITY,
                Box::new(FencedCodePreprocessor::new(options.code_highlighting)),
            )?;
        }

        if options.task_lists {
            pipeline.register_block_processor(
                "task-lists",
                TASK_LIST_PRIORITY,
                Box::new(TaskListProcessor::new()),
            )?;
        }
        pipeline.register_block_processor(
            "heading",
            HEADING_PRIORITY,
            Box::new(HeadingProcessor::new(options.toc)),
        )?;
        if options.tables {
            pipeline.register_block_processor(
                "table",
                TABLE_PRIORITY,
                Box::new(TableProcessor::new()),
            )?;
        }
        pipeline.register_block_processor("list", LIST_PRIORITY, Box::new(ListProcessor::new()))?;
        if options.toc {
            pipeline.register_block_processor("toc", TOC_PRIORITY, Box::new(TocProcessor::new()))?;
            pipeline.set_toc_injection(true);
        }
        pipeline.register_block_processor(
            "paragraph",
            PARAGRAPH_PRIORITY,
            Box::new(ParagraphProcessor::new()),
        )?;

        Ok(Self { pipeline })
    }

    /// Assemble a converter with every behavior enabled.
    ///
    /// # Errors
    ///
    /// Propagates [`BuildError`] from [`Twardown::new`].
    pub fn with_defaults() -> Result<Self, BuildError> {
        Self::new(TwardownOptions::default())
    }

    /// Assemble a converter from name/value option pairs.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Option`] for an unrecognized option name
    /// or a wrongly-typed value.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (&'a str, OptionValue)>,
    {
        Self::new(TwardownOptions::from_pairs(pairs)?)
    }

    /// Convert a markdown document to HTML plus metadata.
    pub fn convert(&mut self, text: &str) -> Conversion {
        self.pipeline.convert(text)
    }

    /// The underlying pipeline, for registering further processors.
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn convert(text: &str) -> Conversion {
        Twardown::with_defaults().unwrap().convert(text)
    }

    fn convert_with(text: &str, configure: impl FnOnce(&mut TwardownOptions)) -> Conversion {
        let mut options = TwardownOptions::default();
        configure(&mut options);
        Twardown::new(options).unwrap().convert(text)
    }

    #[test]
    fn test_this_file_recorded_for_plain_document() {
        let conversion = convert_with("# Title\n\nBody", |options| {
            options.filename = "guide.md".to_owned();
        });
        assert_eq!(
            conversion.metadata.get("this_file"),
            Some(["guide.md".to_owned()].as_slice())
        );
        assert!(conversion.html.contains("<h1"));
    }

    #[test]
    fn test_existing_front_matter_not_rewritten() {
        let conversion = convert_with("---\ntitle: Kept\n---\nBody", |options| {
            options.filename = "guide.md".to_owned();
        });
        assert_eq!(conversion.metadata.first("title"), Some("Kept"));
        assert!(!conversion.metadata.contains_key("this_file"));
    }

    #[test]
    fn test_task_list_rendering() {
        let conversion = convert("- [ ] Buy milk\n- [x] Walk dog");
        let checkboxes = conversion.html.matches("<input").count();
        let checked = conversion.html.matches(r#"checked="checked""#).count();

        assert_eq!(checkboxes, 2);
        assert_eq!(checked, 1);
        assert!(conversion.html.contains(r#"<ul class="task-list">"#));
        assert!(conversion.html.contains("Buy milk"));
        assert!(conversion.html.contains("Walk dog"));
    }

    #[test]
    fn test_task_lists_disabled() {
        let conversion = convert_with("- [ ] Buy milk\n- [x] Walk dog", |options| {
            options.task_lists = false;
        });
        assert!(!conversion.html.contains("task-list"));
        assert!(!conversion.html.contains("<input"));
        assert!(conversion.html.contains("Buy milk"));
    }

    #[test]
    fn test_tables_disabled() {
        let table = "| A | B |\n|---|---|\n| 1 | 2 |";
        let enabled = convert(table);
        assert!(enabled.html.contains("<table>"));

        let disabled = convert_with(table, |options| options.tables = false);
        assert!(!disabled.html.contains("<table>"));
        assert!(disabled.html.contains("A"));
    }

    #[test]
    fn test_fenced_code_disabled() {
        let code = "```rust\nfn main() {}\n```";
        let enabled = convert(code);
        assert!(enabled.html.contains("<pre>"));

        let disabled = convert_with(code, |options| options.fenced_code = false);
        assert!(!disabled.html.contains("<pre>"));
        assert!(disabled.html.contains("fn main() {}"));
    }

    #[test]
    fn test_meta_disabled() {
        let text = "---\ntitle: x\n---\nBody";
        let disabled = convert_with(text, |options| {
            options.meta = false;
            options.magic_records = false;
        });
        assert!(disabled.metadata.is_empty());
        assert!(disabled.html.contains("Body"));
    }

    #[test]
    fn test_highlighting_disabled_keeps_pre() {
        let conversion = convert_with("```rust\nfn main() {}\n```", |options| {
            options.code_highlighting = false;
        });
        assert!(conversion.html.contains("<pre><code>"));
        assert!(!conversion.html.contains("language-rust"));
    }

    #[test]
    fn test_toc_enabled() {
        let conversion = convert("[TOC]\n\n# One\n\n## Two");
        assert!(conversion.html.contains(r#"<nav class="toc">"#));
        assert!(conversion.html.contains(r##"href="#one""##));
        assert_eq!(conversion.toc.len(), 2);
    }

    #[test]
    fn test_toc_disabled() {
        let conversion = convert_with("[TOC]\n\n# One", |options| options.toc = false);
        assert!(!conversion.html.contains("<nav"));
        assert!(conversion.html.contains("[TOC]"));
        assert!(!conversion.html.contains("id="));
        assert!(conversion.toc.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let conversion = convert("");
        assert_eq!(conversion.html, "");
        assert!(conversion.metadata.is_empty());
    }

    #[test]
    fn test_unknown_option_fails_construction() {
        let err = Twardown::from_pairs([("enable_everything", OptionValue::Bool(true))])
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::Option(OptionError::UnknownOption("enable_everything".to_owned()))
        );
    }

    #[test]
    fn test_magic_records_disabled() {
        let conversion = convert_with("Body", |options| {
            options.magic_records = false;
            options.filename = "guide.md".to_owned();
        });
        assert!(!conversion.metadata.contains_key("this_file"));
        assert_eq!(conversion.html, "<p>Body</p>");
    }

    #[test]
    fn test_magic_record_idempotent_through_pipeline() {
        // Feeding the synthesized front matter back through a second
        // conversion records the same provenance, not a duplicate.
        let mut converter = Twardown::new(TwardownOptions {
            filename: "a.md".to_owned(),
            ..TwardownOptions::default()
        })
        .unwrap();
        let with_front_matter = "---\nthis_file: a.md\n---\n\nBody";
        let conversion = converter.convert(with_front_matter);
        assert_eq!(
            conversion.metadata.get("this_file"),
            Some(["a.md".to_owned()].as_slice())
        );
    }

    #[test]
    fn test_mixed_document() {
        let text = "# Guide\n\n- [ ] unstarted\n- [x] finished\n\n| K | V |\n|---|---|\n| a | b |\n\n```sh\nls\n```";
        let conversion = convert_with(text, |options| {
            options.filename = "mixed.md".to_owned();
        });

        assert!(conversion.html.contains("<h1"));
        assert!(conversion.html.contains("task-list"));
        assert!(conversion.html.contains("<table>"));
        assert!(conversion.html.contains("language-sh"));
        assert_eq!(conversion.metadata.first("this_file"), Some("mixed.md"));
        assert!(conversion.warnings.is_empty());
    }

    #[test]
    fn test_custom_processor_via_pipeline_mut() {
        let mut converter = Twardown::with_defaults().unwrap();
        let err = converter
            .pipeline_mut()
            .register_block_processor("task-lists", 1, Box::new(TaskListProcessor::new()))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("task-lists".to_owned()));
    }
}
