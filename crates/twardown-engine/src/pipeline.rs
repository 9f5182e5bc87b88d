//! Pipeline wiring and the conversion driver.

use serde::Serialize;

use crate::block::{BlockProcessor, split_blocks};
use crate::builtin::inject_toc;
use crate::context::{ConvertContext, Metadata, TocEntry};
use crate::preprocess::Preprocessor;
use crate::registry::{PriorityRegistry, RegistryError};
use crate::serialize::serialize;
use crate::tree::Node;

/// Result of converting a document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Rendered HTML.
    pub html: String,
    /// Metadata extracted from front matter.
    pub metadata: Metadata,
    /// Table of contents entries collected from headings.
    pub toc: Vec<TocEntry>,
    /// Diagnostics generated during conversion.
    pub warnings: Vec<String>,
}

/// An assembled conversion pipeline.
///
/// A pipeline owns its processor chains; registration happens at
/// assembly time and nothing re-toggles afterwards. Per-conversion
/// state lives in a fresh [`ConvertContext`] inside [`convert`], so an
/// instance can run any number of conversions in sequence.
///
/// [`convert`]: Pipeline::convert
pub struct Pipeline {
    preprocessors: PriorityRegistry<Box<dyn Preprocessor>>,
    block_processors: PriorityRegistry<Box<dyn BlockProcessor>>,
    toc_injection: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create a pipeline with empty chains.
    #[must_use]
    pub fn new() -> Self {
        Self {
            preprocessors: PriorityRegistry::new(),
            block_processors: PriorityRegistry::new(),
            toc_injection: false,
        }
    }

    /// Register a preprocessor under a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register_preprocessor(
        &mut self,
        name: &str,
        priority: i32,
        processor: Box<dyn Preprocessor>,
    ) -> Result<(), RegistryError> {
        self.preprocessors.register(name, priority, processor)
    }

    /// Register a block processor under a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register_block_processor(
        &mut self,
        name: &str,
        priority: i32,
        processor: Box<dyn BlockProcessor>,
    ) -> Result<(), RegistryError> {
        self.block_processors.register(name, priority, processor)
    }

    /// Enable filling `nav.toc` placeholders after block processing.
    pub fn set_toc_injection(&mut self, enabled: bool) {
        self.toc_injection = enabled;
    }

    /// Run the full pipeline over a document.
    pub fn convert(&mut self, input: &str) -> Conversion {
        let mut ctx = ConvertContext::new();

        let normalized = input.replace("\r\n", "\n");
        let mut lines: Vec<String> = normalized.lines().map(str::to_owned).collect();
        for registration in self.preprocessors.iter_mut() {
            lines = registration.item_mut().run(&mut ctx, lines);
        }

        let mut blocks = split_blocks(&lines);
        let mut document = Node::new("doc");
        while let Some(front) = blocks.front().cloned() {
            let claimed = self
                .block_processors
                .iter()
                .position(|registration| registration.item().test(&document, &front));
            let Some(index) = claimed else {
                blocks.pop_front();
                ctx.warn("no block processor claimed a block; dropping it");
                continue;
            };
            let Some(registration) = self.block_processors.get_mut(index) else {
                break;
            };
            let name = registration.name().to_owned();
            let before = blocks.len();
            registration.item_mut().run(&mut ctx, &mut document, &mut blocks);
            if blocks.len() >= before && blocks.front() == Some(&front) {
                blocks.pop_front();
                ctx.warn(format!(
                    "block processor '{name}' made no progress; dropping a block"
                ));
            }
        }

        if self.toc_injection {
            inject_toc(&mut document, &ctx.toc);
        }

        let mut html = serialize(&document);
        ctx.stash.restore(&mut html);

        tracing::debug!(
            elements = document.children.len(),
            warnings = ctx.warnings.len(),
            "conversion finished"
        );

        Conversion {
            html,
            metadata: ctx.metadata,
            toc: ctx.toc,
            warnings: ctx.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::block::BlockQueue;
    use crate::builtin::{
        FENCED_CODE_PRIORITY, FencedCodePreprocessor, HEADING_PRIORITY, HeadingProcessor,
        LIST_PRIORITY, ListProcessor, META_PRIORITY, MetaPreprocessor, PARAGRAPH_PRIORITY,
        ParagraphProcessor, TABLE_PRIORITY, TOC_PRIORITY, TableProcessor, TocProcessor,
    };

    fn full_pipeline() -> Pipeline {
        let mut pipeline = Pipeline::new();
        pipeline
            .register_preprocessor("meta", META_PRIORITY, Box::new(MetaPreprocessor::new()))
            .unwrap();
        pipeline
            .register_preprocessor(
                "fenced-code",
                FENCED_CODE_PRIORITY,
                Box::new(FencedCodePreprocessor::new(true)),
            )
            .unwrap();
        pipeline
            .register_block_processor(
                "heading",
                HEADING_PRIORITY,
                Box::new(HeadingProcessor::new(true)),
            )
            .unwrap();
        pipeline
            .register_block_processor("table", TABLE_PRIORITY, Box::new(TableProcessor::new()))
            .unwrap();
        pipeline
            .register_block_processor("list", LIST_PRIORITY, Box::new(ListProcessor::new()))
            .unwrap();
        pipeline
            .register_block_processor("toc", TOC_PRIORITY, Box::new(TocProcessor::new()))
            .unwrap();
        pipeline
            .register_block_processor(
                "paragraph",
                PARAGRAPH_PRIORITY,
                Box::new(ParagraphProcessor::new()),
            )
            .unwrap();
        pipeline.set_toc_injection(true);
        pipeline
    }

    #[test]
    fn test_empty_input() {
        let conversion = full_pipeline().convert("");
        assert_eq!(conversion.html, "");
        assert!(conversion.metadata.is_empty());
        assert!(conversion.toc.is_empty());
        assert!(conversion.warnings.is_empty());
    }

    #[test]
    fn test_paragraphs_and_headings() {
        let conversion = full_pipeline().convert("# Title\n\nFirst paragraph.\n\nSecond one.");
        assert_eq!(
            conversion.html,
            "<h1 id=\"title\">Title</h1>\n<p>First paragraph.</p>\n<p>Second one.</p>"
        );
        assert_eq!(conversion.toc.len(), 1);
    }

    #[test]
    fn test_front_matter_extracted() {
        let conversion = full_pipeline().convert("---\ntitle: Hello\n---\nBody text.");
        assert_eq!(conversion.metadata.first("title"), Some("Hello"));
        assert_eq!(conversion.html, "<p>Body text.</p>");
    }

    #[test]
    fn test_fenced_code_survives_blank_lines() {
        let conversion = full_pipeline().convert("```rust\nfn a() {}\n\nfn b() {}\n```");
        assert!(conversion.html.contains("language-rust"));
        assert!(conversion.html.contains("fn a() {}\n\nfn b() {}"));
        assert!(!conversion.html.contains("<p>"));
    }

    #[test]
    fn test_table_rendered() {
        let conversion = full_pipeline().convert("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(conversion.html.starts_with("<table>"));
        assert!(conversion.html.contains("<thead>"));
        assert!(conversion.html.contains("<tbody>"));
    }

    #[test]
    fn test_toc_injected() {
        let conversion = full_pipeline().convert("[TOC]\n\n# One\n\n## Two");
        assert!(conversion.html.contains(r#"<nav class="toc">"#));
        assert!(conversion.html.contains(r##"<a href="#one">One</a>"##));
        assert!(conversion.html.contains(r##"<a href="#two">Two</a>"##));
    }

    #[test]
    fn test_crlf_normalized() {
        let conversion = full_pipeline().convert("# Title\r\n\r\nBody");
        assert!(conversion.html.contains("<h1"));
        assert!(conversion.html.contains("<p>Body</p>"));
    }

    #[test]
    fn test_unclaimed_block_dropped_with_warning() {
        // A pipeline with no block processors cannot claim anything.
        let mut pipeline = Pipeline::new();
        let conversion = pipeline.convert("orphan block");
        assert_eq!(conversion.html, "");
        assert_eq!(conversion.warnings.len(), 1);
        assert!(conversion.warnings[0].contains("no block processor"));
    }

    #[test]
    fn test_stalled_processor_dropped_with_warning() {
        struct Stalled;
        impl BlockProcessor for Stalled {
            fn test(&self, _parent: &Node, _block: &str) -> bool {
                true
            }
            fn run(
                &mut self,
                _ctx: &mut ConvertContext,
                _parent: &mut Node,
                _blocks: &mut BlockQueue,
            ) {
            }
        }

        let mut pipeline = Pipeline::new();
        pipeline
            .register_block_processor("stalled", 100, Box::new(Stalled))
            .unwrap();
        let conversion = pipeline.convert("block");
        assert_eq!(conversion.warnings.len(), 1);
        assert!(conversion.warnings[0].contains("stalled"));
    }

    #[test]
    fn test_custom_preprocessor_runs_in_priority_order() {
        struct Tag(&'static str);
        impl Preprocessor for Tag {
            fn run(&mut self, _ctx: &mut ConvertContext, mut lines: Vec<String>) -> Vec<String> {
                lines.push(self.0.to_owned());
                lines
            }
        }

        let mut pipeline = Pipeline::new();
        pipeline
            .register_block_processor(
                "paragraph",
                PARAGRAPH_PRIORITY,
                Box::new(ParagraphProcessor::new()),
            )
            .unwrap();
        pipeline
            .register_preprocessor("second", 50, Box::new(Tag("two")))
            .unwrap();
        pipeline
            .register_preprocessor("first", 150, Box::new(Tag("one")))
            .unwrap();

        let conversion = pipeline.convert("zero");
        assert_eq!(conversion.html, "<p>zero\none\ntwo</p>");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut pipeline = Pipeline::new();
        pipeline
            .register_preprocessor("meta", META_PRIORITY, Box::new(MetaPreprocessor::new()))
            .unwrap();
        let err = pipeline
            .register_preprocessor("meta", 10, Box::new(MetaPreprocessor::new()))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("meta".to_owned()));
    }

    #[test]
    fn test_instance_reusable_across_conversions() {
        let mut pipeline = full_pipeline();
        let first = pipeline.convert("---\na: 1\n---\n# H");
        let second = pipeline.convert("plain");

        assert_eq!(first.metadata.first("a"), Some("1"));
        assert!(second.metadata.is_empty());
        assert_eq!(second.html, "<p>plain</p>");
        // Heading ID counters reset between conversions.
        let third = pipeline.convert("# H");
        assert!(third.html.contains(r#"id="h""#));
    }
}
