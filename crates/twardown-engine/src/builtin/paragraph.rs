//! Paragraph fallback.

use crate::block::{BlockProcessor, BlockQueue};
use crate::context::ConvertContext;
use crate::tree::Node;

/// Catch-all block processor wrapping blocks in `<p>`.
///
/// Claims every block, so it must be registered at the lowest priority
/// in the chain.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParagraphProcessor;

impl ParagraphProcessor {
    /// Create the paragraph processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BlockProcessor for ParagraphProcessor {
    fn test(&self, _parent: &Node, _block: &str) -> bool {
        true
    }

    fn run(&mut self, _ctx: &mut ConvertContext, parent: &mut Node, blocks: &mut BlockQueue) {
        if let Some(block) = blocks.pop_front() {
            parent.push(Node::with_text("p", block));
        }
    }
}
