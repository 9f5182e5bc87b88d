//! Block-structure processors.

use std::collections::VecDeque;

use crate::context::ConvertContext;
use crate::tree::Node;

/// Queue of blank-line-separated text blocks awaiting processing.
pub type BlockQueue = VecDeque<String>;

/// A recognizer for one kind of block-level structure.
///
/// For each block at the front of the queue, processors are tried in
/// descending registration priority; the first whose [`test`] succeeds
/// gets to [`run`]. `run` must consume at least one block and may push
/// unconsumed remainder text back onto the front of the queue.
///
/// [`test`]: BlockProcessor::test
/// [`run`]: BlockProcessor::run
pub trait BlockProcessor {
    /// Whether this processor claims the block at the front of the queue.
    fn test(&self, parent: &Node, block: &str) -> bool;

    /// Consume the claimed block, appending elements to `parent`.
    fn run(&mut self, ctx: &mut ConvertContext, parent: &mut Node, blocks: &mut BlockQueue);
}

/// Split preprocessed lines into blank-line-separated blocks.
#[must_use]
pub fn split_blocks(lines: &[String]) -> BlockQueue {
    let mut blocks = BlockQueue::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push_back(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push_back(current.join("\n"));
    }
    blocks
}
