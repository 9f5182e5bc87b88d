//! Table of contents.
//!
//! A `[TOC]` block becomes an empty `<nav class="toc">` placeholder
//! during block processing; once the whole document has been parsed
//! (and all headings collected), [`inject_toc`] fills every placeholder
//! with a nested list of the collected entries.

use crate::block::{BlockProcessor, BlockQueue};
use crate::context::{ConvertContext, TocEntry};
use crate::tree::Node;

const MARKER: &str = "[TOC]";

/// Block processor recognizing the `[TOC]` marker.
#[derive(Clone, Copy, Debug, Default)]
pub struct TocProcessor;

impl TocProcessor {
    /// Create the TOC marker processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BlockProcessor for TocProcessor {
    fn test(&self, _parent: &Node, block: &str) -> bool {
        block.trim() == MARKER
    }

    fn run(&mut self, _ctx: &mut ConvertContext, parent: &mut Node, blocks: &mut BlockQueue) {
        if blocks.pop_front().is_some() {
            parent.push(Node::new("nav").with_attr("class", "toc"));
        }
    }
}

/// Fill empty `nav.toc` placeholders with a nested entry list.
pub fn inject_toc(document: &mut Node, entries: &[TocEntry]) {
    for child in &mut document.children {
        if child.tag == "nav" && child.attr("class") == Some("toc") && child.children.is_empty() {
            if let Some(list) = build_list(entries) {
                child.push(list);
            }
        }
    }
}

fn build_list(entries: &[TocEntry]) -> Option<Node> {
    let level = entries.iter().map(|entry| entry.level).min()?;
    let mut position = 0;
    Some(build_level(entries, &mut position, level))
}

fn build_level(entries: &[TocEntry], position: &mut usize, level: u8) -> Node {
    let mut list = Node::new("ul");
    while let Some(entry) = entries.get(*position) {
        if entry.level < level {
            break;
        }
        if entry.level > level {
            let nested = build_level(entries, position, entry.level);
            match list.children.last_mut() {
                Some(item) => item.push(nested),
                None => {
                    let mut item = Node::new("li");
                    item.push(nested);
                    list.push(item);
                }
            }
            continue;
        }

        *position += 1;
        let mut link = Node::new("a").with_attr("href", format!("#{}", entry.id));
        link.text = Some(entry.title.clone());
        let mut item = Node::new("li");
        item.push(link);
        list.push(item);
    }
    list
}
