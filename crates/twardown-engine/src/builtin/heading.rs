//! ATX headings.

use crate::block::{BlockProcessor, BlockQueue};
use crate::context::{ConvertContext, TocEntry};
use crate::tree::Node;

/// Block processor for `#`-style headings.
///
/// With `assign_ids` set (table-of-contents support), each heading gets
/// a document-unique slug ID and is recorded as a [`TocEntry`].
#[derive(Clone, Copy, Debug)]
pub struct HeadingProcessor {
    assign_ids: bool,
}

impl HeadingProcessor {
    /// Create the heading processor.
    #[must_use]
    pub fn new(assign_ids: bool) -> Self {
        Self { assign_ids }
    }
}

impl BlockProcessor for HeadingProcessor {
    fn test(&self, _parent: &Node, block: &str) -> bool {
        parse_heading(block.lines().next().unwrap_or("")).is_some()
    }

    fn run(&mut self, ctx: &mut ConvertContext, parent: &mut Node, blocks: &mut BlockQueue) {
        let Some(block) = blocks.pop_front() else {
            return;
        };
        let (line, rest) = match block.split_once('\n') {
            Some((line, rest)) => (line.to_owned(), Some(rest.to_owned())),
            None => (block, None),
        };
        let Some((level, text)) = parse_heading(&line) else {
            ctx.warn("heading processor claimed a non-heading block");
            return;
        };

        let mut heading = Node::with_text(format!("h{level}"), text.clone());
        if self.assign_ids {
            let id = ctx.make_id(&text);
            heading.set_attr("id", id.clone());
            ctx.toc.push(TocEntry {
                level,
                title: text,
                id,
            });
        }
        parent.push(heading);

        // The rest of the block is reprocessed on its own.
        if let Some(rest) = rest
            && !rest.trim().is_empty()
        {
            blocks.push_front(rest);
        }
    }
}

fn parse_heading(line: &str) -> Option<(u8, String)> {
    let trimmed = line.trim();
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }

    // Strip an optional closing hash run.
    let mut text = rest.trim();
    let stripped = text.trim_end_matches('#');
    if stripped.len() < text.len() && (stripped.is_empty() || stripped.ends_with(' ')) {
        text = stripped.trim_end();
    }

    Some((u8::try_from(level).ok()?, text.to_owned()))
}
