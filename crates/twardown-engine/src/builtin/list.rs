//! Bullet and ordered lists.
//!
//! Flat lists only: one marker per line, continuation lines fold into
//! the previous item. Nesting is out of scope for the block chain.

use crate::block::{BlockProcessor, BlockQueue};
use crate::context::ConvertContext;
use crate::tree::Node;

/// Block processor for `- ` / `* ` / `+ ` bullets and `1. ` ordered items.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListProcessor;

impl ListProcessor {
    /// Create the list processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

enum Item {
    Bullet(String),
    Ordered(u64, String),
}

impl BlockProcessor for ListProcessor {
    fn test(&self, _parent: &Node, block: &str) -> bool {
        parse_item(block.lines().next().unwrap_or("")).is_some()
    }

    fn run(&mut self, _ctx: &mut ConvertContext, parent: &mut Node, blocks: &mut BlockQueue) {
        let Some(block) = blocks.pop_front() else {
            return;
        };

        let mut list = match parse_item(block.lines().next().unwrap_or("")) {
            Some(Item::Ordered(start, _)) => {
                let mut list = Node::new("ol");
                if start != 1 {
                    list.set_attr("start", start.to_string());
                }
                list
            }
            _ => Node::new("ul"),
        };

        for line in block.lines() {
            match parse_item(line) {
                Some(Item::Bullet(text) | Item::Ordered(_, text)) => {
                    list.push(Node::with_text("li", text));
                }
                None => {
                    // Continuation line folds into the previous item.
                    if let Some(last) = list.children.last_mut() {
                        match &mut last.text {
                            Some(text) => {
                                text.push(' ');
                                text.push_str(line.trim());
                            }
                            None => last.text = Some(line.trim().to_owned()),
                        }
                    }
                }
            }
        }
        parent.push(list);
    }
}

fn parse_item(line: &str) -> Option<Item> {
    let trimmed = line.trim();
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Some(Item::Bullet(rest.trim().to_owned()));
        }
    }

    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits > 0
        && let Some(rest) = trimmed[digits..].strip_prefix(". ")
    {
        let number = trimmed[..digits].parse().ok()?;
        return Some(Item::Ordered(number, rest.trim().to_owned()));
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(block: &str) -> Node {
        let mut ctx = ConvertContext::new();
        let mut parent = Node::new("doc");
        let mut blocks = BlockQueue::from([block.to_owned()]);
        let mut processor = ListProcessor::new();
        assert!(processor.test(&parent, block));
        processor.run(&mut ctx, &mut parent, &mut blocks);
        parent.children.remove(0)
    }

    #[test]
    fn test_bullet_list() {
        let list = run("- one\n- two");
        assert_eq!(list.tag, "ul");
        assert_eq!(list.children.len(), 2);
        assert_eq!(list.children[0].text.as_deref(), Some("one"));
        assert_eq!(list.children[1].text.as_deref(), Some("two"));
    }

    #[test]
    fn test_star_and_plus_bullets() {
        assert_eq!(run("* a\n* b").tag, "ul");
        assert_eq!(run("+ a").tag, "ul");
    }

    #[test]
    fn test_ordered_list() {
        let list = run("1. first\n2. second");
        assert_eq!(list.tag, "ol");
        assert_eq!(list.attr("start"), None);
        assert_eq!(list.children.len(), 2);
    }

    #[test]
    fn test_ordered_list_start_attr() {
        let list = run("3. third\n4. fourth");
        assert_eq!(list.attr("start"), Some("3"));
    }

    #[test]
    fn test_continuation_folds_into_previous_item() {
        let list = run("- one\n  continued\n- two");
        assert_eq!(list.children.len(), 2);
        assert_eq!(list.children[0].text.as_deref(), Some("one continued"));
    }

    #[test]
    fn test_not_claimed_without_marker_space() {
        let processor = ListProcessor::new();
        let doc = Node::new("doc");
        assert!(!processor.test(&doc, "-no space"));
        assert!(!processor.test(&doc, "--- rule"));
        assert!(!processor.test(&doc, "1.missing"));
    }

    #[test]
    fn test_checkbox_text_kept_literal() {
        // With the task-list processor disabled, checkbox syntax is a
        // plain bullet whose text keeps the marker characters.
        let list = run("- [ ] Buy milk");
        assert_eq!(list.tag, "ul");
        assert_eq!(list.children[0].text.as_deref(), Some("[ ] Buy milk"));
    }
}
