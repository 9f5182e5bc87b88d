//! Task lists.
//!
//! Recognizes `- [ ]` / `- [x]` checkbox syntax and renders it as
//! structured markup, distinct from plain bullet lists:
//!
//! ```html
//! <ul class="task-list">
//!   <li class="task-list-item"><input type="checkbox">Buy milk</li>
//!   <li class="task-list-item"><input checked="checked" type="checkbox">Walk dog</li>
//! </ul>
//! ```

use twardown_engine::{BlockProcessor, BlockQueue, ConvertContext, Node};

/// Registration priority; ahead of the generic list processor so
/// checkbox blocks are claimed before plain bullet handling.
pub const TASK_LIST_PRIORITY: i32 = 175;

const UNCHECKED: &str = "- [ ]";
const CHECKED: &str = "- [x]";

/// Block processor for checkbox lists.
///
/// Only the block's first line decides the claim; once claimed, every
/// line is rendered by its own marker. The `x` is case-sensitive. A
/// line with no marker becomes a plain list item: one leading bullet
/// is stripped and the text is kept, with no checkbox and no item
/// class.
#[derive(Clone, Copy, Debug, Default)]
pub struct TaskListProcessor;

impl TaskListProcessor {
    /// Create the task-list processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BlockProcessor for TaskListProcessor {
    fn test(&self, _parent: &Node, block: &str) -> bool {
        marker(block.lines().next().unwrap_or("")).is_some()
    }

    fn run(&mut self, _ctx: &mut ConvertContext, parent: &mut Node, blocks: &mut BlockQueue) {
        let Some(block) = blocks.pop_front() else {
            return;
        };

        let mut list = Node::new("ul").with_attr("class", "task-list");
        for line in block.lines() {
            list.push(match marker(line) {
                Some((checked, text)) => task_item(checked, text),
                None => plain_item(line),
            });
        }
        parent.push(list);
    }
}

/// Checked state and trailing text, when the line carries a marker.
fn marker(line: &str) -> Option<(bool, &str)> {
    let trimmed = line.trim();
    trimmed
        .strip_prefix(UNCHECKED)
        .map(|text| (false, text))
        .or_else(|| trimmed.strip_prefix(CHECKED).map(|text| (true, text)))
}

fn task_item(checked: bool, text: &str) -> Node {
    let mut checkbox = Node::new("input").with_attr("type", "checkbox");
    if checked {
        checkbox.set_attr("checked", "checked");
    }
    let text = text.trim();
    if !text.is_empty() {
        checkbox.tail = Some(text.to_owned());
    }
    let mut item = Node::new("li").with_attr("class", "task-list-item");
    item.push(checkbox);
    item
}

fn plain_item(line: &str) -> Node {
    let trimmed = line.trim();
    let text = trimmed.strip_prefix("- ").unwrap_or(trimmed);
    Node::with_text("li", text)
}
