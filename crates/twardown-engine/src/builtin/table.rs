//! Pipe tables.

use crate::block::{BlockProcessor, BlockQueue};
use crate::context::ConvertContext;
use crate::tree::Node;

/// Block processor for pipe-delimited tables.
///
/// A block is a table when its first line contains a pipe and its
/// second line is a delimiter row with a matching column count.
/// `:---`, `:---:` and `---:` delimiter cells set column alignment.
#[derive(Clone, Copy, Debug, Default)]
pub struct TableProcessor;

impl TableProcessor {
    /// Create the table processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BlockProcessor for TableProcessor {
    fn test(&self, _parent: &Node, block: &str) -> bool {
        parse_layout(block).is_some()
    }

    fn run(&mut self, ctx: &mut ConvertContext, parent: &mut Node, blocks: &mut BlockQueue) {
        let Some(block) = blocks.pop_front() else {
            return;
        };
        let Some((header, alignments)) = parse_layout(&block) else {
            ctx.warn("table processor claimed a non-table block");
            return;
        };

        let mut table = Node::new("table");

        let mut head_row = Node::new("tr");
        for (index, cell) in header.iter().enumerate() {
            head_row.push(make_cell("th", cell, alignments[index]));
        }
        let mut head = Node::new("thead");
        head.push(head_row);
        table.push(head);

        let mut body = Node::new("tbody");
        for line in block.lines().skip(2) {
            let cells = split_row(line);
            let mut row = Node::new("tr");
            for (index, alignment) in alignments.iter().enumerate() {
                // Short rows pad with empty cells; long rows truncate.
                let text = cells.get(index).map(String::as_str).unwrap_or_default();
                row.push(make_cell("td", text, *alignment));
            }
            body.push(row);
        }
        table.push(body);

        parent.push(table);
    }
}

fn make_cell(tag: &str, text: &str, alignment: Option<&'static str>) -> Node {
    let mut cell = Node::with_text(tag, text);
    if let Some(style) = alignment {
        cell.set_attr("style", style);
    }
    cell
}

/// Header cells and column alignments, or `None` if not a table.
type Layout = (Vec<String>, Vec<Option<&'static str>>);

fn parse_layout(block: &str) -> Option<Layout> {
    let mut lines = block.lines();
    let header_line = lines.next()?;
    if !header_line.contains('|') {
        return None;
    }
    let header = split_row(header_line);

    let delimiter = split_row(lines.next()?);
    if delimiter.len() != header.len() {
        return None;
    }
    let alignments = delimiter
        .iter()
        .map(|cell| parse_alignment(cell))
        .collect::<Option<Vec<_>>>()?;

    Some((header, alignments))
}

fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(|cell| cell.trim().to_owned()).collect()
}

/// Alignment style for a delimiter cell, or `None` for a malformed cell.
#[allow(clippy::option_option)]
fn parse_alignment(cell: &str) -> Option<Option<&'static str>> {
    if !cell.contains('-') || !cell.chars().all(|c| c == '-' || c == ':') {
        return None;
    }
    let left = cell.starts_with(':');
    let right = cell.ends_with(':');
    Some(match (left, right) {
        (true, true) => Some("text-align:center"),
        (true, false) => Some("text-align:left"),
        (false, true) => Some("text-align:right"),
        (false, false) => None,
    })
}
