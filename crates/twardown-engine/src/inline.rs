//! Span-level markdown rendering.
//!
//! Block text (paragraph bodies, headings, list items, table cells) is
//! rendered with pulldown-cmark, constrained to span-level output: any
//! block construct the parser finds inside the text (a fence, a nested
//! list, a blockquote) is emitted as its literal source instead, so
//! block structure stays under the block-processor chain's control.

use std::fmt::Write;
use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::serialize::escape_html;

/// Render text as span-level HTML.
#[must_use]
pub fn render_inline(text: &str) -> String {
    let source = text.trim();
    if source.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(source.len() + 16);
    let mut events = Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH).into_offset_iter();

    while let Some((event, range)) = events.next() {
        match event {
            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => out.push('\n'),
            Event::Start(Tag::Emphasis) => out.push_str("<em>"),
            Event::End(TagEnd::Emphasis) => out.push_str("</em>"),
            Event::Start(Tag::Strong) => out.push_str("<strong>"),
            Event::End(TagEnd::Strong) => out.push_str("</strong>"),
            Event::Start(Tag::Strikethrough) => out.push_str("<s>"),
            Event::End(TagEnd::Strikethrough) => out.push_str("</s>"),
            Event::Start(Tag::Link { dest_url, .. }) => {
                write!(out, r#"<a href="{}">"#, escape_html(&dest_url)).unwrap();
            }
            Event::End(TagEnd::Link) => out.push_str("</a>"),
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                let alt = collect_alt(&mut events);
                write_image(&dest_url, &alt, &title, &mut out);
            }
            // Raw HTML passes through untouched.
            Event::Start(Tag::HtmlBlock) | Event::End(TagEnd::HtmlBlock) => {}
            Event::Html(html) | Event::InlineHtml(html) => out.push_str(&html),
            // Any other block structure inside span text stays literal.
            Event::Start(tag) => {
                out.push_str(&escape_html(source[range].trim_end()));
                skip_to_end(tag.to_end(), &mut events);
            }
            Event::End(_) => {}
            Event::Text(chunk) => out.push_str(&escape_html(&chunk)),
            Event::Code(code) => {
                write!(out, "<code>{}</code>", escape_html(&code)).unwrap();
            }
            Event::SoftBreak => out.push('\n'),
            Event::HardBreak => out.push_str("<br>"),
            Event::Rule => out.push_str(&escape_html(source[range].trim_end())),
            Event::TaskListMarker(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {}
        }
    }

    while out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Consume events up to and including the matching end tag.
fn skip_to_end<'a>(end: TagEnd, events: &mut impl Iterator<Item = (Event<'a>, Range<usize>)>) {
    let mut depth = 1_usize;
    for (event, _) in events {
        match event {
            Event::Start(ref tag) if tag.to_end() == end => depth += 1,
            Event::End(tag_end) if tag_end == end => {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
            _ => {}
        }
    }
}

/// Collect an image's alt text up to the closing tag.
fn collect_alt<'a>(events: &mut impl Iterator<Item = (Event<'a>, Range<usize>)>) -> String {
    let mut alt = String::new();
    for (event, _) in events {
        match event {
            Event::End(TagEnd::Image) => break,
            Event::Text(chunk) | Event::Code(chunk) => alt.push_str(&chunk),
            _ => {}
        }
    }
    alt
}

fn write_image(src: &str, alt: &str, title: &str, out: &mut String) {
    if title.is_empty() {
        write!(
            out,
            r#"<img src="{}" alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    } else {
        write!(
            out,
            r#"<img src="{}" title="{}" alt="{}">"#,
            escape_html(src),
            escape_html(title),
            escape_html(alt)
        )
        .unwrap();
    }
}
