//! Fenced code extraction.
//!
//! Runs before block splitting so fences containing blank lines stay
//! intact: each fenced region is rendered to HTML up front, stored in
//! the conversion stash, and replaced by a single placeholder line
//! that is restored after serialization.
//!
//! Fences open with three or more backticks or tildes; the closing
//! fence must use the same character, be at least as long, and carry
//! nothing but trailing whitespace. An unclosed fence runs to the end
//! of the input.

use crate::context::ConvertContext;
use crate::preprocess::Preprocessor;
use crate::serialize::escape_html;

/// Preprocessor that stashes fenced code blocks.
#[derive(Clone, Copy, Debug)]
pub struct FencedCodePreprocessor {
    highlight: bool,
}

struct OpenFence {
    marker: char,
    len: usize,
    language: String,
    body: Vec<String>,
}

impl FencedCodePreprocessor {
    /// Create the preprocessor.
    ///
    /// With `highlight` set, fences with an info string render as
    /// `<code class="language-…">` for client-side highlighters.
    #[must_use]
    pub fn new(highlight: bool) -> Self {
        Self { highlight }
    }

    fn render(&self, fence: &OpenFence) -> String {
        let mut content = fence.body.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        if self.highlight && !fence.language.is_empty() {
            format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(&fence.language),
                escape_html(&content)
            )
        } else {
            format!("<pre><code>{}</code></pre>", escape_html(&content))
        }
    }
}

impl Preprocessor for FencedCodePreprocessor {
    fn run(&mut self, ctx: &mut ConvertContext, lines: Vec<String>) -> Vec<String> {
        let mut out = Vec::with_capacity(lines.len());
        let mut fence: Option<OpenFence> = None;

        for line in lines {
            match fence {
                Some(ref mut open) if !closes_fence(open, &line) => open.body.push(line),
                Some(_) => {
                    if let Some(open) = fence.take() {
                        out.push(ctx.stash.store(self.render(&open)));
                    }
                }
                None => match parse_opening(&line) {
                    Some(open) => fence = Some(open),
                    None => out.push(line),
                },
            }
        }

        if let Some(open) = fence {
            out.push(ctx.stash.store(self.render(&open)));
        }
        out
    }
}

fn parse_opening(line: &str) -> Option<OpenFence> {
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next()?;
    if marker != '`' && marker != '~' {
        return None;
    }
    let len = trimmed.chars().take_while(|&c| c == marker).count();
    if len < 3 {
        return None;
    }
    let info = trimmed[len..].trim();
    let language = info.split_whitespace().next().unwrap_or("").to_owned();
    Some(OpenFence {
        marker,
        len,
        language,
        body: Vec::new(),
    })
}

fn closes_fence(open: &OpenFence, line: &str) -> bool {
    let trimmed = line.trim_start();
    let len = trimmed.chars().take_while(|&c| c == open.marker).count();
    len >= open.len && trimmed[len..].chars().all(char::is_whitespace)
}
