//! Built-in processors the standard pipeline is assembled from.
//!
//! Priorities are exported alongside the processors so callers can
//! order custom processors relative to the defaults. Higher runs first.

mod fenced;
mod heading;
mod list;
mod meta;
mod paragraph;
mod table;
mod toc;

pub use fenced::FencedCodePreprocessor;
pub use heading::HeadingProcessor;
pub use list::ListProcessor;
pub use meta::MetaPreprocessor;
pub use paragraph::ParagraphProcessor;
pub use table::TableProcessor;
pub use toc::{TocProcessor, inject_toc};

/// Front-matter metadata preprocessor.
pub const META_PRIORITY: i32 = 100;
/// Fenced-code stashing preprocessor.
pub const FENCED_CODE_PRIORITY: i32 = 80;
/// ATX heading block processor.
pub const HEADING_PRIORITY: i32 = 130;
/// Pipe table block processor.
pub const TABLE_PRIORITY: i32 = 120;
/// Bullet and ordered list block processor.
pub const LIST_PRIORITY: i32 = 90;
/// `[TOC]` marker block processor.
pub const TOC_PRIORITY: i32 = 50;
/// Paragraph fallback; claims everything, so it must sort last.
pub const PARAGRAPH_PRIORITY: i32 = 10;
