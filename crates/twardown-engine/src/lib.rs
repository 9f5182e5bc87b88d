//! Block-structured markdown engine with registerable processor chains.
//!
//! A conversion runs in three stages:
//!
//! 1. **Preprocessing**: the raw line sequence passes through an ordered
//!    chain of [`Preprocessor`]s, each rewriting the full sequence.
//! 2. **Block parsing**: the lines are split into blank-line-separated
//!    blocks, and each block is offered to an ordered chain of
//!    [`BlockProcessor`]s; the highest-priority processor whose `test`
//!    succeeds consumes it and appends [`Node`]s to the document tree.
//! 3. **Serialization**: the tree is written out as HTML, with
//!    span-level text rendered through pulldown-cmark and stashed
//!    fragments restored.
//!
//! Both chains are priority-ordered and name-keyed (see
//! [`PriorityRegistry`]); the [`builtin`] module provides the stock
//! processors a pipeline is normally assembled from.
//!
//! # Example
//!
//! ```
//! use twardown_engine::Pipeline;
//! use twardown_engine::builtin::{PARAGRAPH_PRIORITY, ParagraphProcessor};
//!
//! let mut pipeline = Pipeline::new();
//! pipeline.register_block_processor("paragraph", PARAGRAPH_PRIORITY, Box::new(ParagraphProcessor))?;
//! let conversion = pipeline.convert("Hello, *world*!");
//! assert_eq!(conversion.html, "<p>Hello, <em>world</em>!</p>");
//! # Ok::<(), twardown_engine::RegistryError>(())
//! ```

pub mod builtin;

mod block;
mod context;
mod inline;
mod pipeline;
mod preprocess;
mod registry;
mod serialize;
mod tree;

pub use block::{BlockProcessor, BlockQueue, split_blocks};
pub use context::{ConvertContext, HtmlStash, Metadata, TocEntry, slugify};
pub use inline::render_inline;
pub use pipeline::{Conversion, Pipeline};
pub use preprocess::Preprocessor;
pub use registry::{PriorityRegistry, Registration, RegistryError};
pub use serialize::{escape_html, serialize};
pub use tree::Node;
