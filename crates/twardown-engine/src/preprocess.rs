//! Text-line preprocessors.

use crate::context::ConvertContext;

/// A text-level transformer run before block parsing.
///
/// Preprocessors run in descending registration priority; each receives
/// the full line sequence produced by the previous one and returns the
/// sequence the next one will see. A preprocessor may carry state
/// captured at construction (a filename, a rendering flag) and may
/// write to the conversion context (metadata, stash).
///
/// A preprocessor that cannot make sense of its input must return the
/// lines unchanged rather than fail: the chain has no recovery
/// mechanism, so an unhandled fault aborts the whole conversion.
pub trait Preprocessor {
    /// Transform the document's line sequence.
    fn run(&mut self, ctx: &mut ConvertContext, lines: Vec<String>) -> Vec<String>;
}
