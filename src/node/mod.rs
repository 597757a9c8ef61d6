//! Node types for both sides of the migration.
//!
//! - `SourceNode` / `SourceDocument`: the legacy editor tree (input, read-only)
//! - `TargetNode` / `TargetDocument`: the Lexical tree (output, freshly built)
//! - `NodePath`: ancestor chain used to locate nodes in errors and diagnostics
//!
//! Both node types keep their type-specific attributes as a JSON map next to
//! the structural `type` / `children` (and, for targets, `version`) fields.

mod document;
mod path;
mod source;
mod target;

pub use document::{ENVELOPE_KEY, SourceDocument, SourceRoot, TargetDocument};
pub use path::NodePath;
pub use source::{IMPLICIT_TYPE, SourceNode};
pub use target::{Descendants, TargetNode};
