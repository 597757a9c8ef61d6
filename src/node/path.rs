//! Node paths: the ancestor chain of source type tags.

use std::fmt;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::version::ROOT_TYPE;

/// Ancestor chain of source type tags, from the document root to a node.
///
/// Rendered as `root > list > listitem` in errors and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(SmallVec<[CompactString; 8]>);

impl NodePath {
    /// Path of the document root.
    pub fn root() -> Self {
        let mut tags = SmallVec::new();
        tags.push(CompactString::const_new(ROOT_TYPE));
        Self(tags)
    }

    /// Build a path from explicit tags.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    /// Descend into a child node.
    #[inline]
    pub fn push(&mut self, tag: impl Into<CompactString>) {
        self.0.push(tag.into());
    }

    /// Return to the parent node.
    #[inline]
    pub fn pop(&mut self) -> Option<CompactString> {
        self.0.pop()
    }

    /// Nesting depth below the root (the root itself is depth 0).
    #[inline]
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Tag of the node the path points at.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(CompactString::as_str)
    }

    /// Iterate the tags from the root down.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(CompactString::as_str)
    }
}

impl Default for NodePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            f.write_str(tag)?;
        }
        Ok(())
    }
}
