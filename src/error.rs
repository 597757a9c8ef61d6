//! Error types for richtext-migrate.
//!
//! Converters fail with a [`NodeError`] that only knows about the node in
//! front of them. The walker wraps it into a [`ConvertError`] carrying the
//! [`NodePath`] of the offending node, so callers can locate the content.

use compact_str::CompactString;
use thiserror::Error;

use crate::node::NodePath;

/// A converter rejected a malformed source node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// A required type-specific attribute is absent.
    #[error("`{node_type}` node is missing required field `{field}`")]
    MissingField {
        /// Source type tag of the node
        node_type: CompactString,
        /// Name of the missing attribute
        field: &'static str,
    },

    /// An attribute is present but unusable.
    #[error("`{node_type}` node has invalid field `{field}`: {reason}")]
    InvalidField {
        /// Source type tag of the node
        node_type: CompactString,
        /// Name of the offending attribute
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

impl NodeError {
    /// Create a missing-field error.
    pub fn missing(node_type: impl Into<CompactString>, field: &'static str) -> Self {
        Self::MissingField {
            node_type: node_type.into(),
            field,
        }
    }

    /// Create an invalid-field error.
    pub fn invalid(
        node_type: impl Into<CompactString>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            node_type: node_type.into(),
            field,
            reason: reason.into(),
        }
    }

    /// Source type tag of the rejected node.
    pub fn node_type(&self) -> &str {
        match self {
            Self::MissingField { node_type, .. } | Self::InvalidField { node_type, .. } => node_type,
        }
    }

    /// Name of the attribute that caused the failure.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field, .. } | Self::InvalidField { field, .. } => field,
        }
    }
}

/// Errors that abort the conversion of a document.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A converter rejected a node.
    #[error("malformed node at {path}: {source}")]
    MalformedNode {
        /// Ancestor chain of source type tags, ending at the rejected node
        path: NodePath,
        /// The converter's error
        source: NodeError,
    },

    /// The document nests deeper than the configured limit.
    #[error("nesting depth exceeds {limit} at {path}")]
    DepthExceeded {
        /// Configured maximum depth
        limit: usize,
        /// Path to the first node beyond the limit
        path: NodePath,
    },

    /// The payload is not a document at all.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// JSON (de)serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

impl ConvertError {
    /// Create an invalid-document error with a message.
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Path of the node the error refers to, if any.
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            Self::MalformedNode { path, .. } | Self::DepthExceeded { path, .. } => Some(path),
            Self::InvalidDocument(_) | Self::Json(_) => None,
        }
    }

    /// The converter error, if this is a malformed node.
    pub fn node_error(&self) -> Option<&NodeError> {
        match self {
            Self::MalformedNode { source, .. } => Some(source),
            _ => None,
        }
    }
}
