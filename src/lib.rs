//! richtext-migrate - Legacy rich-text trees to Lexical editor state
//!
//! ## Core Concepts
//!
//! **Registry dispatch**: every legacy node is routed by its `type` tag to a
//! [`Converter`]. The built-in set covers the legacy plugin's node types;
//! callers can register their own.
//!
//! **Post-order walk**: the [`Walker`] converts children before their parent,
//! so converters only ever see finished children and never recurse
//! themselves.
//!
//! **Fallback policy**: nodes without a converter become `unknownConverted`
//! placeholders (or are dropped), and are reported as [`Diagnostic`]s.
//!
//! ## Modules
//! - `node`: source/target node and document types, node paths
//! - `converters`: the `Converter` trait and built-in converters
//! - `registry`: tag → converter mapping
//! - `transform`: walker, conversion context, fallback policies
//! - `migrator`: document-level driver
//! - `format`: text format bitmask and element alignment
//! - `version`: destination node kinds and schema versions
//!
//! ## Usage
//!
//! ```ignore
//! use richtext_migrate::{Migrator, SourceDocument};
//!
//! let source = SourceDocument::from_json(legacy_json)?;
//! let conversion = Migrator::new().convert(&source)?;
//!
//! for diagnostic in &conversion.diagnostics {
//!     tracing::warn!(%diagnostic);
//! }
//! let lexical_json = conversion.document.to_json()?;
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Node types: SourceNode, TargetNode, documents, NodePath
pub mod node;

/// Converter trait and built-in converters
pub mod converters;

/// Tag → converter mapping
pub mod registry;

/// Walker, ConvertContext, fallback policies
pub mod transform;

/// Document driver
pub mod migrator;

/// Attribute access helpers
pub mod attr;

/// Text format bitmask
pub mod format;

/// Destination node kinds and versions
pub mod version;

/// Conversion options
pub mod config;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{NodePath, SourceDocument, SourceNode, TargetDocument, TargetNode};

// Conversion
pub use converters::Converter;
pub use migrator::{Conversion, Migrator, convert_document};
pub use registry::Registry;
pub use transform::{
    ConversionStats, ConvertContext, Diagnostic, DropUnsupported, Fallback, FallbackAction,
    UnknownPlaceholder, Walker, walk,
};

// Attributes and formats
pub use attr::{Fields, FieldsExt};
pub use format::TextFormat;

// Configuration
pub use config::ConvertOptions;

// Error types
pub use error::{ConvertError, ConvertResult, NodeError};
