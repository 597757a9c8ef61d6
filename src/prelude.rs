//! Prelude module for common imports.
//!
//! ```ignore
//! use richtext_migrate::prelude::*;
//! ```

// Node types
pub use crate::node::{NodePath, SourceDocument, SourceNode, SourceRoot, TargetDocument, TargetNode};

// Converters
pub use crate::converters::{Converter, HeaderState, ListType};

// Registry and driver
pub use crate::migrator::{Conversion, Migrator, convert_document};
pub use crate::registry::Registry;

// Transform
pub use crate::transform::{
    ConversionStats, ConvertContext, Diagnostic, DropUnsupported, Fallback, FallbackAction,
    UnknownPlaceholder, Walker, walk,
};

// Attributes
pub use crate::attr::{Fields, FieldsExt};
pub use crate::format::TextFormat;

// Config
pub use crate::config::ConvertOptions;

// Error
pub use crate::error::{ConvertError, ConvertResult, NodeError};
