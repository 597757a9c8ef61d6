//! Tree conversion: walker, conversion context and fallback policies.
//!
//! # Module Structure
//!
//! - `Walker` - post-order traversal dispatching nodes to converters
//! - `ConvertContext` - position of a node, handed to each converter
//! - `Fallback` - policy for nodes without a converter
//!   (`UnknownPlaceholder`, `DropUnsupported`)
//! - `Diagnostic` - record of each fallback decision
//!
//! # Example
//!
//! ```ignore
//! use richtext_migrate::transform::{walk, Walker, UnknownPlaceholder};
//!
//! let nodes = walk(&doc.root.children, "root", &registry)?;
//!
//! // Keeping diagnostics and counters:
//! let mut walker = Walker::new(&registry, &UnknownPlaceholder, &options);
//! let root = walker.convert_root(&doc.root)?;
//! let (diagnostics, stats) = walker.finish();
//! ```

mod context;
mod fallback;
mod walker;

pub use context::ConvertContext;
pub use fallback::{Diagnostic, DropUnsupported, Fallback, FallbackAction, UnknownPlaceholder};
pub use walker::{ConversionStats, Walker, walk};
