//! Conversion options.

use compact_str::CompactString;
use serde::Deserialize;

// =============================================================================
// ConvertOptions
// =============================================================================

/// Default nesting limit, in levels below the document root.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default text direction for the output root.
pub const DEFAULT_DIRECTION: &str = "ltr";

/// Options for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Deepest nesting accepted before failing with `DepthExceeded`.
    pub max_depth: usize,
    /// Root direction used when the source root has none.
    pub direction: CompactString,
}

impl ConvertOptions {
    /// Create options with the default limits.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            direction: CompactString::const_new(DEFAULT_DIRECTION),
        }
    }

    /// Set the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the fallback root direction.
    pub fn with_direction(mut self, direction: impl Into<CompactString>) -> Self {
        self.direction = direction.into();
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}
