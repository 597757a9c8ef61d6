//! Text and element formatting.
//!
//! Legacy text nodes describe formatting as boolean flags, a list of mark
//! names, or an integer bitmask. Lexical only stores the bitmask. Element
//! alignment is a string in Lexical but was sometimes stored as a number.

use std::ops::{BitOr, BitOrAssign};

use serde_json::Value;

use crate::attr::{Fields, FieldsExt};

// =============================================================================
// TextFormat
// =============================================================================

/// Lexical text format bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextFormat(u32);

impl TextFormat {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1);
    pub const ITALIC: Self = Self(1 << 1);
    pub const STRIKETHROUGH: Self = Self(1 << 2);
    pub const UNDERLINE: Self = Self(1 << 3);
    pub const CODE: Self = Self(1 << 4);
    pub const SUBSCRIPT: Self = Self(1 << 5);
    pub const SUPERSCRIPT: Self = Self(1 << 6);
    pub const HIGHLIGHT: Self = Self(1 << 7);

    /// Every format flag with its canonical name.
    pub const FLAGS: [(&'static str, Self); 8] = [
        ("bold", Self::BOLD),
        ("italic", Self::ITALIC),
        ("strikethrough", Self::STRIKETHROUGH),
        ("underline", Self::UNDERLINE),
        ("code", Self::CODE),
        ("subscript", Self::SUBSCRIPT),
        ("superscript", Self::SUPERSCRIPT),
        ("highlight", Self::HIGHLIGHT),
    ];

    /// Legacy spellings accepted next to the canonical names.
    const ALIASES: [(&'static str, Self); 3] = [
        ("strike", Self::STRIKETHROUGH),
        ("sub", Self::SUBSCRIPT),
        ("sup", Self::SUPERSCRIPT),
    ];

    /// Keys of a source text node that carry formatting.
    pub const SOURCE_KEYS: [&'static str; 13] = [
        "bold",
        "italic",
        "strikethrough",
        "underline",
        "code",
        "subscript",
        "superscript",
        "highlight",
        "strike",
        "sub",
        "sup",
        "marks",
        "styles",
    ];

    /// Create from raw bits
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Look up a flag by canonical name or legacy alias (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::FLAGS
            .iter()
            .chain(Self::ALIASES.iter())
            .find(|(flag, _)| *flag == name)
            .map(|(_, format)| *format)
    }

    /// Collect the format of a legacy text node.
    ///
    /// All representations are combined: an integer `format`, boolean flags
    /// (`bold: true`, ...), and a mark list under `marks` or `styles`.
    /// Unknown mark names are skipped.
    pub fn from_fields(fields: &Fields) -> Self {
        let mut format = fields
            .get_u64("format")
            .and_then(|bits| u32::try_from(bits).ok())
            .map(Self::from_bits)
            .unwrap_or_default();

        for (name, flag) in Self::FLAGS.iter().chain(Self::ALIASES.iter()) {
            if fields.get_bool(name) == Some(true) {
                format |= *flag;
            }
        }

        for key in ["marks", "styles"] {
            for mark in fields.get_array(key).into_iter().flatten().filter_map(Value::as_str) {
                match Self::from_name(mark) {
                    Some(flag) => format |= flag,
                    None => tracing::debug!(mark, "ignoring unknown text mark"),
                }
            }
        }

        format
    }
}

impl BitOr for TextFormat {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TextFormat {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// =============================================================================
// Element alignment
// =============================================================================

/// Alignment names indexed by the legacy numeric format (1-based).
const ALIGNMENTS: [&str; 6] = ["left", "center", "right", "justify", "start", "end"];

/// Lexical element format (alignment) from legacy attributes.
///
/// Reads `format` as a string or legacy number, then `align`; defaults to `""`.
pub fn element_alignment(fields: &Fields) -> &str {
    match fields.get("format") {
        Some(Value::String(s)) => return s,
        Some(Value::Number(n)) => {
            if let Some(name) = n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| ALIGNMENTS.get(i))
            {
                return name;
            }
        }
        _ => {}
    }
    fields.get_str("align").unwrap_or("")
}
