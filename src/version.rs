//! Destination node kinds and their baseline schema versions.
//!
//! Each destination node kind owns its version number. Converters stamp the
//! constant for the kind they emit.

/// Document root
pub const ROOT_TYPE: &str = "root";
pub const ROOT_VERSION: u32 = 1;

pub const PARAGRAPH_TYPE: &str = "paragraph";
pub const PARAGRAPH_VERSION: u32 = 1;

pub const TEXT_TYPE: &str = "text";
pub const TEXT_VERSION: u32 = 1;

/// Text run inside a code block
pub const CODE_HIGHLIGHT_TYPE: &str = "code-highlight";
pub const CODE_HIGHLIGHT_VERSION: u32 = 1;

pub const TAB_TYPE: &str = "tab";
pub const TAB_VERSION: u32 = 1;

pub const HEADING_TYPE: &str = "heading";
pub const HEADING_VERSION: u32 = 1;

pub const QUOTE_TYPE: &str = "quote";
pub const QUOTE_VERSION: u32 = 1;

pub const LIST_TYPE: &str = "list";
pub const LIST_VERSION: u32 = 1;

pub const LIST_ITEM_TYPE: &str = "listitem";
pub const LIST_ITEM_VERSION: u32 = 1;

pub const LINK_TYPE: &str = "link";
pub const LINK_VERSION: u32 = 2;

pub const AUTOLINK_TYPE: &str = "autolink";
pub const AUTOLINK_VERSION: u32 = 2;

pub const MARK_TYPE: &str = "mark";
pub const MARK_VERSION: u32 = 1;

pub const UPLOAD_TYPE: &str = "upload";
pub const UPLOAD_VERSION: u32 = 1;

pub const RELATIONSHIP_TYPE: &str = "relationship";
pub const RELATIONSHIP_VERSION: u32 = 1;

pub const TABLE_TYPE: &str = "table";
pub const TABLE_VERSION: u32 = 1;

pub const TABLE_ROW_TYPE: &str = "tablerow";
pub const TABLE_ROW_VERSION: u32 = 1;

pub const TABLE_CELL_TYPE: &str = "tablecell";
pub const TABLE_CELL_VERSION: u32 = 1;

pub const CODE_TYPE: &str = "code";
pub const CODE_VERSION: u32 = 1;

pub const HORIZONTAL_RULE_TYPE: &str = "horizontalrule";
pub const HORIZONTAL_RULE_VERSION: u32 = 1;

pub const LINE_BREAK_TYPE: &str = "linebreak";
pub const LINE_BREAK_VERSION: u32 = 1;

/// Placeholder emitted for unsupported source nodes
pub const UNKNOWN_TYPE: &str = "unknownConverted";
pub const UNKNOWN_VERSION: u32 = 1;

const BASELINES: &[(&str, u32)] = &[
    (ROOT_TYPE, ROOT_VERSION),
    (PARAGRAPH_TYPE, PARAGRAPH_VERSION),
    (TEXT_TYPE, TEXT_VERSION),
    (CODE_HIGHLIGHT_TYPE, CODE_HIGHLIGHT_VERSION),
    (TAB_TYPE, TAB_VERSION),
    (HEADING_TYPE, HEADING_VERSION),
    (QUOTE_TYPE, QUOTE_VERSION),
    (LIST_TYPE, LIST_VERSION),
    (LIST_ITEM_TYPE, LIST_ITEM_VERSION),
    (LINK_TYPE, LINK_VERSION),
    (AUTOLINK_TYPE, AUTOLINK_VERSION),
    (MARK_TYPE, MARK_VERSION),
    (UPLOAD_TYPE, UPLOAD_VERSION),
    (RELATIONSHIP_TYPE, RELATIONSHIP_VERSION),
    (TABLE_TYPE, TABLE_VERSION),
    (TABLE_ROW_TYPE, TABLE_ROW_VERSION),
    (TABLE_CELL_TYPE, TABLE_CELL_VERSION),
    (CODE_TYPE, CODE_VERSION),
    (HORIZONTAL_RULE_TYPE, HORIZONTAL_RULE_VERSION),
    (LINE_BREAK_TYPE, LINE_BREAK_VERSION),
    (UNKNOWN_TYPE, UNKNOWN_VERSION),
];

/// Baseline version of a built-in destination node kind.
///
/// Returns `None` for kinds only produced by caller-registered converters.
pub fn baseline(node_type: &str) -> Option<u32> {
    BASELINES
        .iter()
        .find(|(kind, _)| *kind == node_type)
        .map(|(_, version)| *version)
}

/// Check whether `node_type` is an inline kind (allowed inside paragraphs).
pub fn is_inline(node_type: &str) -> bool {
    matches!(
        node_type,
        TEXT_TYPE
            | CODE_HIGHLIGHT_TYPE
            | TAB_TYPE
            | LINK_TYPE
            | AUTOLINK_TYPE
            | MARK_TYPE
            | LINE_BREAK_TYPE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baselines() {
        assert_eq!(baseline("heading"), Some(1));
        assert_eq!(baseline("link"), Some(2));
        assert_eq!(baseline("unknownConverted"), Some(1));
        assert_eq!(baseline("callout"), None);
    }

    #[test]
    fn test_inline_kinds() {
        assert!(is_inline("text"));
        assert!(is_inline("link"));
        assert!(!is_inline("paragraph"));
        assert!(!is_inline("upload"));
    }
}
