//! Block parsing functionality for managed regions.
//!
//! Parses id-tagged regions in text files with the format:
//! ```text
//! <!-- rulekit:block:ID -->
//! content here
//! <!-- /rulekit:block:ID -->
//! ```

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// A parsed block with its id, content, and byte positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The id identifying this block.
    pub id: String,
    /// The content between the markers, without the single newline that
    /// follows the opening marker and precedes the closing marker.
    pub content: String,
    /// Byte range from the start of the opening marker to the end of the
    /// closing marker.
    pub span: Range<usize>,
    /// Byte range of the raw text strictly between the two markers.
    pub inner: Range<usize>,
}

/// Opening markers carry alphanumeric ids with hyphens and underscores.
static OPEN_MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!-- rulekit:block:([a-zA-Z0-9_-]+) -->").expect("Invalid open marker regex")
});

/// The literal opening marker for `id`.
pub fn opening_marker(id: &str) -> String {
    format!("<!-- rulekit:block:{} -->", id)
}

/// The literal closing marker for `id`.
pub fn closing_marker(id: &str) -> String {
    format!("<!-- /rulekit:block:{} -->", id)
}

/// Parses all blocks from the given content, in order of appearance.
///
/// An opening marker without a matching closing marker is ignored.
///
/// # Example
/// ```
/// use rulekit_blocks::parser::parse_blocks;
///
/// let content = "intro\n<!-- rulekit:block:rules -->\nbody\n<!-- /rulekit:block:rules -->\n";
/// let blocks = parse_blocks(content);
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].id, "rules");
/// assert_eq!(blocks[0].content, "body");
/// ```
pub fn parse_blocks(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(open_caps) = OPEN_MARKER_REGEX.captures_at(content, cursor) {
        let (Some(open_match), Some(id_match)) = (open_caps.get(0), open_caps.get(1)) else {
            break;
        };
        let id = id_match.as_str();
        let close = closing_marker(id);

        let Some(close_offset) = content[open_match.end()..].find(&close) else {
            cursor = open_match.end();
            continue;
        };
        let close_start = open_match.end() + close_offset;
        let close_end = close_start + close.len();

        let raw = &content[open_match.end()..close_start];
        let trimmed = raw.strip_prefix('\n').unwrap_or(raw);
        let trimmed = trimmed.strip_suffix('\n').unwrap_or(trimmed);

        blocks.push(Block {
            id: id.to_string(),
            content: trimmed.to_string(),
            span: open_match.start()..close_end,
            inner: open_match.end()..close_start,
        });
        cursor = close_end;
    }

    blocks
}

/// Finds the first block with the given id.
pub fn find_block(content: &str, id: &str) -> Option<Block> {
    parse_blocks(content).into_iter().find(|block| block.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blocks_empty() {
        assert!(parse_blocks("No blocks here").is_empty());
    }

    #[test]
    fn test_parse_block_positions() {
        let content = "ab\n<!-- rulekit:block:x -->\nhi\n<!-- /rulekit:block:x -->cd";
        let block = find_block(content, "x").unwrap();
        assert_eq!(&content[..block.span.start], "ab\n");
        assert_eq!(&content[block.span.end..], "cd");
        assert_eq!(&content[block.inner.clone()], "\nhi\n");
    }

    #[test]
    fn test_unterminated_block_ignored() {
        let content = "<!-- rulekit:block:x -->\nno end";
        assert!(find_block(content, "x").is_none());
    }

    #[test]
    fn test_multiple_blocks() {
        let content = "<!-- rulekit:block:a -->\n1\n<!-- /rulekit:block:a -->\n\
                       <!-- rulekit:block:b -->\n2\n<!-- /rulekit:block:b -->";
        let ids: Vec<String> = parse_blocks(content).into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
