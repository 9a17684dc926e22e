//! Block writing functionality for managed regions.
//!
//! Every function here returns new content in which the bytes outside the
//! affected block are exactly the bytes of the input.

use crate::error::{Error, Result};
use crate::parser::{closing_marker, find_block, opening_marker};

/// Creates a complete block with markers and content.
fn format_block(id: &str, block_content: &str) -> String {
    format!(
        "{}\n{}\n{}",
        opening_marker(id),
        block_content,
        closing_marker(id)
    )
}

/// Appends a new block at the end of the content.
///
/// An empty input yields just the block followed by a newline. Otherwise the
/// block is separated from the existing text by one blank line.
///
/// # Example
/// ```
/// use rulekit_blocks::writer::insert_block;
///
/// let result = insert_block("# My notes\n", "rules", "generated");
/// assert_eq!(
///     result,
///     "# My notes\n\n<!-- rulekit:block:rules -->\ngenerated\n<!-- /rulekit:block:rules -->\n"
/// );
/// ```
pub fn insert_block(content: &str, id: &str, block_content: &str) -> String {
    let block = format_block(id, block_content);

    if content.is_empty() {
        format!("{}\n", block)
    } else if content.ends_with("\n\n") {
        format!("{}{}\n", content, block)
    } else if content.ends_with('\n') {
        format!("{}\n{}\n", content, block)
    } else {
        format!("{}\n\n{}\n", content, block)
    }
}

/// Replaces the content between an existing block's markers.
///
/// # Errors
/// Returns `Error::BlockNotFound` if no complete block with the id exists.
pub fn update_block(content: &str, id: &str, new_content: &str) -> Result<String> {
    let block = find_block(content, id).ok_or_else(|| Error::BlockNotFound { id: id.to_string() })?;

    let mut result = String::with_capacity(content.len() + new_content.len());
    result.push_str(&content[..block.inner.start]);
    result.push('\n');
    result.push_str(new_content);
    result.push('\n');
    result.push_str(&content[block.inner.end..]);
    Ok(result)
}

/// Updates the block if present, otherwise appends it.
///
/// Applying `upsert_block` twice with the same arguments returns the same
/// string both times.
///
/// # Example
/// ```
/// use rulekit_blocks::writer::upsert_block;
///
/// let first = upsert_block("user text", "rules", "v1");
/// let second = upsert_block(&first, "rules", "v2");
/// assert!(second.starts_with("user text\n\n"));
/// assert!(second.contains("\nv2\n"));
/// assert_eq!(upsert_block(&second, "rules", "v2"), second);
/// ```
pub fn upsert_block(content: &str, id: &str, block_content: &str) -> String {
    match update_block(content, id, block_content) {
        Ok(updated) => updated,
        Err(Error::BlockNotFound { .. }) => insert_block(content, id, block_content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_to_empty() {
        assert_eq!(
            insert_block("", "rules", "content"),
            "<!-- rulekit:block:rules -->\ncontent\n<!-- /rulekit:block:rules -->\n"
        );
    }

    #[test]
    fn test_insert_without_trailing_newline() {
        let result = insert_block("existing", "rules", "x");
        assert!(result.starts_with("existing\n\n<!-- rulekit:block:rules -->"));
    }

    #[test]
    fn test_update_keeps_surroundings_verbatim() {
        let content = "  head \r\n<!-- rulekit:block:rules -->\nold\n<!-- /rulekit:block:rules -->  tail\n\n";
        let result = update_block(content, "rules", "new").unwrap();
        assert_eq!(
            result,
            "  head \r\n<!-- rulekit:block:rules -->\nnew\n<!-- /rulekit:block:rules -->  tail\n\n"
        );
    }

    #[test]
    fn test_update_nonexistent_fails() {
        assert!(update_block("no blocks here", "rules", "content").is_err());
    }

    #[test]
    fn test_upsert_is_idempotent_after_insert() {
        let once = upsert_block("notes\n", "rules", "body");
        let twice = upsert_block(&once, "rules", "body");
        assert_eq!(once, twice);
    }
}
