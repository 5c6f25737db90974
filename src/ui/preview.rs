//! Content previews for list screens.

use std::fmt;

/// Default number of characters shown before content is cut.
pub const PREVIEW_CHARS: usize = 150;

/// Appended to cut content; selecting it opens the full post.
pub const MORE_INDICATOR: &str = " more";

/// Leading part of a post's content, cut at a character boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preview<'a> {
    pub text: &'a str,
    pub truncated: bool,
}

/// Cut `content` after `limit` characters.
///
/// Content of at most `limit` characters is returned verbatim. Longer
/// content keeps exactly its first `limit` characters and is marked
/// truncated.
pub fn preview(content: &str, limit: usize) -> Preview<'_> {
    match content.char_indices().nth(limit) {
        Some((cut, _)) => Preview {
            text: &content[..cut],
            truncated: true,
        },
        None => Preview {
            text: content,
            truncated: false,
        },
    }
}

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)?;
        if self.truncated {
            f.write_str(MORE_INDICATOR)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_verbatim() {
        let p = preview("hello", PREVIEW_CHARS);
        assert!(!p.truncated);
        assert_eq!(p.to_string(), "hello");
    }

    #[test]
    fn content_at_limit_is_verbatim() {
        let content = "a".repeat(150);
        let p = preview(&content, PREVIEW_CHARS);
        assert!(!p.truncated);
        assert_eq!(p.to_string(), content);
    }

    #[test]
    fn long_content_keeps_first_150_chars() {
        let content = "b".repeat(151);
        let p = preview(&content, PREVIEW_CHARS);
        assert!(p.truncated);
        assert_eq!(p.text.chars().count(), 150);
        assert_eq!(p.to_string(), format!("{}{}", "b".repeat(150), MORE_INDICATOR));
    }

    #[test]
    fn cuts_on_character_not_byte() {
        let content = "é".repeat(200);
        let p = preview(&content, PREVIEW_CHARS);
        assert!(p.truncated);
        assert_eq!(p.text, "é".repeat(150));
    }
}
