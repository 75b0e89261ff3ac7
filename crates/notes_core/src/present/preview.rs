//! Plain-text previews of markdown and long titles.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Shortens `text` to `max_chars` characters, appending `...` when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Single-line plain-text summary of markdown `content`.
///
/// Images are dropped, links keep their label, markup symbols and line
/// breaks collapse to single spaces. Returns `None` for empty output.
pub fn markdown_preview(content: &str, max_chars: usize) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(truncate(trimmed, max_chars))
    }
}

/// Text of the first `# ` heading line, if any.
pub fn first_heading(content: &str) -> Option<&str> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{first_heading, markdown_preview, truncate};

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn preview_strips_markup_and_keeps_link_labels() {
        let source = "# Title\n\n- [docs](https://example.com) ![img](a.png)\n**bold** `code`";
        let preview = markdown_preview(source, 100).unwrap();
        assert_eq!(preview, "Title - docs bold code");
        assert!(markdown_preview("  \n# \n", 100).is_none());
    }

    #[test]
    fn first_heading_skips_other_levels() {
        assert_eq!(first_heading("intro\n## sub\n# Main \nbody"), Some("Main"));
        assert_eq!(first_heading("no heading"), None);
    }
}
